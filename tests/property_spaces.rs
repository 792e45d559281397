use gym_bridge::{BoxSpace, Dict, Discrete, Space, Tuple, Value, flatten, unflatten};
use proptest::prelude::*;

fn nested_space(box_dims: &[usize], n: u32) -> Space {
    let mut entries: Vec<(String, Space)> = box_dims
        .iter()
        .enumerate()
        .map(|(i, &d)| (format!("box{i}"), Space::Box(BoxSpace::uniform(d, -1.0, 1.0).unwrap())))
        .collect();
    let tuple = Tuple::new(vec![
        Space::Discrete(Discrete::new(n).unwrap()),
        Space::Box(BoxSpace::uniform(2, 0.0, 5.0).unwrap()),
    ]);
    entries.push(("pair".to_string(), Space::Tuple(tuple)));
    Space::Dict(Dict::new(entries).unwrap())
}

proptest! {
    // Box sampling always within bounds and deterministic per seed
    #[test]
    fn box_sampling_contains_and_deterministic(
        bounds in proptest::collection::vec((-1e3f64..1e3, 0.0f64..1e3), 1..8),
        seed in any::<u64>(),
    ) {
        let low: Vec<f64> = bounds.iter().map(|(l, _)| *l).collect();
        let high: Vec<f64> = bounds.iter().map(|(l, w)| l + w).collect();
        let mut b1 = BoxSpace::new(low.clone(), high.clone()).unwrap();
        let mut b2 = BoxSpace::new(low, high).unwrap();
        b1.seed(seed);
        b2.seed(seed);
        for _ in 0..50 {
            let v1 = b1.sample();
            let v2 = b2.sample();
            prop_assert!(b1.contains(&v1));
            prop_assert_eq!(v1, v2);
        }
    }

    #[test]
    fn discrete_sampling_contains(n in 1u32..1000, seed in any::<u64>()) {
        let mut d = Discrete::new(n).unwrap();
        d.seed(seed);
        for _ in 0..100 {
            let v = d.sample();
            prop_assert!(d.contains(&v));
            prop_assert_eq!(v.len(), 1);
        }
    }

    // Flatten(Unflatten(x)) == x for any x of the right length
    #[test]
    fn flatten_inverts_unflatten(
        box_dims in proptest::collection::vec(1usize..5, 0..4),
        n in 1u32..10,
        pool in proptest::collection::vec(-1e6f64..1e6, 32),
    ) {
        let space = nested_space(&box_dims, n);
        let x = &pool[..space.flat_dim()];
        let value = unflatten(&space, x).unwrap();
        prop_assert_eq!(flatten(&space, &value).unwrap(), x.to_vec());
    }

    // Unflatten(Flatten(v)) == v for sampled, conforming values
    #[test]
    fn unflatten_inverts_flatten_on_samples(
        box_dims in proptest::collection::vec(1usize..5, 0..4),
        n in 1u32..10,
        seed in any::<u64>(),
    ) {
        let mut space = nested_space(&box_dims, n);
        space.seed(seed);
        let sample = space.sample().concat();
        let value = unflatten(&space, &sample).unwrap();
        prop_assert!(space.contains(&value));
        let flat = flatten(&space, &value).unwrap();
        prop_assert_eq!(unflatten(&space, &flat).unwrap(), value);
    }
}

#[test]
fn dict_sample_follows_declaration_order() {
    let mut space = Space::Dict(
        Dict::new([
            ("a", Space::Box(BoxSpace::uniform(2, 10.0, 11.0).unwrap())),
            ("b", Space::Discrete(Discrete::new(3).unwrap())),
        ])
        .unwrap(),
    );
    let flat = space.sample().concat();
    assert_eq!(flat.len(), 3);
    assert!(flat[..2].iter().all(|x| (10.0..=11.0).contains(x)));
    assert!((0.0..3.0).contains(&flat[2]));
}

#[test]
fn tuple_rejects_wrong_arity() {
    let space = Space::Tuple(Tuple::new(vec![Space::Discrete(Discrete::new(2).unwrap())]));
    let value = Value::Tuple(vec![Value::from(vec![0.0]), Value::from(vec![1.0])]);
    assert!(!space.contains(&value));
    assert!(flatten(&space, &value).is_err());
}
