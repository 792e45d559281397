//! Structural bijection between nested values and flat vectors.
//!
//! The traversal is the one used by `Space::sample`/`low`/`high`: leaves in
//! depth-first declaration order, a `Discrete` leaf taking one slot.

use crate::core::{GymError, Result};

use super::{Space, Value, Vector};

/// Lower a value conforming to `space` into one flat vector.
pub fn flatten(space: &Space, value: &Value) -> Result<Vector> {
    let mut out = Vec::with_capacity(space.flat_dim());
    flatten_into(space, value, &mut out)?;
    Ok(out)
}

fn flatten_into(space: &Space, value: &Value, out: &mut Vector) -> Result<()> {
    match (space, value) {
        (Space::Box(b), Value::Vector(v)) => {
            if v.len() != b.dim() {
                return Err(GymError::ShapeMismatch(format!("Box of dim {} cannot hold {} values", b.dim(), v.len())));
            }
            out.extend_from_slice(v);
        }
        (Space::Discrete(_), Value::Vector(v)) => {
            if v.len() != 1 {
                return Err(GymError::ShapeMismatch(format!("Discrete holds 1 value, got {}", v.len())));
            }
            out.push(v[0]);
        }
        (Space::Dict(d), Value::Dict(record)) => {
            if record.len() != d.len() {
                return Err(GymError::ShapeMismatch(format!("Dict has {} keys, record has {}", d.len(), record.len())));
            }
            for (key, child) in d.iter() {
                let entry = value
                    .get(key)
                    .ok_or_else(|| GymError::ShapeMismatch(format!("record is missing key `{key}`")))?;
                flatten_into(child, entry, out)?;
            }
        }
        (Space::Tuple(t), Value::Tuple(items)) => {
            if items.len() != t.len() {
                return Err(GymError::ShapeMismatch(format!("Tuple has arity {}, sequence has {}", t.len(), items.len())));
            }
            for (child, item) in t.iter().zip(items) {
                flatten_into(child, item, out)?;
            }
        }
        (s, v) => {
            return Err(GymError::ShapeMismatch(format!("{} space cannot hold a {}", s.kind(), v.kind())));
        }
    }
    Ok(())
}

/// Rebuild the nested value of `space` from a flat vector.
pub fn unflatten(space: &Space, flat: &[f64]) -> Result<Value> {
    let dim = space.flat_dim();
    if flat.len() != dim {
        return Err(GymError::ShapeMismatch(format!("expected {dim} values, got {}", flat.len())));
    }
    let mut cursor = 0;
    Ok(take(space, flat, &mut cursor))
}

fn take(space: &Space, flat: &[f64], cursor: &mut usize) -> Value {
    match space {
        Space::Box(_) | Space::Discrete(_) => {
            let n = space.flat_dim();
            let v = flat[*cursor..*cursor + n].to_vec();
            *cursor += n;
            Value::Vector(v)
        }
        Space::Dict(d) => Value::Dict(d.iter().map(|(k, s)| (k.to_string(), take(s, flat, cursor))).collect()),
        Space::Tuple(t) => Value::Tuple(t.iter().map(|s| take(s, flat, cursor)).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spaces::{BoxSpace, Dict, Discrete, Tuple};

    fn nested() -> Space {
        Space::from(
            Dict::new([
                ("pos", Space::from(BoxSpace::uniform(2, -1.0, 1.0).unwrap())),
                (
                    "parts",
                    Space::from(Tuple::new(vec![
                        Space::from(Discrete::new(4).unwrap()),
                        Space::from(BoxSpace::uniform(1, 0.0, 9.0).unwrap()),
                    ])),
                ),
                ("mode", Space::from(Discrete::new(3).unwrap())),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn flattens_in_declaration_order() {
        let value = Value::record([
            ("mode", Value::from(vec![2.0])),
            ("pos", Value::from(vec![0.1, 0.2])),
            ("parts", Value::Tuple(vec![Value::from(vec![3.0]), Value::from(vec![7.5])])),
        ]);
        assert_eq!(flatten(&nested(), &value).unwrap(), vec![0.1, 0.2, 3.0, 7.5, 2.0]);
    }

    #[test]
    fn unflatten_rebuilds_structure() {
        let v = unflatten(&nested(), &[0.1, 0.2, 3.0, 7.5, 2.0]).unwrap();
        assert_eq!(
            v,
            Value::record([
                ("pos", Value::from(vec![0.1, 0.2])),
                ("parts", Value::Tuple(vec![Value::from(vec![3.0]), Value::from(vec![7.5])])),
                ("mode", Value::from(vec![2.0])),
            ])
        );
    }

    #[test]
    fn flat_layout_matches_bounds_layout() {
        let space = nested();
        assert_eq!(flatten(&space, &unflatten(&space, &space.low().concat()).unwrap()).unwrap(), space.low().concat());
        assert_eq!(space.high().concat(), vec![1.0, 1.0, 3.0, 9.0, 2.0]);
    }

    #[test]
    fn wrong_length_is_a_shape_mismatch() {
        assert!(matches!(unflatten(&nested(), &[0.0; 4]), Err(GymError::ShapeMismatch(_))));
        assert!(matches!(unflatten(&nested(), &[0.0; 6]), Err(GymError::ShapeMismatch(_))));
    }

    #[test]
    fn non_conforming_values_are_shape_mismatches() {
        let space = nested();
        let missing_key = Value::record([
            ("pos", Value::from(vec![0.1, 0.2])),
            ("mode", Value::from(vec![2.0])),
            ("other", Value::from(vec![2.0])),
        ]);
        assert!(matches!(flatten(&space, &missing_key), Err(GymError::ShapeMismatch(_))));
        assert!(matches!(flatten(&space, &Value::from(vec![0.0; 5])), Err(GymError::ShapeMismatch(_))));

        let short_leaf = Space::from(BoxSpace::uniform(3, 0.0, 1.0).unwrap());
        assert!(matches!(flatten(&short_leaf, &Value::from(vec![0.0; 2])), Err(GymError::ShapeMismatch(_))));
    }
}
