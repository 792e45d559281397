use tracing::debug;

use super::{WrapResult, checked};
use crate::core::{Env, GymError, Result, Step};
use crate::spaces::{BoxSpace, Space, Value, Vector};

/// RescaleAction exposes the action range `[a, b]^dim` and maps each action
/// affinely onto the inner Box bounds.
///
/// The mapped action is not clipped: inputs outside `[a, b]` land outside
/// the inner bounds.
pub struct RescaleAction<E: Env> {
    inner: E,
    name: String,
    min_action: f64,
    max_action: f64,
    low: Vector,
    high: Vector,
    action_space: Space,
}

impl<E: Env> RescaleAction<E> {
    pub fn new(inner: E, min_action: f64, max_action: f64) -> WrapResult<Self, E> {
        let (inner, (low, high, action_space)) = checked(inner, |env| {
            let b = match env.action_space() {
                Space::Box(b) => b,
                other => {
                    return Err(GymError::WrapperPrecondition(format!(
                        "RescaleAction requires a Box action space, found {}",
                        other.kind()
                    )));
                }
            };
            if !b.is_bounded() {
                return Err(GymError::WrapperPrecondition("RescaleAction requires finite action bounds".into()));
            }
            if !(min_action < max_action && (max_action - min_action).is_finite()) {
                return Err(GymError::InvalidConfiguration(format!(
                    "RescaleAction range must be finite with a < b, got [{min_action}, {max_action}]"
                )));
            }
            let space = BoxSpace::uniform(b.dim(), min_action, max_action)?;
            Ok((b.low(), b.high(), Space::Box(space)))
        })?;
        let name = format!("RescaleAction({})", inner.name());
        debug!(wrapper = %name, min_action, max_action, "wrapped environment");
        Ok(Self { inner, name, min_action, max_action, low, high, action_space })
    }

    /// Map an action from `[a, b]` onto the inner bounds.
    pub fn action(&self, action: &[f64]) -> Result<Vector> {
        if action.len() != self.low.len() {
            return Err(GymError::ShapeMismatch(format!(
                "RescaleAction expects {} components, got {}",
                self.low.len(),
                action.len()
            )));
        }
        let span = self.max_action - self.min_action;
        Ok(action
            .iter()
            .zip(self.low.iter().zip(&self.high))
            .map(|(x, (lo, hi))| lo + (x - self.min_action) * (hi - lo) / span)
            .collect())
    }

    pub fn inner(&self) -> &E { &self.inner }
    pub fn inner_mut(&mut self) -> &mut E { &mut self.inner }
    pub fn into_inner(self) -> E { self.inner }
}

impl<E: Env> Env for RescaleAction<E> {
    fn name(&self) -> &str { &self.name }
    fn continuous_action(&self) -> bool { true }
    fn action_space(&self) -> &Space { &self.action_space }
    fn observation_space(&self) -> &Space { self.inner.observation_space() }
    fn max_episode_steps(&self) -> Option<u32> { self.inner.max_episode_steps() }

    fn reset(&mut self) -> Result<Value> { self.inner.reset() }

    fn step(&mut self, action: &[f64]) -> Result<Step> {
        let mapped = self.action(action)?;
        self.inner.step(&mapped)
    }

    fn seed(&mut self, seed: u64) -> Result<Vec<u64>> { self.inner.seed(seed) }
    fn close(&mut self) { self.inner.close() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RawAction;
    use crate::backend::stub::StubSession;
    use crate::env::GymEnv;
    use crate::spaces::RawDomain;

    fn base(low: Vec<f64>, high: Vec<f64>) -> GymEnv {
        let stub = StubSession::continuous(None).with_action(RawDomain::boxed(low, high));
        GymEnv::new(Box::new(stub), "Stub").unwrap()
    }

    #[test]
    fn maps_range_endpoints_onto_inner_bounds() {
        let env = RescaleAction::new(base(vec![0.0, -2.0], vec![10.0, 2.0]), -1.0, 1.0).unwrap();
        assert_eq!(env.action(&[-1.0, -1.0]).unwrap(), vec![0.0, -2.0]);
        assert_eq!(env.action(&[1.0, 1.0]).unwrap(), vec![10.0, 2.0]);
        assert_eq!(env.action(&[0.0, 0.5]).unwrap(), vec![5.0, 1.0]);
        assert_eq!(env.action_space().low(), vec![vec![-1.0, -1.0]]);
        assert!(matches!(env.action(&[0.0]), Err(GymError::ShapeMismatch(_))));
    }

    #[test]
    fn step_forwards_the_mapped_action() {
        let stub = StubSession::continuous(None);
        let actions = stub.actions.clone();
        let inner = GymEnv::new(Box::new(stub), "Stub").unwrap();
        let mut env = RescaleAction::new(inner, 0.0, 1.0).unwrap();
        env.step(&[0.75]).unwrap();
        assert_eq!(actions.borrow()[0], RawAction::Continuous(vec![0.5]));
    }

    #[test]
    fn rejects_unbounded_inner_and_empty_range() {
        let err = RescaleAction::new(base(vec![f64::NEG_INFINITY], vec![1.0]), -1.0, 1.0).err().unwrap();
        assert!(matches!(err.error(), GymError::WrapperPrecondition(_)));

        let err = RescaleAction::new(base(vec![-1.0], vec![1.0]), 1.0, 1.0).err().unwrap();
        assert!(matches!(err.error(), GymError::InvalidConfiguration(_)));

        let err = RescaleAction::new(base(vec![-1.0], vec![1.0]), 1.0, -1.0).err().unwrap();
        assert!(matches!(err.error(), GymError::InvalidConfiguration(_)));
    }

    #[test]
    fn rejects_non_finite_ranges() {
        for (a, b) in [(f64::NEG_INFINITY, f64::INFINITY), (0.0, f64::INFINITY), (f64::NAN, 1.0), (-f64::MAX, f64::MAX)] {
            let stub = StubSession::continuous(None);
            let actions = stub.actions.clone();
            let inner = GymEnv::new(Box::new(stub), "Stub").unwrap();
            let err = RescaleAction::new(inner, a, b).err().unwrap();
            assert!(matches!(err.error(), GymError::InvalidConfiguration(_)), "[{a}, {b}]");
            assert!(actions.borrow().is_empty());
        }
    }
}
