use tracing::debug;

use super::{WrapResult, checked};
use crate::core::{Env, GymError, Result, Step};
use crate::spaces::{BoxSpace, Space, Value, Vector};

/// ClipAction clamps each action component into the inner Box bounds before
/// forwarding it.
pub struct ClipAction<E: Env> {
    inner: E,
    name: String,
    bounds: BoxSpace,
}

impl<E: Env> ClipAction<E> {
    /// Fails with `WrapperPrecondition` unless the inner action space is a Box.
    pub fn new(inner: E) -> WrapResult<Self, E> {
        let (inner, bounds) = checked(inner, |env| match env.action_space() {
            Space::Box(b) => Ok(b.clone()),
            other => Err(GymError::WrapperPrecondition(format!(
                "ClipAction requires a Box action space, found {}",
                other.kind()
            ))),
        })?;
        let name = format!("ClipAction({})", inner.name());
        debug!(wrapper = %name, "wrapped environment");
        Ok(Self { inner, name, bounds })
    }

    /// The clamped action that would be forwarded for `action`. Fails with
    /// `ShapeMismatch` if its length differs from the Box dimension.
    pub fn action(&self, action: &[f64]) -> Result<Vector> { self.bounds.clip(action) }

    pub fn inner(&self) -> &E { &self.inner }
    pub fn inner_mut(&mut self) -> &mut E { &mut self.inner }
    pub fn into_inner(self) -> E { self.inner }
}

impl<E: Env> Env for ClipAction<E> {
    fn name(&self) -> &str { &self.name }
    fn continuous_action(&self) -> bool { self.inner.continuous_action() }
    fn action_space(&self) -> &Space { self.inner.action_space() }
    fn observation_space(&self) -> &Space { self.inner.observation_space() }
    fn max_episode_steps(&self) -> Option<u32> { self.inner.max_episode_steps() }

    fn reset(&mut self) -> Result<Value> { self.inner.reset() }

    fn step(&mut self, action: &[f64]) -> Result<Step> {
        let clipped = self.action(action)?;
        self.inner.step(&clipped)
    }

    fn seed(&mut self, seed: u64) -> Result<Vec<u64>> { self.inner.seed(seed) }
    fn close(&mut self) { self.inner.close() }
}
