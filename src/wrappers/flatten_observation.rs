use tracing::debug;

use super::{WrapResult, checked};
use crate::core::{Env, Result, Step};
use crate::spaces::{BoxSpace, Space, Value, Vector, flatten};

/// FlattenObservation turns a (possibly nested) observation into one flat
/// vector, walking the inner observation space depth-first.
pub struct FlattenObservation<E: Env> {
    inner: E,
    name: String,
    observation_space: Space,
}

impl<E: Env> FlattenObservation<E> {
    /// The exposed space is a Box whose bounds are the concatenated inner
    /// lower and upper bounds.
    pub fn new(inner: E) -> WrapResult<Self, E> {
        let (inner, observation_space) = checked(inner, |env| {
            let space = env.observation_space();
            let low = space.low().concat();
            let high = space.high().concat();
            Ok(Space::Box(BoxSpace::new(low, high)?))
        })?;
        let name = format!("FlattenObservation({})", inner.name());
        debug!(wrapper = %name, dim = observation_space.flat_dim(), "wrapped environment");
        Ok(Self { inner, name, observation_space })
    }

    pub fn observation(&self, value: &Value) -> Result<Vector> {
        flatten(self.inner.observation_space(), value)
    }

    pub fn inner(&self) -> &E { &self.inner }
    pub fn inner_mut(&mut self) -> &mut E { &mut self.inner }
    pub fn into_inner(self) -> E { self.inner }
}

impl<E: Env> Env for FlattenObservation<E> {
    fn name(&self) -> &str { &self.name }
    fn continuous_action(&self) -> bool { self.inner.continuous_action() }
    fn action_space(&self) -> &Space { self.inner.action_space() }
    fn observation_space(&self) -> &Space { &self.observation_space }
    fn max_episode_steps(&self) -> Option<u32> { self.inner.max_episode_steps() }

    fn reset(&mut self) -> Result<Value> {
        let obs = self.inner.reset()?;
        self.observation(&obs).map(Value::Vector)
    }

    fn step(&mut self, action: &[f64]) -> Result<Step> {
        let mut s = self.inner.step(action)?;
        s.observation = Value::Vector(self.observation(&s.observation)?);
        Ok(s)
    }

    fn seed(&mut self, seed: u64) -> Result<Vec<u64>> { self.inner.seed(seed) }
    fn close(&mut self) { self.inner.close() }
}
