use tracing::debug;

use super::{WrapResult, checked};
use crate::core::{Env, GymError, Result, Step};
use crate::spaces::{Dict, Space, Value};

/// FilterObservation keeps a configured subset of a Dict observation's keys,
/// in the configured order.
pub struct FilterObservation<E: Env> {
    inner: E,
    name: String,
    keys: Vec<String>,
    observation_space: Space,
}

impl<E: Env> FilterObservation<E> {
    pub fn new<K: Into<String>>(inner: E, keys: impl IntoIterator<Item = K>) -> WrapResult<Self, E> {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let (inner, observation_space) = checked(inner, |env| Self::filtered_space(env.observation_space(), &keys))?;
        let name = format!("FilterObservation({})", inner.name());
        debug!(wrapper = %name, keys = ?keys, "wrapped environment");
        Ok(Self { inner, name, keys, observation_space })
    }

    fn filtered_space(space: &Space, keys: &[String]) -> Result<Space> {
        let dict = match space {
            Space::Dict(d) => d,
            other => {
                return Err(GymError::WrapperPrecondition(format!(
                    "FilterObservation requires a Dict observation space, found {}",
                    other.kind()
                )));
            }
        };
        if keys.is_empty() {
            return Err(GymError::InvalidConfiguration("FilterObservation needs at least one key".into()));
        }
        let mut kept = Vec::with_capacity(keys.len());
        for key in keys {
            if kept.iter().any(|(k, _): &(String, Space)| k == key) {
                return Err(GymError::InvalidConfiguration(format!("duplicate filter key `{key}`")));
            }
            let child = dict.get(key).ok_or_else(|| {
                GymError::WrapperPrecondition(format!("observation space has no key `{key}`"))
            })?;
            kept.push((key.clone(), child.clone()));
        }
        Ok(Space::Dict(Dict::new(kept)?))
    }

    pub fn keys(&self) -> &[String] { &self.keys }

    /// Project a raw record onto the configured keys.
    pub fn observation(&self, value: &Value) -> Result<Value> {
        if !matches!(value, Value::Dict(_)) {
            return Err(GymError::WrapperPrecondition(format!(
                "FilterObservation expects a record, got a {}",
                value.kind()
            )));
        }
        let entries = self
            .keys
            .iter()
            .map(|key| {
                value
                    .get(key)
                    .map(|v| (key.clone(), v.clone()))
                    .ok_or_else(|| GymError::WrapperPrecondition(format!("observation record has no key `{key}`")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Dict(entries))
    }

    pub fn inner(&self) -> &E { &self.inner }
    pub fn inner_mut(&mut self) -> &mut E { &mut self.inner }
    pub fn into_inner(self) -> E { self.inner }
}

impl<E: Env> Env for FilterObservation<E> {
    fn name(&self) -> &str { &self.name }
    fn continuous_action(&self) -> bool { self.inner.continuous_action() }
    fn action_space(&self) -> &Space { self.inner.action_space() }
    fn observation_space(&self) -> &Space { &self.observation_space }
    fn max_episode_steps(&self) -> Option<u32> { self.inner.max_episode_steps() }

    fn reset(&mut self) -> Result<Value> {
        let obs = self.inner.reset()?;
        self.observation(&obs)
    }

    fn step(&mut self, action: &[f64]) -> Result<Step> {
        let mut s = self.inner.step(action)?;
        s.observation = self.observation(&s.observation)?;
        Ok(s)
    }

    fn seed(&mut self, seed: u64) -> Result<Vec<u64>> { self.inner.seed(seed) }
    fn close(&mut self) { self.inner.close() }
}
