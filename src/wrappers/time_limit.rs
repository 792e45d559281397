use tracing::{debug, trace};

use super::{WrapError, WrapResult};
use crate::core::{Env, Result, Step};
use crate::env::{ClockState, EpisodeClock, GymEnv};
use crate::spaces::{Space, Value};

/// A wrapper that enforces a maximum number of steps per episode, marking
/// truncation when the cap is reached.
///
/// A cap below this wrapper cannot be lifted, so the effective limit of the
/// chain is the smallest cap in it. Use [`TimeLimit::alter_default`] to
/// replace the backend's default cap instead.
pub struct TimeLimit<E: Env> {
    inner: E,
    name: String,
    clock: EpisodeClock,
}

impl<E: Env> TimeLimit<E> {
    /// Add a cap of `max_steps` on top of any cap already in `inner`.
    pub fn new(inner: E, max_steps: u32) -> WrapResult<Self, E> {
        match EpisodeClock::new(max_steps) {
            Ok(clock) => Ok(Self::with_clock(inner, clock)),
            Err(e) => Err(WrapError::new(e, inner)),
        }
    }

    fn with_clock(inner: E, clock: EpisodeClock) -> Self {
        let name = format!("TimeLimit(steps: {})({})", clock.max_steps(), inner.name());
        debug!(wrapper = %name, effective = ?min_cap(Some(clock.max_steps()), inner.max_episode_steps()), "wrapped environment");
        Self { inner, name, clock }
    }

    pub fn state(&self) -> ClockState { self.clock.state() }

    pub fn elapsed_steps(&self) -> u32 { self.clock.elapsed() }

    pub fn inner(&self) -> &E { &self.inner }
    pub fn inner_mut(&mut self) -> &mut E { &mut self.inner }
    pub fn into_inner(self) -> E { self.inner }
}

impl TimeLimit<GymEnv> {
    /// Replace the base environment's default cap with `max_steps`.
    ///
    /// Only the base environment carries a default cap, so this takes a
    /// `GymEnv` directly and must be the innermost wrapper.
    pub fn alter_default(mut base: GymEnv, max_steps: u32) -> WrapResult<Self, GymEnv> {
        let clock = match EpisodeClock::new(max_steps) {
            Ok(clock) => clock,
            Err(e) => return Err(WrapError::new(e, base)),
        };
        let previous = base.strip_default_limit();
        debug!(env = %base.name(), ?previous, max_steps, "replacing default step cap");
        Ok(Self::with_clock(base, clock))
    }
}

fn min_cap(a: Option<u32>, b: Option<u32>) -> Option<u32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

impl<E: Env> Env for TimeLimit<E> {
    fn name(&self) -> &str { &self.name }
    fn continuous_action(&self) -> bool { self.inner.continuous_action() }
    fn action_space(&self) -> &Space { self.inner.action_space() }
    fn observation_space(&self) -> &Space { self.inner.observation_space() }

    fn max_episode_steps(&self) -> Option<u32> {
        min_cap(Some(self.clock.max_steps()), self.inner.max_episode_steps())
    }

    fn reset(&mut self) -> Result<Value> {
        self.clock.reset();
        self.inner.reset()
    }

    fn step(&mut self, action: &[f64]) -> Result<Step> {
        let mut s = self.inner.step(action)?;
        self.clock.record(&mut s);
        if s.truncated {
            trace!(wrapper = %self.name, elapsed = self.clock.elapsed(), "episode truncated");
        }
        Ok(s)
    }

    fn seed(&mut self, seed: u64) -> Result<Vec<u64>> { self.inner.seed(seed) }
    fn close(&mut self) { self.inner.close() }
}
