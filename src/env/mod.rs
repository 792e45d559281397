//! The base environment: a backend session plus its translated spaces.

pub mod clock;

pub use clock::{ClockState, EpisodeClock, TRUNCATED_KEY};

use tracing::{debug, trace, warn};

use crate::backend::{RawAction, Session};
use crate::core::{Env, GymError, Info, Result, Step};
use crate::spaces::{Space, Value};

/// Innermost environment of every wrapper chain.
///
/// Owns the backend session and the backend's default step cap, which plays
/// the role of a pre-existing time-limit layer. `TimeLimit::alter_default`
/// is the only way to replace that cap.
pub struct GymEnv {
    session: Option<Box<dyn Session>>,
    name: String,
    continuous_action: bool,
    action_space: Space,
    observation_space: Space,
    default_limit: Option<EpisodeClock>,
}

impl GymEnv {
    /// Wrap a session, translating its native domains. On failure the
    /// session is closed before the error is returned.
    pub fn new<S: Into<String>>(mut session: Box<dyn Session>, name: S) -> Result<Self> {
        let name = name.into();
        let parts = Self::translate(session.as_ref());
        match parts {
            Ok((action_space, observation_space, default_limit)) => {
                let continuous_action = matches!(action_space, Space::Box(_));
                debug!(env = %name, action = action_space.kind(), observation = observation_space.kind(), "environment created");
                Ok(Self {
                    session: Some(session),
                    name,
                    continuous_action,
                    action_space,
                    observation_space,
                    default_limit,
                })
            }
            Err(e) => {
                warn!(env = %name, error = %e, "releasing session after failed translation");
                session.close();
                Err(e)
            }
        }
    }

    fn translate(session: &dyn Session) -> Result<(Space, Space, Option<EpisodeClock>)> {
        let action_space = Space::from_raw(session.action_domain())?;
        let observation_space = Space::from_raw(session.observation_domain())?;
        let default_limit = session.max_episode_steps().map(EpisodeClock::new).transpose()?;
        Ok((action_space, observation_space, default_limit))
    }

    /// The backend's default step cap, if still installed.
    pub fn default_limit(&self) -> Option<u32> {
        self.default_limit.as_ref().map(EpisodeClock::max_steps)
    }

    /// Remove the default step cap, returning it.
    pub(crate) fn strip_default_limit(&mut self) -> Option<u32> {
        self.default_limit.take().map(|c| c.max_steps())
    }

    pub fn is_closed(&self) -> bool { self.session.is_none() }

    fn session_mut(&mut self) -> Result<&mut Box<dyn Session>> {
        match self.session.as_mut() {
            Some(s) => Ok(s),
            None => Err(GymError::Closed(self.name.clone())),
        }
    }

    fn raw_action(&self, action: &[f64]) -> Result<RawAction> {
        if self.continuous_action {
            return Ok(RawAction::Continuous(action.to_vec()));
        }
        match action {
            // NaN and infinities have a NaN fractional part
            [a] if a.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(a) => {
                Ok(RawAction::Discrete(*a as i64))
            }
            [a] => Err(GymError::domain("an integral discrete action", a.to_string())),
            _ => Err(GymError::ShapeMismatch(format!("discrete action takes 1 value, got {}", action.len()))),
        }
    }
}

impl Env for GymEnv {
    fn name(&self) -> &str { &self.name }

    fn continuous_action(&self) -> bool { self.continuous_action }

    fn action_space(&self) -> &Space { &self.action_space }

    fn observation_space(&self) -> &Space { &self.observation_space }

    fn max_episode_steps(&self) -> Option<u32> { self.default_limit() }

    fn reset(&mut self) -> Result<Value> {
        let obs = self.session_mut()?.reset()?;
        if let Some(clock) = self.default_limit.as_mut() {
            clock.reset();
        }
        Ok(obs)
    }

    fn step(&mut self, action: &[f64]) -> Result<Step> {
        let raw = self.raw_action(action)?;
        let outcome = self.session_mut()?.step(raw)?;
        let mut step = Step::new(outcome.observation, outcome.reward, outcome.done, false, Info::new());
        if let Some(clock) = self.default_limit.as_mut() {
            clock.record(&mut step);
        }
        trace!(env = %self.name, reward = step.reward, done = step.done(), "step");
        Ok(step)
    }

    fn seed(&mut self, seed: u64) -> Result<Vec<u64>> {
        self.session_mut()?.seed(seed)
    }

    fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            debug!(env = %self.name, "closing environment");
            session.close();
        }
    }
}

impl Drop for GymEnv {
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take() {
            debug!(env = %self.name, "closing environment on drop");
            session.close();
        }
    }
}
