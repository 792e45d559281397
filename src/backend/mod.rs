//! Collaborator contract for whatever actually runs environment dynamics,
//! and the `Gym` context that owns a backend for its whole lifetime.

pub mod classic_control;
pub mod native;
#[cfg(test)]
pub(crate) mod stub;

pub use native::{EnvSpec, NativeBackend, SessionFactory};

use tracing::debug;

use crate::core::{GymError, Result};
use crate::env::GymEnv;
use crate::spaces::{RawDomain, Value};

/// An action in the form a backend consumes it.
#[derive(Clone, Debug, PartialEq)]
pub enum RawAction {
    Continuous(Vec<f64>),
    Discrete(i64),
}

/// Raw result of one backend step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub observation: Value,
    pub reward: f64,
    pub done: bool,
}

/// One live environment instance inside a backend.
pub trait Session {
    fn action_domain(&self) -> &RawDomain;

    fn observation_domain(&self) -> &RawDomain;

    /// The step cap the backend registers for this environment by default.
    fn max_episode_steps(&self) -> Option<u32> { None }

    fn reset(&mut self) -> Result<Value>;

    fn step(&mut self, action: RawAction) -> Result<StepOutcome>;

    /// Seed the instance; returns the seeds actually used.
    fn seed(&mut self, seed: u64) -> Result<Vec<u64>>;

    /// Release the instance. Called exactly once by its owning `GymEnv`.
    fn close(&mut self);
}

/// Provider of sessions by environment name.
pub trait Backend {
    fn make(&mut self, name: &str) -> Result<Box<dyn Session>>;

    /// Tear down backend-wide state. Called once by `Gym`.
    fn shutdown(&mut self) {}
}

/// Explicit backend context with an init/teardown lifecycle.
///
/// Environments created through `make` own their sessions outright and must
/// be closed by their owner; `shutdown` only tears down the backend itself.
pub struct Gym<B: Backend> {
    backend: B,
    closed: bool,
}

impl<B: Backend> Gym<B> {
    pub fn init(backend: B) -> Self {
        debug!("gym context initialised");
        Self { backend, closed: false }
    }

    /// Create the named environment, translating its domains into spaces.
    pub fn make(&mut self, name: &str) -> Result<GymEnv> {
        if self.closed {
            return Err(GymError::Closed("gym context".into()));
        }
        let session = self.backend.make(name)?;
        GymEnv::new(session, name)
    }

    pub fn backend(&self) -> &B { &self.backend }

    pub fn backend_mut(&mut self) -> &mut B { &mut self.backend }

    pub fn shutdown(mut self) { self.teardown(); }

    fn teardown(&mut self) {
        if !self.closed {
            self.closed = true;
            self.backend.shutdown();
            debug!("gym context shut down");
        }
    }
}

impl<B: Backend> Drop for Gym<B> {
    fn drop(&mut self) { self.teardown(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Env;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingBackend {
        shutdowns: Rc<Cell<usize>>,
    }

    impl Backend for CountingBackend {
        fn make(&mut self, name: &str) -> Result<Box<dyn Session>> {
            match name {
                "Stub-v0" => Ok(Box::new(stub::StubSession::continuous(Some(10)))),
                other => Err(GymError::Backend(format!("Unknown environment id: {other}"))),
            }
        }

        fn shutdown(&mut self) { self.shutdowns.set(self.shutdowns.get() + 1); }
    }

    #[test]
    fn make_builds_a_translated_env() {
        let shutdowns = Rc::new(Cell::new(0));
        let mut gym = Gym::init(CountingBackend { shutdowns: shutdowns.clone() });
        let mut env = gym.make("Stub-v0").unwrap();
        assert_eq!(env.name(), "Stub-v0");
        assert!(env.continuous_action());
        assert_eq!(env.max_episode_steps(), Some(10));
        env.close();
        assert!(gym.make("Missing-v0").is_err());
        gym.shutdown();
        assert_eq!(shutdowns.get(), 1);
    }

    #[test]
    fn drop_tears_down_once() {
        let shutdowns = Rc::new(Cell::new(0));
        {
            let _gym = Gym::init(CountingBackend { shutdowns: shutdowns.clone() });
        }
        assert_eq!(shutdowns.get(), 1);
    }
}
