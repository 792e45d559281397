// In-process backend: a registry of environment specs and session factories.

use std::collections::HashMap;

use tracing::debug;

use super::classic_control::{CartPole, MountainCarContinuous};
use super::{Backend, Session};
use crate::core::{GymError, Result};

/// Environment specification metadata.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvSpec {
    /// Unique identifier like "CartPole-v1".
    pub id: String,
    /// Default step cap the backend imposes on every episode.
    pub max_episode_steps: Option<u32>,
    /// Target reward threshold for a "solved" score, if defined.
    pub reward_threshold: Option<f64>,
    /// Whether environment has inherent nondeterminism beyond RNG seed.
    pub nondeterministic: bool,
}

impl EnvSpec {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self { id: id.into(), max_episode_steps: None, reward_threshold: None, nondeterministic: false }
    }

    pub fn with_max_episode_steps(mut self, steps: u32) -> Self {
        self.max_episode_steps = Some(steps);
        self
    }

    pub fn with_reward_threshold(mut self, threshold: f64) -> Self {
        self.reward_threshold = Some(threshold);
        self
    }
}

/// Factory closure constructing a fresh session for a spec.
pub type SessionFactory = Box<dyn Fn(&EnvSpec) -> Box<dyn Session>>;

/// Backend running registered environments in-process.
#[derive(Default)]
pub struct NativeBackend {
    specs: HashMap<String, EnvSpec>,
    factories: HashMap<String, SessionFactory>,
}

impl NativeBackend {
    pub fn new() -> Self { Self::default() }

    /// A backend with the bundled classic-control environments registered.
    pub fn with_classic_control() -> Self {
        let mut backend = Self::new();
        backend.insert(
            EnvSpec::new("MountainCarContinuous-v0").with_max_episode_steps(999).with_reward_threshold(90.0),
            Box::new(|spec: &EnvSpec| Box::new(MountainCarContinuous::new(spec.max_episode_steps)) as Box<dyn Session>),
        );
        backend.insert(
            EnvSpec::new("CartPole-v1").with_max_episode_steps(500).with_reward_threshold(475.0),
            Box::new(|spec: &EnvSpec| Box::new(CartPole::new(spec.max_episode_steps)) as Box<dyn Session>),
        );
        backend
    }

    pub fn register(&mut self, spec: EnvSpec, factory: SessionFactory) -> Result<()> {
        if self.specs.contains_key(&spec.id) {
            return Err(GymError::InvalidConfiguration(format!("Env id already registered: {}", spec.id)));
        }
        debug!(id = %spec.id, "registering environment");
        self.insert(spec, factory);
        Ok(())
    }

    fn insert(&mut self, spec: EnvSpec, factory: SessionFactory) {
        self.factories.insert(spec.id.clone(), factory);
        self.specs.insert(spec.id.clone(), spec);
    }

    pub fn spec(&self, id: &str) -> Option<&EnvSpec> { self.specs.get(id) }

    pub fn ids(&self) -> impl Iterator<Item = &str> { self.specs.keys().map(String::as_str) }
}

impl Backend for NativeBackend {
    fn make(&mut self, name: &str) -> Result<Box<dyn Session>> {
        match (self.specs.get(name), self.factories.get(name)) {
            (Some(spec), Some(factory)) => Ok(factory(spec)),
            _ => Err(GymError::Backend(format!("Unknown environment id: {name}"))),
        }
    }
}
