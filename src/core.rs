// Core traits and types shared by spaces, the base environment and wrappers.

use crate::spaces::{Space, Value};

/// A small ordered info map attached to each step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Info {
    entries: Vec<(String, InfoValue)>,
}

impl Info {
    /// Create an empty Info map.
    pub fn new() -> Self { Self { entries: Vec::new() } }

    /// Insert or replace a key with the given value.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: InfoValue) {
        let k = key.into();
        if let Some((_, v)) = self.entries.iter_mut().find(|(kk, _)| kk == &k) {
            *v = value;
        } else {
            self.entries.push((k, value));
        }
    }

    /// Get a reference to a value by key.
    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn len(&self) -> usize { self.entries.len() }
}

/// A small set of value types commonly used in info maps.
#[derive(Clone, Debug, PartialEq)]
pub enum InfoValue {
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
}

impl From<bool> for InfoValue { fn from(v: bool) -> Self { InfoValue::Bool(v) } }
impl From<i64> for InfoValue { fn from(v: i64) -> Self { InfoValue::I64(v) } }
impl From<u32> for InfoValue { fn from(v: u32) -> Self { InfoValue::I64(v as i64) } }
impl From<f64> for InfoValue { fn from(v: f64) -> Self { InfoValue::F64(v) } }
impl From<&str> for InfoValue { fn from(v: &str) -> Self { InfoValue::Str(v.to_string()) } }
impl From<String> for InfoValue { fn from(v: String) -> Self { InfoValue::Str(v) } }

/// A step result from the environment.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub observation: Value,
    pub reward: f64,
    /// The backend reported the episode as finished.
    pub terminated: bool,
    /// A step cap ended the episode.
    pub truncated: bool,
    pub info: Info,
}

impl Step {
    pub fn new(observation: Value, reward: f64, terminated: bool, truncated: bool, info: Info) -> Self {
        Self { observation, reward, terminated, truncated, info }
    }

    /// Whether the episode is over for either reason.
    pub fn done(&self) -> bool { self.terminated || self.truncated }
}

/// Recoverable errors across spaces, environments and wrappers.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GymError {
    #[error("Domain mismatch: expected {expected}, observed {observed}")]
    DomainMismatch { expected: String, observed: String },
    #[error("Unsupported space: {0}")]
    UnsupportedSpace(String),
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("Wrapper precondition failed: {0}")]
    WrapperPrecondition(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Environment closed: {0}")]
    Closed(String),
}

impl GymError {
    pub(crate) fn domain(expected: impl Into<String>, observed: impl Into<String>) -> Self {
        GymError::DomainMismatch { expected: expected.into(), observed: observed.into() }
    }
}

/// Convenience alias for results using GymError.
pub type Result<T> = std::result::Result<T, GymError>;

/// Environment contract shared by the base environment and every wrapper.
///
/// Calls are synchronous and take `&mut self`; an instance must not be shared
/// between threads without external serialization.
pub trait Env {
    /// Human-readable name; wrappers derive theirs from the inner name.
    fn name(&self) -> &str;

    /// Whether actions are continuous vectors rather than a discrete index.
    fn continuous_action(&self) -> bool;

    fn action_space(&self) -> &Space;

    fn observation_space(&self) -> &Space;

    /// Effective episode step cap of the whole chain, if any.
    fn max_episode_steps(&self) -> Option<u32>;

    /// Reset the environment and return the initial observation.
    fn reset(&mut self) -> Result<Value>;

    /// Apply an action and advance the environment by one step.
    fn step(&mut self, action: &[f64]) -> Result<Step>;

    /// Seed the backend; returns the seeds it actually used.
    fn seed(&mut self, seed: u64) -> Result<Vec<u64>>;

    /// Close and release any external resources. Closing the outermost
    /// wrapper closes every layer below it exactly once.
    fn close(&mut self);
}
