//! Typed action/observation domains.
//!
//! `Space` is a closed set of variants. Leaves (`Box`, `Discrete`) contribute
//! exactly one vector to every sample and bound; composites (`Dict`, `Tuple`)
//! concatenate their children's results depth-first in declaration order.
//! `flatten` walks the same order, which is what makes flattening and
//! bounds line up.

mod box_space;
mod dict;
mod discrete;
pub mod flatten;
pub mod interop;
pub mod raw;
mod tuple;

pub use box_space::{BoxSpace, Interval};
pub use dict::Dict;
pub use discrete::Discrete;
pub use flatten::{flatten, unflatten};
pub use raw::{RawAttr, RawDomain, translate};
pub use tuple::Tuple;

use crate::core::Result;

/// Fixed-length real vector, the common currency for actions and observations.
pub type Vector = Vec<f64>;

/// A value living in some `Space`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Leaf value of a `Box` or `Discrete` space.
    Vector(Vector),
    /// Keyed record for a `Dict` space.
    Dict(Vec<(String, Value)>),
    /// Positional sequence for a `Tuple` space.
    Tuple(Vec<Value>),
}

impl Value {
    /// Build a keyed record from `(key, value)` pairs, keeping their order.
    pub fn record<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Dict(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Look up a key of a record. Returns `None` for non-records.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Dict(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Vector(_) => "vector",
            Value::Dict(_) => "record",
            Value::Tuple(_) => "sequence",
        }
    }
}

impl From<Vector> for Value {
    fn from(v: Vector) -> Self { Value::Vector(v) }
}

/// A legal action/observation domain.
#[derive(Clone, Debug, PartialEq)]
pub enum Space {
    Box(BoxSpace),
    Discrete(Discrete),
    Dict(Dict),
    Tuple(Tuple),
}

impl Space {
    /// Translate a backend description; see [`raw::translate`].
    pub fn from_raw(raw: &RawDomain) -> Result<Self> { translate(raw) }

    /// Variant name, matching the raw description tags.
    pub fn kind(&self) -> &'static str {
        match self {
            Space::Box(_) => "Box",
            Space::Discrete(_) => "Discrete",
            Space::Dict(_) => "Dict",
            Space::Tuple(_) => "Tuple",
        }
    }

    /// Draw one sample per leaf, in depth-first declaration order.
    pub fn sample(&mut self) -> Vec<Vector> {
        match self {
            Space::Box(b) => vec![b.sample()],
            Space::Discrete(d) => vec![d.sample()],
            Space::Dict(d) => d.sample(),
            Space::Tuple(t) => t.sample(),
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (Space::Box(b), Value::Vector(v)) => b.contains(v),
            (Space::Discrete(d), Value::Vector(v)) => d.contains(v),
            (Space::Dict(d), Value::Dict(record)) => d.contains(record),
            (Space::Tuple(t), Value::Tuple(items)) => t.contains(items),
            _ => false,
        }
    }

    /// Reseed every sampler in the tree with the same `seed`.
    pub fn seed(&mut self, seed: u64) {
        match self {
            Space::Box(b) => b.seed(seed),
            Space::Discrete(d) => d.seed(seed),
            Space::Dict(d) => d.seed(seed),
            Space::Tuple(t) => t.seed(seed),
        }
    }

    pub fn low(&self) -> Vec<Vector> {
        match self {
            Space::Box(b) => vec![b.low()],
            Space::Discrete(d) => vec![d.low()],
            Space::Dict(d) => d.low(),
            Space::Tuple(t) => t.low(),
        }
    }

    pub fn high(&self) -> Vec<Vector> {
        match self {
            Space::Box(b) => vec![b.high()],
            Space::Discrete(d) => vec![d.high()],
            Space::Dict(d) => d.high(),
            Space::Tuple(t) => t.high(),
        }
    }

    /// Length of the flattened representation.
    pub fn flat_dim(&self) -> usize {
        match self {
            Space::Box(b) => b.dim(),
            Space::Discrete(_) => 1,
            Space::Dict(d) => d.flat_dim(),
            Space::Tuple(t) => t.flat_dim(),
        }
    }

    pub fn as_box(&self) -> Option<&BoxSpace> {
        match self {
            Space::Box(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Space::Dict(d) => Some(d),
            _ => None,
        }
    }
}

impl From<BoxSpace> for Space { fn from(s: BoxSpace) -> Self { Space::Box(s) } }
impl From<Discrete> for Space { fn from(s: Discrete) -> Self { Space::Discrete(s) } }
impl From<Dict> for Space { fn from(s: Dict) -> Self { Space::Dict(s) } }
impl From<Tuple> for Space { fn from(s: Tuple) -> Self { Space::Tuple(s) } }
