//! Native domain descriptions handed over by a backend, and the translator
//! that turns them into `Space` values.
//!
//! A description is a tag plus named attributes, mirroring how a foreign
//! runtime exposes its space objects (`Box` with `low`/`high`/`shape`,
//! `Discrete` with `n`, `Dict` and `Tuple` with `spaces`). Only the tags
//! `Box`, `Discrete`, `Dict` and `Tuple` are understood.

use crate::core::{GymError, Result};

use super::{BoxSpace, Dict, Discrete, Space, Tuple};

/// An attribute value of a raw domain description.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RawAttr {
    Int(i64),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    /// Keyed children, in declaration order.
    Entries(Vec<(String, RawDomain)>),
    /// Positional children.
    Items(Vec<RawDomain>),
}

impl RawAttr {
    pub fn kind(&self) -> &'static str {
        match self {
            RawAttr::Int(_) => "int",
            RawAttr::Ints(_) => "int list",
            RawAttr::Floats(_) => "float list",
            RawAttr::Entries(_) => "keyed entries",
            RawAttr::Items(_) => "positional items",
        }
    }
}

/// A backend's description of an action or observation domain.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawDomain {
    pub tag: String,
    pub attrs: Vec<(String, RawAttr)>,
}

impl RawDomain {
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Self { tag: tag.into(), attrs: Vec::new() }
    }

    /// Builder-style attribute setter; replaces an existing key.
    pub fn with<K: Into<String>>(mut self, key: K, value: RawAttr) -> Self {
        let k = key.into();
        if let Some((_, v)) = self.attrs.iter_mut().find(|(kk, _)| kk == &k) {
            *v = value;
        } else {
            self.attrs.push((k, value));
        }
        self
    }

    pub fn boxed(low: Vec<f64>, high: Vec<f64>) -> Self {
        Self::new("Box")
            .with("shape", RawAttr::Ints(vec![low.len() as i64]))
            .with("low", RawAttr::Floats(low))
            .with("high", RawAttr::Floats(high))
    }

    pub fn discrete(n: i64) -> Self {
        Self::new("Discrete").with("n", RawAttr::Int(n))
    }

    pub fn dict<K: Into<String>>(entries: impl IntoIterator<Item = (K, RawDomain)>) -> Self {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self::new("Dict").with("spaces", RawAttr::Entries(entries))
    }

    pub fn tuple(items: impl IntoIterator<Item = RawDomain>) -> Self {
        Self::new("Tuple").with("spaces", RawAttr::Items(items.into_iter().collect()))
    }

    pub fn attr(&self, key: &str) -> Option<&RawAttr> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub(crate) fn expect_tag(&self, tag: &str) -> Result<()> {
        if self.tag == tag {
            Ok(())
        } else {
            Err(GymError::domain(format!("{tag} description"), format!("{} description", self.tag)))
        }
    }

    fn require(&self, key: &str) -> Result<&RawAttr> {
        self.attr(key)
            .ok_or_else(|| GymError::domain(format!("attribute `{key}` on {}", self.tag), "nothing"))
    }

    pub(crate) fn int(&self, key: &str) -> Result<i64> {
        match self.require(key)? {
            RawAttr::Int(v) => Ok(*v),
            other => Err(GymError::domain(format!("`{key}` as an int"), other.kind())),
        }
    }

    pub(crate) fn floats(&self, key: &str) -> Result<&[f64]> {
        match self.require(key)? {
            RawAttr::Floats(v) => Ok(v),
            other => Err(GymError::domain(format!("`{key}` as a float list"), other.kind())),
        }
    }

    pub(crate) fn entries(&self, key: &str) -> Result<&[(String, RawDomain)]> {
        match self.require(key)? {
            RawAttr::Entries(v) => Ok(v),
            other => Err(GymError::domain(format!("`{key}` as keyed entries"), other.kind())),
        }
    }

    pub(crate) fn items(&self, key: &str) -> Result<&[RawDomain]> {
        match self.require(key)? {
            RawAttr::Items(v) => Ok(v),
            other => Err(GymError::domain(format!("`{key}` as positional items"), other.kind())),
        }
    }
}

/// Convert a raw description into a `Space`, dispatching on its tag.
pub fn translate(raw: &RawDomain) -> Result<Space> {
    let space = match raw.tag.as_str() {
        "Box" => Space::Box(BoxSpace::from_raw(raw)?),
        "Discrete" => Space::Discrete(Discrete::from_raw(raw)?),
        "Dict" => Space::Dict(Dict::from_raw(raw)?),
        "Tuple" => Space::Tuple(Tuple::from_raw(raw)?),
        other => return Err(GymError::UnsupportedSpace(other.to_string())),
    };
    Ok(space)
}
