use crate::core::{GymError, Result};

use super::raw::{RawDomain, translate};
use super::{Space, Value, Vector};

/// A dictionary of named sub-spaces.
///
/// Declaration order is significant: sampling, bounds and flattening all walk
/// the children in the order they were declared, never in key order.
#[derive(Clone, Debug, PartialEq)]
pub struct Dict {
    spaces: Vec<(String, Space)>,
}

impl Dict {
    pub fn new<K: Into<String>>(spaces: impl IntoIterator<Item = (K, Space)>) -> Result<Self> {
        let mut out: Vec<(String, Space)> = Vec::new();
        for (k, s) in spaces {
            let k = k.into();
            if out.iter().any(|(kk, _)| kk == &k) {
                return Err(GymError::domain("unique Dict keys", format!("duplicate key `{k}`")));
            }
            out.push((k, s));
        }
        Ok(Self { spaces: out })
    }

    /// Translate a raw `Dict` description, recursing into every child.
    pub fn from_raw(raw: &RawDomain) -> Result<Self> {
        raw.expect_tag("Dict")?;
        let children = raw
            .entries("spaces")?
            .iter()
            .map(|(k, child)| Ok((k.clone(), translate(child)?)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(children)
    }

    pub fn get(&self, key: &str) -> Option<&Space> {
        self.spaces.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.spaces.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Space)> {
        self.spaces.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn len(&self) -> usize { self.spaces.len() }

    pub fn is_empty(&self) -> bool { self.spaces.is_empty() }

    pub fn sample(&mut self) -> Vec<Vector> {
        self.spaces.iter_mut().flat_map(|(_, s)| s.sample()).collect()
    }

    /// A record matches when it has exactly the declared keys and every child
    /// contains its entry.
    pub fn contains(&self, record: &[(String, Value)]) -> bool {
        if record.len() != self.spaces.len() {
            return false;
        }
        self.spaces.iter().all(|(k, s)| {
            let mut hits = record.iter().filter(|(rk, _)| rk == k);
            match (hits.next(), hits.next()) {
                (Some((_, v)), None) => s.contains(v),
                _ => false,
            }
        })
    }

    pub fn low(&self) -> Vec<Vector> {
        self.spaces.iter().flat_map(|(_, s)| s.low()).collect()
    }

    pub fn high(&self) -> Vec<Vector> {
        self.spaces.iter().flat_map(|(_, s)| s.high()).collect()
    }

    /// Every child receives the same seed.
    pub fn seed(&mut self, seed: u64) {
        for (_, s) in &mut self.spaces {
            s.seed(seed);
        }
    }

    pub fn flat_dim(&self) -> usize {
        self.spaces.iter().map(|(_, s)| s.flat_dim()).sum()
    }
}
