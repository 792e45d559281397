use crate::core::Result;

use super::raw::{RawDomain, translate};
use super::{Space, Value, Vector};

/// An ordered product of sub-spaces. Every recursive operation walks the
/// children by position.
#[derive(Clone, Debug, PartialEq)]
pub struct Tuple {
    spaces: Vec<Space>,
}

impl Tuple {
    pub fn new(spaces: Vec<Space>) -> Self { Self { spaces } }

    /// Translate a raw `Tuple` description, recursing into every child.
    pub fn from_raw(raw: &RawDomain) -> Result<Self> {
        raw.expect_tag("Tuple")?;
        let spaces = raw.items("spaces")?.iter().map(translate).collect::<Result<Vec<_>>>()?;
        Ok(Self::new(spaces))
    }

    pub fn get(&self, i: usize) -> Option<&Space> { self.spaces.get(i) }

    pub fn iter(&self) -> impl Iterator<Item = &Space> { self.spaces.iter() }

    pub fn len(&self) -> usize { self.spaces.len() }

    pub fn is_empty(&self) -> bool { self.spaces.is_empty() }

    pub fn sample(&mut self) -> Vec<Vector> {
        self.spaces.iter_mut().flat_map(Space::sample).collect()
    }

    pub fn contains(&self, items: &[Value]) -> bool {
        items.len() == self.spaces.len() && self.spaces.iter().zip(items).all(|(s, v)| s.contains(v))
    }

    pub fn low(&self) -> Vec<Vector> { self.spaces.iter().flat_map(Space::low).collect() }

    pub fn high(&self) -> Vec<Vector> { self.spaces.iter().flat_map(Space::high).collect() }

    /// Every child receives the same seed.
    pub fn seed(&mut self, seed: u64) {
        for s in &mut self.spaces {
            s.seed(seed);
        }
    }

    pub fn flat_dim(&self) -> usize { self.spaces.iter().map(Space::flat_dim).sum() }
}
