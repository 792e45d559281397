use rand::distributions::{Distribution, Uniform};

use crate::core::{GymError, Result};
use crate::utils::rng::{RngStream, rng_from_entropy, rng_from_seed};

use super::raw::{RawAttr, RawDomain};
use super::Vector;

/// A closed, half-open or unbounded real interval.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(GymError::domain("interval bounds that are not NaN", format!("[{min}, {max}]")));
        }
        if min > max {
            return Err(GymError::domain("min <= max", format!("[{min}, {max}]")));
        }
        Ok(Self { min, max })
    }

    pub fn is_bounded_below(&self) -> bool { self.min.is_finite() }
    pub fn is_bounded_above(&self) -> bool { self.max.is_finite() }

    pub fn contains(&self, x: f64) -> bool { self.min <= x && x <= self.max }

    pub fn clamp(&self, x: f64) -> f64 { x.max(self.min).min(self.max) }
}

/// A (possibly unbounded) box in R^n: the Cartesian product of n intervals.
///
/// Each dimension is one of `[a, b]`, `(-inf, b]`, `[a, inf)` or
/// `(-inf, inf)`. Sampling draws uniformly per dimension and therefore
/// requires every interval to be finite.
#[derive(Clone, Debug)]
pub struct BoxSpace {
    bounds: Vec<Interval>,
    rng: RngStream,
}

impl BoxSpace {
    /// Build a box from per-dimension lower and upper bounds.
    pub fn new(low: Vector, high: Vector) -> Result<Self> {
        if low.len() != high.len() {
            return Err(GymError::domain(
                format!("{} upper bounds", low.len()),
                format!("{} upper bounds", high.len()),
            ));
        }
        let bounds = low
            .into_iter()
            .zip(high)
            .map(|(l, h)| Interval::new(l, h))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_intervals(bounds))
    }

    /// A box with the same interval `[low, high]` in every dimension.
    pub fn uniform(dim: usize, low: f64, high: f64) -> Result<Self> {
        Self::new(vec![low; dim], vec![high; dim])
    }

    pub fn from_intervals(bounds: Vec<Interval>) -> Self {
        Self { bounds, rng: rng_from_entropy() }
    }

    /// Translate a raw `Box` description (`low`, `high`, optional `shape`).
    pub fn from_raw(raw: &RawDomain) -> Result<Self> {
        raw.expect_tag("Box")?;
        let low = raw.floats("low")?.to_vec();
        let high = raw.floats("high")?.to_vec();
        if let Some(shape) = raw.attr("shape") {
            let RawAttr::Ints(dims) = shape else {
                return Err(GymError::domain("`shape` as an int list", shape.kind()));
            };
            if dims.iter().any(|&d| d < 0) {
                return Err(GymError::domain("non-negative shape", format!("{dims:?}")));
            }
            let size = dims
                .iter()
                .try_fold(1usize, |acc, &d| usize::try_from(d).ok().and_then(|d| acc.checked_mul(d)))
                .ok_or_else(|| GymError::domain("a shape whose size fits in usize", format!("{dims:?}")))?;
            if size != low.len() {
                return Err(GymError::domain(
                    format!("{size} bounds for shape {dims:?}"),
                    format!("{} bounds", low.len()),
                ));
            }
        }
        Self::new(low, high)
    }

    pub fn dim(&self) -> usize { self.bounds.len() }

    pub fn intervals(&self) -> &[Interval] { &self.bounds }

    pub fn low(&self) -> Vector { self.bounds.iter().map(|b| b.min).collect() }

    pub fn high(&self) -> Vector { self.bounds.iter().map(|b| b.max).collect() }

    pub fn bounded_below(&self) -> Vec<bool> { self.bounds.iter().map(Interval::is_bounded_below).collect() }

    pub fn bounded_above(&self) -> Vec<bool> { self.bounds.iter().map(Interval::is_bounded_above).collect() }

    /// Whether every dimension has finite bounds on both sides.
    pub fn is_bounded(&self) -> bool {
        self.bounds.iter().all(|b| b.is_bounded_below() && b.is_bounded_above())
    }

    pub fn sample(&mut self) -> Vector {
        // Interpolate with u ~ Uniform[0, 1]; max - min may overflow f64.
        let unit = Uniform::new_inclusive(0.0, 1.0);
        let rng = &mut self.rng;
        self.bounds
            .iter()
            .map(|b| {
                let u: f64 = unit.sample(rng);
                b.clamp(b.min * (1.0 - u) + b.max * u)
            })
            .collect()
    }

    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.bounds.len() && self.bounds.iter().zip(x).all(|(b, &v)| b.contains(v))
    }

    /// Component-wise clamp of `x` into the box.
    pub fn clip(&self, x: &[f64]) -> Result<Vector> {
        if x.len() != self.bounds.len() {
            return Err(GymError::ShapeMismatch(format!(
                "Box of dim {} cannot clip {} values",
                self.bounds.len(),
                x.len()
            )));
        }
        Ok(self.bounds.iter().zip(x).map(|(b, &v)| b.clamp(v)).collect())
    }

    pub fn seed(&mut self, seed: u64) { self.rng = rng_from_seed(seed); }
}

// Sampler state is not part of a space's identity.
impl PartialEq for BoxSpace {
    fn eq(&self, other: &Self) -> bool { self.bounds == other.bounds }
}
