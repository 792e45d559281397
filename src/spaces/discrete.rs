use rand::distributions::{Distribution, Uniform};

use crate::core::{GymError, Result};
use crate::utils::rng::{RngStream, rng_from_entropy, rng_from_seed};

use super::raw::RawDomain;
use super::Vector;

/// A discrete space of integers in [0, n).
///
/// Samples and bounds are one-element vectors holding the integer as `f64`.
#[derive(Clone, Debug)]
pub struct Discrete {
    n: u32,
    rng: RngStream,
}

impl Discrete {
    pub fn new(n: u32) -> Result<Self> {
        if n == 0 {
            return Err(GymError::domain("Discrete with n > 0", "n = 0"));
        }
        Ok(Self { n, rng: rng_from_entropy() })
    }

    /// Translate a raw `Discrete` description (`n`).
    pub fn from_raw(raw: &RawDomain) -> Result<Self> {
        raw.expect_tag("Discrete")?;
        let n = raw.int("n")?;
        let n = u32::try_from(n).map_err(|_| GymError::domain("`n` in 1..=u32::MAX", format!("n = {n}")))?;
        Self::new(n)
    }

    pub fn n(&self) -> u32 { self.n }

    pub fn sample(&mut self) -> Vector {
        // Uniform over [0, n)
        if self.n == 1 { return vec![0.0]; }
        let k = Uniform::from(0..self.n).sample(&mut self.rng);
        vec![k as f64]
    }

    pub fn contains(&self, x: &[f64]) -> bool {
        match x {
            [v] => v.fract() == 0.0 && *v >= 0.0 && *v <= (self.n - 1) as f64,
            _ => false,
        }
    }

    pub fn low(&self) -> Vector { vec![0.0] }

    pub fn high(&self) -> Vector { vec![(self.n - 1) as f64] }

    pub fn seed(&mut self, seed: u64) { self.rng = rng_from_seed(seed); }
}

impl PartialEq for Discrete {
    fn eq(&self, other: &Self) -> bool { self.n == other.n }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_integral_and_in_range() {
        let mut d = Discrete::new(5).unwrap();
        d.seed(42);
        for _ in 0..100 {
            let v = d.sample();
            assert_eq!(v.len(), 1);
            assert!(d.contains(&v));
        }
    }

    #[test]
    fn n_of_one_only_contains_zero() {
        let mut d = Discrete::new(1).unwrap();
        assert_eq!(d.sample(), vec![0.0]);
        assert!(d.contains(&[0.0]));
        assert!(!d.contains(&[1.0]));
    }

    #[test]
    fn rejects_fractional_negative_and_wide_values() {
        let d = Discrete::new(3).unwrap();
        assert!(!d.contains(&[1.5]));
        assert!(!d.contains(&[-1.0]));
        assert!(!d.contains(&[3.0]));
        assert!(!d.contains(&[1.0, 2.0]));
        assert!(!d.contains(&[]));
        assert!(!d.contains(&[f64::NAN]));
    }

    #[test]
    fn bounds_span_zero_to_n_minus_one() {
        let d = Discrete::new(4).unwrap();
        assert_eq!(d.low(), vec![0.0]);
        assert_eq!(d.high(), vec![3.0]);
    }

    #[test]
    fn zero_or_negative_n_is_a_domain_mismatch() {
        assert!(matches!(Discrete::new(0), Err(GymError::DomainMismatch { .. })));
        assert!(matches!(Discrete::from_raw(&RawDomain::discrete(-2)), Err(GymError::DomainMismatch { .. })));
        assert!(matches!(Discrete::from_raw(&RawDomain::boxed(vec![0.0], vec![1.0])), Err(GymError::DomainMismatch { .. })));
    }
}
