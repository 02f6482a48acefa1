use rand::{Rng, RngCore};

use super::{check_probability, is_integer, require, DiscreteDistribution, Distribution};
use super::{MomentKind, MomentSelector, Moments};
use crate::error::Result;

/// Discrete uniform distribution on the integers `min..=max`.
///
/// # Mathematical Definition
/// - PMF: 1/N for each of the N = max − min + 1 support points
/// - CDF: (⌊x⌋ − min + 1)/N inside the support
/// - Mean: (min + max)/2
/// - Variance: (N² − 1)/12
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscreteUniform {
    min: i64,
    max: i64,
}

impl DiscreteUniform {
    /// # Errors
    /// Returns `Err` if `min > max`. A single-point support is allowed.
    pub fn new(min: i64, max: i64) -> Result<Self> {
        require("DiscreteUniform", min <= max, || {
            format!("requires min ≤ max, got min={min}, max={max}")
        })?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of support points.
    pub fn count(&self) -> f64 {
        (self.max as f64 - self.min as f64) + 1.0
    }

    fn clamp_to_support(&self, k: f64) -> f64 {
        k.max(self.min as f64).min(self.max as f64)
    }
}

/// Allowance for rounding in `j/N` when compared against `p`.
///
/// Kept relative to `p`: an absolute slack grows past one support point
/// once N is large.
fn rounding_slack(p: f64) -> f64 {
    4.0 * f64::EPSILON * p
}

impl Distribution for DiscreteUniform {
    fn sample(&self, rng: &mut dyn RngCore) -> Result<f64> {
        Ok(rng.random_range(self.min..=self.max) as f64)
    }

    fn cumulative(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        let (min, max) = (self.min as f64, self.max as f64);
        Ok(if x < min {
            0.0
        } else if x >= max {
            1.0
        } else {
            (x.floor() - min + 1.0) / self.count()
        })
    }

    fn survival(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        let (min, max) = (self.min as f64, self.max as f64);
        Ok(if x < min {
            1.0
        } else if x >= max {
            0.0
        } else {
            (max - x.floor()) / self.count()
        })
    }

    /// Smallest k with F(k) ≥ p: min − 1 + ⌈pN⌉.
    fn quantile(&self, p: f64) -> Result<f64> {
        let p = check_probability("DiscreteUniform::quantile", p)?;
        let n = self.count();
        let target = p - rounding_slack(p);
        // j support points are needed; F(min − 1 + j) = j/N
        let mut j = (n * p).ceil().min(n);
        while j < n && j / n < target {
            j += 1.0;
        }
        while j > 0.0 && (j - 1.0) / n >= target {
            j -= 1.0;
        }
        Ok(self.clamp_to_support(self.min as f64 - 1.0 + j))
    }

    /// Upper-tail point: the smallest k with P(X ≥ k) ≤ p, which is
    /// `quantile(1 − p) + 1` clamped to the support.
    fn inverse_survival(&self, p: f64) -> Result<f64> {
        let p = check_probability("DiscreteUniform::inverse_survival", p)?;
        let n = self.count();
        let target = p + rounding_slack(p);
        // P(X ≥ max + 1 − j) = j/N
        let mut j = (n * p).floor().max(0.0);
        while j > 0.0 && j / n > target {
            j -= 1.0;
        }
        while j < n && (j + 1.0) / n <= target {
            j += 1.0;
        }
        Ok(self.clamp_to_support(self.max as f64 + 1.0 - j))
    }

    fn moments(&self, selector: MomentSelector) -> Moments {
        let n = self.count();
        let n2 = n * n;
        Moments::compute(selector, |kind| match kind {
            MomentKind::Mean => 0.5 * (self.min as f64 + self.max as f64),
            MomentKind::Variance => (n2 - 1.0) / 12.0,
            MomentKind::Skew if n > 1.0 => 0.0,
            MomentKind::Kurtosis if n > 1.0 => -6.0 * (n2 + 1.0) / (5.0 * (n2 - 1.0)),
            MomentKind::Skew | MomentKind::Kurtosis => f64::NAN,
        })
    }
}

impl DiscreteDistribution for DiscreteUniform {
    fn mass(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        let inside = is_integer(x) && x >= self.min as f64 && x <= self.max as f64;
        Ok(if inside { 1.0 / self.count() } else { 0.0 })
    }
}
