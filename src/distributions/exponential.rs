use rand::RngCore;

use super::{check_probability, require, ContinuousDistribution, Distribution};
use super::{MomentKind, MomentSelector, Moments};
use crate::error::Result;
use crate::random;

/// Exponential distribution with rate λ.
///
/// # Mathematical Definition
/// - PDF: f(x) = λ exp(−λx) for x ≥ 0
/// - CDF: F(x) = 1 − exp(−λx)
/// - Quantile: −ln(1−p)/λ
/// - Mean: 1/λ
/// - Variance: 1/λ²
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    rate: f64,
}

impl Exponential {
    /// # Errors
    /// Returns `Err` unless `rate` is finite and positive.
    pub fn new(rate: f64) -> Result<Self> {
        require("Exponential", rate.is_finite() && rate > 0.0, || {
            format!("requires finite λ > 0, got λ={rate}")
        })?;
        Ok(Self { rate })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Distribution for Exponential {
    fn sample(&self, rng: &mut dyn RngCore) -> Result<f64> {
        Ok(random::standard_exponential(rng) / self.rate)
    }

    fn cumulative(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x <= 0.0 {
            return Ok(0.0);
        }
        Ok(-(-self.rate * x).exp_m1())
    }

    fn survival(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x <= 0.0 {
            return Ok(1.0);
        }
        Ok((-self.rate * x).exp())
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        let p = check_probability("Exponential::quantile", p)?;
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok(-(-p).ln_1p() / self.rate)
    }

    /// −ln(p)/λ, without the cancellation in `1 − p`.
    fn inverse_survival(&self, p: f64) -> Result<f64> {
        let p = check_probability("Exponential::inverse_survival", p)?;
        Ok(-p.ln() / self.rate)
    }

    fn moments(&self, selector: MomentSelector) -> Moments {
        Moments::compute(selector, |kind| match kind {
            MomentKind::Mean => 1.0 / self.rate,
            MomentKind::Variance => 1.0 / (self.rate * self.rate),
            MomentKind::Skew => 2.0,
            MomentKind::Kurtosis => 6.0,
        })
    }
}

impl ContinuousDistribution for Exponential {
    fn density(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x < 0.0 {
            return Ok(0.0);
        }
        Ok(self.rate * (-self.rate * x).exp())
    }
}
