use rand::RngCore;

use super::{check_probability, invert_continuous, require, ContinuousDistribution, Distribution};
use super::{MomentKind, MomentSelector, Moments};
use crate::error::Result;
use crate::{random, special};

/// Normal (Gaussian) distribution N(μ, σ²), parameterized by its variance.
///
/// # Mathematical Definition
/// - PDF: φ(x) = (1/(σ√(2π))) exp(−(x−μ)²/(2σ²))
/// - CDF: Φ((x−μ)/σ) (via standard normal CDF)
/// - Mean: μ
/// - Variance: σ²
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mu: f64,
    variance: f64,
    sigma: f64,
}

impl Normal {
    /// Creates a new normal distribution N(μ, σ²).
    ///
    /// # Errors
    /// Returns `Err` if `variance ≤ 0` or parameters are not finite.
    pub fn new(mu: f64, variance: f64) -> Result<Self> {
        require(
            "Normal",
            mu.is_finite() && variance.is_finite() && variance > 0.0,
            || format!("requires finite μ and σ² > 0, got μ={mu}, σ²={variance}"),
        )?;
        Ok(Self {
            mu,
            variance,
            sigma: variance.sqrt(),
        })
    }

    /// The standard normal N(0, 1).
    pub fn standard() -> Self {
        Self {
            mu: 0.0,
            variance: 1.0,
            sigma: 1.0,
        }
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    fn standardize(&self, x: f64) -> f64 {
        (x - self.mu) / self.sigma
    }
}

impl Distribution for Normal {
    fn sample(&self, rng: &mut dyn RngCore) -> Result<f64> {
        Ok(self.mu + self.sigma * random::standard_normal(rng))
    }

    /// CDF: Φ((x−μ)/σ).
    fn cumulative(&self, x: f64) -> Result<f64> {
        Ok(special::standard_normal_cdf(self.standardize(x)))
    }

    /// Upper tail Φ(−z), accurate far past the mean.
    fn survival(&self, x: f64) -> Result<f64> {
        Ok(special::standard_normal_cdf(-self.standardize(x)))
    }

    /// Inverse CDF, refined from the rational approximation μ + σ·Φ⁻¹(p).
    fn quantile(&self, p: f64) -> Result<f64> {
        let p = check_probability("Normal::quantile", p)?;
        let guess = self.mu + self.sigma * special::inverse_normal_cdf(p);
        invert_continuous(self, p, guess, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn moments(&self, selector: MomentSelector) -> Moments {
        Moments::compute(selector, |kind| match kind {
            MomentKind::Mean => self.mu,
            MomentKind::Variance => self.variance,
            MomentKind::Skew | MomentKind::Kurtosis => 0.0,
        })
    }
}

impl ContinuousDistribution for Normal {
    /// PDF: (1/(σ√(2π))) exp(−(x−μ)²/(2σ²)).
    fn density(&self, x: f64) -> Result<f64> {
        Ok(special::standard_normal_pdf(self.standardize(x)) / self.sigma)
    }
}
