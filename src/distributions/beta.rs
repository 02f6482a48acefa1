use rand::RngCore;

use super::{beta_convergence, check_probability, invert_continuous, require};
use super::{ContinuousDistribution, Distribution, MomentKind, MomentSelector, Moments};
use crate::error::Result;
use crate::{random, special};

/// Beta distribution on `[0, 1]` with shapes α and β.
///
/// # Mathematical Definition
/// - PDF: f(x) = x^(α−1) (1−x)^(β−1) / B(α, β)
/// - CDF: I_x(α, β), the regularized incomplete beta function
/// - Mean: α/(α+β)
/// - Variance: αβ / ((α+β)²(α+β+1))
///
/// Quantiles have no closed form and are found numerically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beta {
    alpha: f64,
    beta: f64,
}

impl Beta {
    /// # Errors
    /// Returns `Err` unless both shapes are finite and positive.
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        require(
            "Beta",
            alpha.is_finite() && alpha > 0.0 && beta.is_finite() && beta > 0.0,
            || format!("requires finite α > 0 and β > 0, got α={alpha}, β={beta}"),
        )?;
        Ok(Self { alpha, beta })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

/// Density limit at a support endpoint whose exponent is `shape − 1`.
fn endpoint_density(shape: f64, other: f64) -> f64 {
    if shape < 1.0 {
        f64::INFINITY
    } else if shape == 1.0 {
        // 1 / B(1, other)
        other
    } else {
        0.0
    }
}

impl Distribution for Beta {
    /// X / (X + Y) with X ~ Gamma(α), Y ~ Gamma(β).
    fn sample(&self, rng: &mut dyn RngCore) -> Result<f64> {
        let x = random::gamma_variate(rng, self.alpha)?;
        let y = random::gamma_variate(rng, self.beta)?;
        let total = x + y;
        if total == 0.0 {
            // both variates underflowed; only possible for tiny shapes
            return Ok(if self.alpha >= self.beta { 1.0 } else { 0.0 });
        }
        Ok(x / total)
    }

    fn cumulative(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x <= 0.0 {
            return Ok(0.0);
        }
        if x >= 1.0 {
            return Ok(1.0);
        }
        let conv = beta_convergence(self.alpha, self.beta);
        special::regularized_incomplete_beta_with(self.alpha, self.beta, x, &conv)
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        let p = check_probability("Beta::quantile", p)?;
        let guess = self.alpha / (self.alpha + self.beta);
        invert_continuous(self, p, guess, 0.0, 1.0)
    }

    fn moments(&self, selector: MomentSelector) -> Moments {
        let (a, b) = (self.alpha, self.beta);
        let sum = a + b;
        Moments::compute(selector, |kind| match kind {
            MomentKind::Mean => a / sum,
            MomentKind::Variance => a * b / (sum * sum * (sum + 1.0)),
            MomentKind::Skew => 2.0 * (b - a) * (sum + 1.0).sqrt() / ((sum + 2.0) * (a * b).sqrt()),
            MomentKind::Kurtosis => {
                let diff = a - b;
                6.0 * (diff * diff * (sum + 1.0) - a * b * (sum + 2.0))
                    / (a * b * (sum + 2.0) * (sum + 3.0))
            }
        })
    }
}

impl ContinuousDistribution for Beta {
    fn density(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if !(0.0..=1.0).contains(&x) {
            return Ok(0.0);
        }
        if x == 0.0 {
            return Ok(endpoint_density(self.alpha, self.beta));
        }
        if x == 1.0 {
            return Ok(endpoint_density(self.beta, self.alpha));
        }
        let ln_f = (self.alpha - 1.0) * x.ln() + (self.beta - 1.0) * (-x).ln_1p()
            - special::ln_beta(self.alpha, self.beta);
        Ok(ln_f.exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beta_uniform_case() {
        let b = Beta::new(1.0, 1.0).unwrap();
        for &x in &[0.0, 0.2, 0.5, 0.9, 1.0] {
            assert!((b.density(x).unwrap() - 1.0).abs() < 1e-12);
            assert!((b.cumulative(x).unwrap() - x).abs() < 1e-6);
        }
    }

    #[test]
    fn test_beta_known_values() {
        // Beta(2, 3): f(x) = 12 x (1−x)², F(0.5) = 11/16
        let b = Beta::new(2.0, 3.0).unwrap();
        assert!((b.density(0.5).unwrap() - 1.5).abs() < 1e-12);
        assert!((b.cumulative(0.5).unwrap() - 0.6875).abs() < 1e-6);
        assert_eq!(b.density(0.0).unwrap(), 0.0);
        assert_eq!(b.density(1.5).unwrap(), 0.0);
    }

    #[test]
    fn test_beta_endpoint_densities() {
        let b = Beta::new(0.5, 1.0).unwrap();
        assert_eq!(b.density(0.0).unwrap(), f64::INFINITY);
        assert!((b.density(1.0).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_beta_quantile_symmetric() {
        let b = Beta::new(3.0, 3.0).unwrap();
        assert!((b.quantile(0.5).unwrap() - 0.5).abs() < 1e-6);
        let lo = b.quantile(0.1).unwrap();
        let hi = b.quantile(0.9).unwrap();
        assert!((lo + hi - 1.0).abs() < 1e-5);
        assert_eq!(b.quantile(0.0).unwrap(), 0.0);
        assert_eq!(b.quantile(1.0).unwrap(), 1.0);
    }

    #[test]
    fn test_beta_large_shapes() {
        let b = Beta::new(1e5, 1e5).unwrap();
        assert!((b.cumulative(0.5).unwrap() - 0.5).abs() < 1e-8);
        let f = b.cumulative(0.499).unwrap();
        assert!((f - 0.185_546_744_557_556_75).abs() < 1e-8, "F(0.499) = {f}");
        assert!((b.quantile(0.5).unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_beta_moments() {
        let m = Beta::new(2.0, 5.0).unwrap().moments(MomentSelector::ALL);
        assert!((m.mean().unwrap() - 2.0 / 7.0).abs() < 1e-12);
        assert!((m.variance().unwrap() - 10.0 / 392.0).abs() < 1e-12);
        assert!((m.skew().unwrap() - 0.596_284_793_999_944).abs() < 1e-12);
        assert!((m.kurtosis().unwrap() + 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_beta_invalid() {
        assert!(Beta::new(0.0, 1.0).is_err());
        assert!(Beta::new(1.0, -2.0).is_err());
        assert!(Beta::new(f64::NAN, 1.0).is_err());
    }
}
