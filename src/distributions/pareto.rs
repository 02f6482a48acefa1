use rand::RngCore;

use super::{check_probability, require, ContinuousDistribution, Distribution};
use super::{MomentKind, MomentSelector, Moments};
use crate::error::Result;
use crate::random;

/// Pareto (type I) distribution with scale xₘ and shape α.
///
/// # Mathematical Definition
/// - PDF: α xₘ^α / x^(α+1) for x ≥ xₘ
/// - CDF: 1 − (xₘ/x)^α
/// - Quantile: xₘ / (1−p)^(1/α)
///
/// The mean is infinite for α ≤ 1 and the variance for α ≤ 2. Skew needs
/// α > 3 and kurtosis α > 4; otherwise they are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pareto {
    minimum: f64,
    alpha: f64,
}

impl Pareto {
    /// # Errors
    /// Returns `Err` unless `minimum` and `alpha` are finite and positive.
    pub fn new(minimum: f64, alpha: f64) -> Result<Self> {
        require(
            "Pareto",
            minimum.is_finite() && minimum > 0.0 && alpha.is_finite() && alpha > 0.0,
            || format!("requires finite xₘ > 0 and α > 0, got xₘ={minimum}, α={alpha}"),
        )?;
        Ok(Self { minimum, alpha })
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Distribution for Pareto {
    /// Inverse transform: xₘ / U^(1/α).
    fn sample(&self, rng: &mut dyn RngCore) -> Result<f64> {
        Ok(self.minimum / random::open_unit(rng).powf(1.0 / self.alpha))
    }

    fn cumulative(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x <= self.minimum {
            return Ok(0.0);
        }
        Ok(1.0 - (self.minimum / x).powf(self.alpha))
    }

    fn survival(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x <= self.minimum {
            return Ok(1.0);
        }
        Ok((self.minimum / x).powf(self.alpha))
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        let p = check_probability("Pareto::quantile", p)?;
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok(self.minimum / (1.0 - p).powf(1.0 / self.alpha))
    }

    fn inverse_survival(&self, p: f64) -> Result<f64> {
        let p = check_probability("Pareto::inverse_survival", p)?;
        Ok(self.minimum / p.powf(1.0 / self.alpha))
    }

    fn moments(&self, selector: MomentSelector) -> Moments {
        let (m, a) = (self.minimum, self.alpha);
        Moments::compute(selector, |kind| match kind {
            MomentKind::Mean if a > 1.0 => a * m / (a - 1.0),
            MomentKind::Mean => f64::INFINITY,
            MomentKind::Variance if a > 2.0 => m * m * a / ((a - 1.0) * (a - 1.0) * (a - 2.0)),
            MomentKind::Variance => f64::INFINITY,
            MomentKind::Skew if a > 3.0 => (2.0 + 2.0 * a) / (a - 3.0) * ((a - 2.0) / a).sqrt(),
            MomentKind::Kurtosis if a > 4.0 => {
                6.0 * (a * a * a + a * a - 6.0 * a - 2.0) / (a * (a - 3.0) * (a - 4.0))
            }
            MomentKind::Skew | MomentKind::Kurtosis => f64::NAN,
        })
    }
}

impl ContinuousDistribution for Pareto {
    fn density(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x < self.minimum {
            return Ok(0.0);
        }
        Ok(self.alpha * (self.minimum / x).powf(self.alpha) / x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pareto_values() {
        let d = Pareto::new(2.0, 3.0).unwrap();
        assert_eq!(d.cumulative(1.0).unwrap(), 0.0);
        assert!((d.cumulative(4.0).unwrap() - 0.875).abs() < 1e-12);
        assert!((d.survival(4.0).unwrap() - 0.125).abs() < 1e-12);
        // 3 · 8 / 4⁴
        assert!((d.density(4.0).unwrap() - 0.093_75).abs() < 1e-12);
        assert!((d.density(2.0).unwrap() - 1.5).abs() < 1e-12);
        assert_eq!(d.density(1.9).unwrap(), 0.0);
    }

    #[test]
    fn test_pareto_quantile() {
        let d = Pareto::new(2.0, 3.0).unwrap();
        assert!((d.quantile(0.875).unwrap() - 4.0).abs() < 1e-12);
        assert_eq!(d.quantile(0.0).unwrap(), 2.0);
        assert_eq!(d.quantile(1.0).unwrap(), f64::INFINITY);
        assert!((d.inverse_survival(0.125).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_pareto_moment_domains() {
        let m = Pareto::new(1.0, 5.0).unwrap().moments(MomentSelector::ALL);
        assert!((m.mean().unwrap() - 1.25).abs() < 1e-12);
        assert!((m.variance().unwrap() - 5.0 / 48.0).abs() < 1e-12);
        assert!((m.skew().unwrap() - 6.0 * 0.6_f64.sqrt()).abs() < 1e-12);
        assert!((m.kurtosis().unwrap() - 70.8).abs() < 1e-9);

        let m = Pareto::new(1.0, 2.0).unwrap().moments(MomentSelector::ALL);
        assert_eq!(m.mean(), Some(2.0));
        assert_eq!(m.variance(), Some(f64::INFINITY));
        assert!(m.skew().unwrap().is_nan());
        assert!(m.kurtosis().unwrap().is_nan());

        let m = Pareto::new(1.0, 0.5).unwrap().moments(MomentSelector::MEAN_VARIANCE);
        assert_eq!(m.mean(), Some(f64::INFINITY));
    }

    #[test]
    fn test_pareto_invalid() {
        assert!(Pareto::new(0.0, 1.0).is_err());
        assert!(Pareto::new(1.0, 0.0).is_err());
        assert!(Pareto::new(-1.0, 2.0).is_err());
    }
}
