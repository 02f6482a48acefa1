use rand::RngCore;

use super::{check_probability, invert_discrete, is_integer, require};
use super::{DiscreteDistribution, Distribution, MomentKind, MomentSelector, Moments};
use crate::error::{Result, StatsError};
use crate::{random, special};

/// Poisson distribution with rate λ.
///
/// # Mathematical Definition
/// - PMF: λ^k e^(−λ) / k! for k = 0, 1, 2, …
/// - Mean: λ
/// - Variance: λ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Poisson {
    lambda: f64,
}

impl Poisson {
    /// # Errors
    /// Returns `Err` unless `lambda` is finite and positive.
    pub fn new(lambda: f64) -> Result<Self> {
        require("Poisson", lambda.is_finite() && lambda > 0.0, || {
            format!("requires finite λ > 0, got λ={lambda}")
        })?;
        Ok(Self { lambda })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// PMF in log space, so e^(−λ) never underflows on its own.
    fn mass_at(&self, k: f64) -> f64 {
        (k * self.lambda.ln() - self.lambda - special::ln_gamma(k + 1.0)).exp()
    }

    /// Arrivals allowed before the sampler gives up; the expected count
    /// is λ + 1.
    fn max_arrivals(&self) -> usize {
        (1000.0 + 20.0 * self.lambda).min(usize::MAX as f64) as usize
    }
}

impl Distribution for Poisson {
    /// Knuth's multiplication method, run as a sum of unit exponentials so
    /// the running product cannot underflow for large λ.
    fn sample(&self, rng: &mut dyn RngCore) -> Result<f64> {
        let limit = self.max_arrivals();
        let mut elapsed = 0.0;
        for count in 0..limit {
            elapsed += random::standard_exponential(rng);
            if elapsed > self.lambda {
                return Ok(count as f64);
            }
        }
        tracing::debug!(lambda = self.lambda, limit, "poisson sampler gave up");
        Err(StatsError::NonConvergence {
            function: "Poisson::sample",
            iterations: limit,
        })
    }

    fn cumulative(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x < 0.0 {
            return Ok(0.0);
        }
        if x == f64::INFINITY {
            return Ok(1.0);
        }
        let last = x.floor();
        let mut total = 0.0;
        let mut k = 0.0;
        while k <= last {
            let term = self.mass_at(k);
            total += term;
            // past the mode the terms only shrink
            if k > self.lambda && term < f64::EPSILON * 1e-3 * total {
                break;
            }
            k += 1.0;
        }
        Ok(total.min(1.0))
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        let p = check_probability("Poisson::quantile", p)?;
        invert_discrete(self, p, 0.0, f64::INFINITY)
    }

    fn moments(&self, selector: MomentSelector) -> Moments {
        let lambda = self.lambda;
        Moments::compute(selector, |kind| match kind {
            MomentKind::Mean | MomentKind::Variance => lambda,
            MomentKind::Skew => 1.0 / lambda.sqrt(),
            MomentKind::Kurtosis => 1.0 / lambda,
        })
    }
}

impl DiscreteDistribution for Poisson {
    fn mass(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if !is_integer(x) || x < 0.0 {
            return Ok(0.0);
        }
        Ok(self.mass_at(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_poisson_reference_values() {
        let d = Poisson::new(5.0).unwrap();
        assert!((d.mass(5.0).unwrap() - 0.175_467_369_767_850_5).abs() < 1e-12);
        assert!((d.cumulative(5.0).unwrap() - 0.615_960_654_833_063_3).abs() < 1e-12);
        assert!((d.survival(5.0).unwrap() - 0.384_039_345_166_936_7).abs() < 1e-12);
        assert_eq!(d.quantile(0.5).unwrap(), 5.0);
    }

    #[test]
    fn test_poisson_moments() {
        let m = Poisson::new(5.0).unwrap().moments(MomentSelector::ALL);
        assert_eq!(m.mean(), Some(5.0));
        assert_eq!(m.variance(), Some(5.0));
        assert!((m.skew().unwrap() - 0.447_213_595_499_957_9).abs() < 1e-12);
        assert!((m.kurtosis().unwrap() - 0.2).abs() < 1e-15);
    }

    #[test]
    fn test_poisson_large_lambda_mass() {
        // e^(−1000) underflows; the log-space mass does not.
        let d = Poisson::new(1000.0).unwrap();
        let at_mode = d.mass(1000.0).unwrap();
        assert!((at_mode - 0.012_614_611_348_721_62).abs() < 1e-10, "{at_mode}");
        assert!((d.cumulative(1e9).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_poisson_mass_off_support() {
        let d = Poisson::new(2.0).unwrap();
        assert_eq!(d.mass(-1.0).unwrap(), 0.0);
        assert_eq!(d.mass(2.5).unwrap(), 0.0);
        assert_eq!(d.cumulative(-0.5).unwrap(), 0.0);
        assert_eq!(d.cumulative(f64::INFINITY).unwrap(), 1.0);
    }

    #[test]
    fn test_poisson_sample_large_lambda() {
        let d = Poisson::new(800.0).unwrap();
        let mut rng = create_rng(21);
        let draws: Vec<f64> = (0..200).map(|_| d.sample(&mut rng).unwrap()).collect();
        let mean = crate::stats::mean(&draws).unwrap();
        assert!((mean - 800.0).abs() < 10.0, "mean = {mean}");
    }

    #[test]
    fn test_poisson_invalid() {
        assert!(Poisson::new(0.0).is_err());
        assert!(Poisson::new(-2.0).is_err());
        assert!(Poisson::new(f64::INFINITY).is_err());
    }
}
