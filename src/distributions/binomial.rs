use rand::{Rng, RngCore};

use super::{check_probability, invert_discrete, is_integer, ln_choose, require};
use super::{DiscreteDistribution, Distribution, MomentKind, MomentSelector, Moments};
use crate::error::Result;
use crate::stats;

/// Largest trial count whose binomial coefficients stay finite in f64.
const EXACT_TRIALS: u64 = 1000;

/// Binomial distribution: successes in `n` independent trials, each
/// succeeding with probability `p`.
///
/// # Mathematical Definition
/// - PMF: C(n, k) p^k (1−p)^(n−k) for k = 0..=n
/// - Mean: np
/// - Variance: np(1−p)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    p: f64,
    trials: u64,
}

impl Binomial {
    /// # Errors
    /// Returns `Err` unless `p ∈ [0, 1]`.
    pub fn new(p: f64, trials: u64) -> Result<Self> {
        require("Binomial", (0.0..=1.0).contains(&p), || {
            format!("requires p in [0, 1], got p={p}")
        })?;
        Ok(Self { p, trials })
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    fn mass_at(&self, k: u64) -> f64 {
        let (n, p) = (self.trials, self.p);
        if k > n {
            return 0.0;
        }
        if p == 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        if p == 1.0 {
            return if k == n { 1.0 } else { 0.0 };
        }
        let (successes, failures) = (k as f64, (n - k) as f64);
        if n <= EXACT_TRIALS {
            stats::combinations(n, k) * p.powf(successes) * (1.0 - p).powf(failures)
        } else {
            (ln_choose(n, k) + successes * p.ln() + failures * (-p).ln_1p()).exp()
        }
    }
}

impl Distribution for Binomial {
    /// Counts successes over `n` Bernoulli trials.
    fn sample(&self, rng: &mut dyn RngCore) -> Result<f64> {
        let successes = (0..self.trials)
            .filter(|_| rng.random::<f64>() < self.p)
            .count();
        Ok(successes as f64)
    }

    fn cumulative(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x < 0.0 {
            return Ok(0.0);
        }
        if x >= self.trials as f64 {
            return Ok(1.0);
        }
        let last = x.floor() as u64;
        let total: f64 = (0..=last).map(|k| self.mass_at(k)).sum();
        Ok(total.min(1.0))
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        let p = check_probability("Binomial::quantile", p)?;
        invert_discrete(self, p, 0.0, self.trials as f64)
    }

    fn moments(&self, selector: MomentSelector) -> Moments {
        let (n, p) = (self.trials as f64, self.p);
        let variance = n * p * (1.0 - p);
        Moments::compute(selector, |kind| match kind {
            MomentKind::Mean => n * p,
            MomentKind::Variance => variance,
            MomentKind::Skew => (1.0 - 2.0 * p) / variance.sqrt(),
            MomentKind::Kurtosis => (1.0 - 6.0 * p * (1.0 - p)) / variance,
        })
    }
}

impl DiscreteDistribution for Binomial {
    fn mass(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if !is_integer(x) || x < 0.0 || x > self.trials as f64 {
            return Ok(0.0);
        }
        Ok(self.mass_at(x as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_binomial_fair_coin() {
        let d = Binomial::new(0.5, 5).unwrap();
        assert_eq!(d.mass(2.0).unwrap(), 0.3125);
        assert!((d.cumulative(2.0).unwrap() - 0.5).abs() < 1e-12);
        assert!((d.survival(2.0).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(d.quantile(0.5).unwrap(), 2.0);
        assert_eq!(d.inverse_survival(0.5).unwrap(), 2.0);
    }

    #[test]
    fn test_binomial_moments() {
        let m = Binomial::new(0.5, 5).unwrap().moments(MomentSelector::ALL);
        assert_eq!(m.mean(), Some(2.5));
        assert_eq!(m.variance(), Some(1.25));
        assert_eq!(m.skew(), Some(0.0));
        assert!((m.kurtosis().unwrap() + 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_binomial_mass_off_support() {
        let d = Binomial::new(0.3, 4).unwrap();
        assert_eq!(d.mass(-1.0).unwrap(), 0.0);
        assert_eq!(d.mass(5.0).unwrap(), 0.0);
        assert_eq!(d.mass(1.5).unwrap(), 0.0);
    }

    #[test]
    fn test_binomial_degenerate_p() {
        let never = Binomial::new(0.0, 7).unwrap();
        assert_eq!(never.mass(0.0).unwrap(), 1.0);
        assert_eq!(never.quantile(0.9).unwrap(), 0.0);
        let always = Binomial::new(1.0, 7).unwrap();
        assert_eq!(always.mass(7.0).unwrap(), 1.0);
        assert_eq!(always.cumulative(6.0).unwrap(), 0.0);
        assert_eq!(always.quantile(0.1).unwrap(), 7.0);
    }

    #[test]
    fn test_binomial_large_n_uses_log_space() {
        let d = Binomial::new(0.5, 2000).unwrap();
        let total: f64 = (0..=2000).map(|k| d.mass(k as f64).unwrap()).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!((d.cumulative(1000.0).unwrap() - 0.508_919_505_572_927_2).abs() < 1e-9);
    }

    #[test]
    fn test_binomial_sampling_bounds() {
        let d = Binomial::new(0.7, 10).unwrap();
        let mut rng = create_rng(3);
        for _ in 0..200 {
            let x = d.sample(&mut rng).unwrap();
            assert!((0.0..=10.0).contains(&x) && is_integer(x));
        }
    }

    #[test]
    fn test_binomial_invalid() {
        assert!(Binomial::new(-0.1, 3).is_err());
        assert!(Binomial::new(1.1, 3).is_err());
        assert!(Binomial::new(f64::NAN, 3).is_err());
    }
}
