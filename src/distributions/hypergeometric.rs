use rand::{Rng, RngCore};

use super::{check_probability, invert_discrete, is_integer, ln_choose, require};
use super::{DiscreteDistribution, Distribution, MomentKind, MomentSelector, Moments};
use crate::error::Result;
use crate::stats;

/// Population size up to which binomial coefficients are evaluated exactly.
const EXACT_POPULATION: u64 = 1000;

/// Hypergeometric distribution: successes among `draws` items taken without
/// replacement from a population of `population` items, `successes` of
/// which count as successes.
///
/// # Mathematical Definition
/// - PMF: C(m, k) C(L−m, n−k) / C(L, n)
/// - Support: max(0, n+m−L) ..= min(n, m)
/// - Mean: nm/L
/// - Variance: n (m/L) ((L−m)/L) ((L−n)/(L−1))
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hypergeometric {
    population: u64,
    successes: u64,
    draws: u64,
}

impl Hypergeometric {
    /// # Errors
    /// Returns `Err` if the population is empty or `successes` or `draws`
    /// exceed it.
    pub fn new(population: u64, successes: u64, draws: u64) -> Result<Self> {
        require(
            "Hypergeometric",
            population > 0 && successes <= population && draws <= population,
            || {
                format!(
                    "requires 0 < L, m ≤ L and n ≤ L, \
                     got L={population}, m={successes}, n={draws}"
                )
            },
        )?;
        Ok(Self {
            population,
            successes,
            draws,
        })
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Smallest and largest attainable success counts.
    pub fn support(&self) -> (u64, u64) {
        let failures = self.population - self.successes;
        (
            self.draws.saturating_sub(failures),
            self.draws.min(self.successes),
        )
    }

    fn mass_at(&self, k: u64) -> f64 {
        let (lo, hi) = self.support();
        if k < lo || k > hi {
            return 0.0;
        }
        let (l, m, n) = (self.population, self.successes, self.draws);
        if l <= EXACT_POPULATION {
            let ways = stats::combinations(m, k) * stats::combinations(l - m, n - k);
            ways / stats::combinations(l, n)
        } else {
            (ln_choose(m, k) + ln_choose(l - m, n - k) - ln_choose(l, n)).exp()
        }
    }
}

impl Distribution for Hypergeometric {
    /// Sequential draws without replacement.
    fn sample(&self, rng: &mut dyn RngCore) -> Result<f64> {
        let mut remaining = self.population as f64;
        let mut remaining_successes = self.successes as f64;
        let mut drawn = 0u64;
        for _ in 0..self.draws {
            if rng.random::<f64>() < remaining_successes / remaining {
                remaining_successes -= 1.0;
                drawn += 1;
            }
            remaining -= 1.0;
        }
        Ok(drawn as f64)
    }

    fn cumulative(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        let (lo, hi) = self.support();
        if x < lo as f64 {
            return Ok(0.0);
        }
        if x >= hi as f64 {
            return Ok(1.0);
        }
        let last = x.floor() as u64;
        let total: f64 = (lo..=last).map(|k| self.mass_at(k)).sum();
        Ok(total.min(1.0))
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        let p = check_probability("Hypergeometric::quantile", p)?;
        let (lo, hi) = self.support();
        invert_discrete(self, p, lo as f64, hi as f64)
    }

    fn moments(&self, selector: MomentSelector) -> Moments {
        let l = self.population as f64;
        let m = self.successes as f64;
        let n = self.draws as f64;
        let spread = n * m * (l - m) * (l - n);
        Moments::compute(selector, |kind| match kind {
            MomentKind::Mean => n * m / l,
            // drawing the whole population leaves nothing random
            MomentKind::Variance if l == 1.0 || l == n => 0.0,
            MomentKind::Variance => n * (m / l) * ((l - m) / l) * ((l - n) / (l - 1.0)),
            MomentKind::Skew => {
                (l - 2.0 * m) * (l - 1.0).sqrt() * (l - 2.0 * n) / (spread.sqrt() * (l - 2.0))
            }
            MomentKind::Kurtosis => {
                let leading = (l - 1.0)
                    * l
                    * l
                    * (l * (l + 1.0) - 6.0 * m * (l - m) - 6.0 * n * (l - n));
                (leading + 6.0 * spread * (5.0 * l - 6.0)) / (spread * (l - 2.0) * (l - 3.0))
            }
        })
    }
}

impl DiscreteDistribution for Hypergeometric {
    fn mass(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if !is_integer(x) || x < 0.0 {
            return Ok(0.0);
        }
        Ok(self.mass_at(x as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hypergeometric_reference_values() {
        let d = Hypergeometric::new(10, 5, 5).unwrap();
        assert!((d.mass(2.0).unwrap() - 100.0 / 252.0).abs() < 1e-12);
        assert!((d.cumulative(2.0).unwrap() - 0.5).abs() < 1e-12);
        assert!((d.survival(2.0).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(d.quantile(0.5).unwrap(), 2.0);
        assert_eq!(d.inverse_survival(0.5).unwrap(), 2.0);
    }

    #[test]
    fn test_hypergeometric_moments() {
        let m = Hypergeometric::new(10, 5, 5).unwrap().moments(MomentSelector::ALL);
        assert!((m.mean().unwrap() - 2.5).abs() < 1e-12);
        assert!((m.variance().unwrap() - 25.0 / 36.0).abs() < 1e-12);
        assert!(m.skew().unwrap().abs() < 1e-12);
        // Matches Σ (k − μ)⁴ f(k) / σ⁴ − 3 = −6/35.
        assert!((m.kurtosis().unwrap() + 6.0 / 35.0).abs() < 1e-12);
    }

    #[test]
    fn test_hypergeometric_kurtosis_matches_direct_sum() {
        let d = Hypergeometric::new(30, 12, 8).unwrap();
        let (lo, hi) = d.support();
        let mean = d.moments(MomentSelector::only(MomentKind::Mean)).mean().unwrap();
        let (mut m2, mut m4) = (0.0, 0.0);
        for k in lo..=hi {
            let f = d.mass(k as f64).unwrap();
            let dev = k as f64 - mean;
            m2 += dev * dev * f;
            m4 += dev * dev * dev * dev * f;
        }
        let m = d.moments(MomentSelector::ALL);
        assert!((m.variance().unwrap() - m2).abs() < 1e-10);
        assert!((m.kurtosis().unwrap() - (m4 / (m2 * m2) - 3.0)).abs() < 1e-10);
    }

    #[test]
    fn test_hypergeometric_support() {
        // 8 draws from 10 items with 3 failures forces at least 5 successes.
        let d = Hypergeometric::new(10, 7, 8).unwrap();
        assert_eq!(d.support(), (5, 7));
        assert_eq!(d.mass(4.0).unwrap(), 0.0);
        assert_eq!(d.cumulative(4.9).unwrap(), 0.0);
        assert_eq!(d.quantile(0.0).unwrap(), 5.0);
        let total: f64 = (5..=7).map(|k| d.mass(k as f64).unwrap()).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hypergeometric_degenerate_variance() {
        for (l, m, n) in [(1, 1, 1), (1, 0, 1), (1, 0, 0), (6, 2, 6)] {
            let d = Hypergeometric::new(l, m, n).unwrap();
            let moments = d.moments(MomentSelector::MEAN_VARIANCE);
            assert_eq!(moments.variance(), Some(0.0), "L={l}, m={m}, n={n}");
            let (lo, hi) = d.support();
            assert_eq!(lo, hi);
            assert_eq!(moments.mean(), Some(lo as f64));
        }
    }

    #[test]
    fn test_hypergeometric_large_population() {
        let d = Hypergeometric::new(5000, 1200, 300).unwrap();
        let (lo, hi) = d.support();
        let total: f64 = (lo..=hi).map(|k| d.mass(k as f64).unwrap()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_hypergeometric_sampling_respects_support() {
        let d = Hypergeometric::new(10, 7, 8).unwrap();
        let mut rng = crate::random::create_rng(8);
        for _ in 0..300 {
            let x = d.sample(&mut rng).unwrap();
            assert!((5.0..=7.0).contains(&x));
        }
    }

    #[test]
    fn test_hypergeometric_invalid() {
        assert!(Hypergeometric::new(0, 0, 0).is_err());
        assert!(Hypergeometric::new(10, 11, 2).is_err());
        assert!(Hypergeometric::new(10, 2, 11).is_err());
    }
}
