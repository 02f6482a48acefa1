use rand::RngCore;

use super::{require, ContinuousDistribution, Distribution, Gamma};
use super::{MomentKind, MomentSelector, Moments};
use crate::error::Result;

/// Chi-square distribution with k degrees of freedom, i.e. Gamma(k/2, 2).
///
/// Every operation except the moment formulas delegates to the equivalent
/// [`Gamma`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquare {
    dof: f64,
    gamma: Gamma,
}

impl ChiSquare {
    /// # Errors
    /// Returns `Err` unless `dof` is finite and positive.
    pub fn new(dof: f64) -> Result<Self> {
        require("ChiSquare", dof.is_finite() && dof > 0.0, || {
            format!("requires finite k > 0, got k={dof}")
        })?;
        Ok(Self {
            dof,
            gamma: Gamma::new(0.5 * dof, 2.0)?,
        })
    }

    pub fn degrees_of_freedom(&self) -> f64 {
        self.dof
    }
}

impl Distribution for ChiSquare {
    fn sample(&self, rng: &mut dyn RngCore) -> Result<f64> {
        self.gamma.sample(rng)
    }

    fn cumulative(&self, x: f64) -> Result<f64> {
        self.gamma.cumulative(x)
    }

    fn survival(&self, x: f64) -> Result<f64> {
        self.gamma.survival(x)
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        self.gamma.quantile(p)
    }

    fn moments(&self, selector: MomentSelector) -> Moments {
        let k = self.dof;
        Moments::compute(selector, |kind| match kind {
            MomentKind::Mean => k,
            MomentKind::Variance => 2.0 * k,
            MomentKind::Skew => (8.0 / k).sqrt(),
            MomentKind::Kurtosis => 12.0 / k,
        })
    }
}

impl ContinuousDistribution for ChiSquare {
    fn density(&self, x: f64) -> Result<f64> {
        self.gamma.density(x)
    }
}
