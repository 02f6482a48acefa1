use rand::{Rng, RngCore};

use super::{check_probability, require, ContinuousDistribution, Distribution, MomentKind};
use super::{MomentSelector, Moments};
use crate::error::Result;

/// Continuous uniform distribution on `[min, max]`.
///
/// # Mathematical Definition
/// - PDF: f(x) = 1/(max−min) for x ∈ [min, max]
/// - CDF: F(x) = (x−min)/(max−min)
/// - Mean: (min+max)/2
/// - Variance: (max−min)²/12
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    min: f64,
    max: f64,
}

impl Uniform {
    /// Creates a new uniform distribution on `[min, max]`.
    ///
    /// # Errors
    /// Returns `Err` if `min >= max` or either parameter is not finite.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        require(
            "Uniform",
            min.is_finite() && max.is_finite() && min < max,
            || format!("requires finite min < max, got min={min}, max={max}"),
        )?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    fn width(&self) -> f64 {
        self.max - self.min
    }
}

impl Distribution for Uniform {
    fn sample(&self, rng: &mut dyn RngCore) -> Result<f64> {
        let u: f64 = rng.random();
        Ok(self.min + u * self.width())
    }

    /// CDF: F(x) = (x−min)/(max−min), clamped to [0, 1].
    fn cumulative(&self, x: f64) -> Result<f64> {
        Ok(if x <= self.min {
            0.0
        } else if x >= self.max {
            1.0
        } else {
            (x - self.min) / self.width()
        })
    }

    fn survival(&self, x: f64) -> Result<f64> {
        Ok(if x <= self.min {
            1.0
        } else if x >= self.max {
            0.0
        } else {
            (self.max - x) / self.width()
        })
    }

    /// Inverse CDF: x = min + p·(max−min).
    fn quantile(&self, p: f64) -> Result<f64> {
        let p = check_probability("Uniform::quantile", p)?;
        Ok(self.min + p * self.width())
    }

    fn moments(&self, selector: MomentSelector) -> Moments {
        let width = self.width();
        Moments::compute(selector, |kind| match kind {
            MomentKind::Mean => 0.5 * (self.min + self.max),
            MomentKind::Variance => width * width / 12.0,
            MomentKind::Skew => 0.0,
            MomentKind::Kurtosis => -1.2,
        })
    }
}

impl ContinuousDistribution for Uniform {
    /// PDF: f(x) = 1/(max−min) for x ∈ [min, max], 0 otherwise.
    fn density(&self, x: f64) -> Result<f64> {
        Ok(if x >= self.min && x <= self.max {
            1.0 / self.width()
        } else {
            0.0
        })
    }
}
