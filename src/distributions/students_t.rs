use rand::RngCore;

use super::{beta_convergence, check_probability, invert_continuous, require};
use super::{ContinuousDistribution, Distribution, MomentKind, MomentSelector, Moments};
use crate::error::Result;
use crate::{random, special};

/// Student's t-distribution with ν degrees of freedom (ν need not be an
/// integer).
///
/// # Mathematical Definition
/// - PDF: Γ((ν+1)/2) / (√(νπ) Γ(ν/2)) · (1 + t²/ν)^(−(ν+1)/2)
/// - CDF: for t > 0, 1 − ½ I_{ν/(ν+t²)}(ν/2, ½); mirrored for t < 0
///
/// Moments exist only for enough degrees of freedom: the mean needs ν > 1,
/// the variance ν > 2 (and is infinite for 1 < ν ≤ 2), skew ν > 3 and
/// kurtosis ν > 4. Missing moments are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentsT {
    dof: f64,
}

impl StudentsT {
    /// # Errors
    /// Returns `Err` unless `dof` is finite and positive.
    pub fn new(dof: f64) -> Result<Self> {
        require("StudentsT", dof.is_finite() && dof > 0.0, || {
            format!("requires finite ν > 0, got ν={dof}")
        })?;
        Ok(Self { dof })
    }

    pub fn degrees_of_freedom(&self) -> f64 {
        self.dof
    }
}

impl Distribution for StudentsT {
    /// Z / √(V/ν) with Z standard normal and V ~ χ²(ν).
    fn sample(&self, rng: &mut dyn RngCore) -> Result<f64> {
        let z = random::standard_normal(rng);
        let v = 2.0 * random::gamma_variate(rng, 0.5 * self.dof)?;
        Ok(z / (v / self.dof).sqrt())
    }

    fn cumulative(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x == 0.0 {
            return Ok(0.5);
        }
        if x.is_infinite() {
            return Ok(if x > 0.0 { 1.0 } else { 0.0 });
        }
        let nu = self.dof;
        let u = nu / (nu + x * x);
        let conv = beta_convergence(0.5 * nu, 0.5);
        let tail = 0.5 * special::regularized_incomplete_beta_with(0.5 * nu, 0.5, u, &conv)?;
        Ok(if x > 0.0 { 1.0 - tail } else { tail })
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        let p = check_probability("StudentsT::quantile", p)?;
        if p == 0.5 {
            return Ok(0.0);
        }
        let guess = special::inverse_normal_cdf(p);
        invert_continuous(self, p, guess, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn moments(&self, selector: MomentSelector) -> Moments {
        let nu = self.dof;
        Moments::compute(selector, |kind| match kind {
            MomentKind::Mean if nu > 1.0 => 0.0,
            MomentKind::Variance if nu > 2.0 => nu / (nu - 2.0),
            MomentKind::Variance if nu > 1.0 => f64::INFINITY,
            MomentKind::Skew if nu > 3.0 => 0.0,
            MomentKind::Kurtosis if nu > 4.0 => 6.0 / (nu - 4.0),
            _ => f64::NAN,
        })
    }
}

impl ContinuousDistribution for StudentsT {
    fn density(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        let nu = self.dof;
        let ln_norm = special::ln_gamma(0.5 * (nu + 1.0))
            - special::ln_gamma(0.5 * nu)
            - 0.5 * (nu * std::f64::consts::PI).ln();
        Ok((ln_norm - 0.5 * (nu + 1.0) * (x * x / nu).ln_1p()).exp())
    }
}
