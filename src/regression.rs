//! Two-variable least-squares regression.
//!
//! Every model is a straight-line fit after transforming one or both
//! variables:
//!
//! | Model | Fitted line | Prediction |
//! |---|---|---|
//! | [`LinearRegression`] | y = a + b·x | α + βx |
//! | [`ExponentialRegression`] | ln y = a + b·x | α·β^x, α = eᵃ, β = eᵇ |
//! | [`LogarithmicRegression`] | y = a + b·ln x | α + β·ln x |
//! | [`PowerRegression`] | ln y = a + b·ln x | α·x^β, α = eᵃ |
//!
//! The slope is `cov(x, y) / var(x)` and the intercept `ȳ − slope·x̄`,
//! both on the transformed data. [`RegressionModel::correlation`] is the
//! Pearson r of the transformed data, or NaN when the transformed response
//! is constant.

use crate::error::{Result, StatsError};
use crate::stats;

/// A fitted two-parameter model.
pub trait RegressionModel {
    /// Predicted response at `x`.
    fn predict(&self, x: f64) -> f64;

    /// First model parameter (intercept or multiplier).
    fn alpha(&self) -> f64;

    /// Second model parameter (slope, base or exponent).
    fn beta(&self) -> f64;

    /// Pearson correlation of the linearized data.
    fn correlation(&self) -> f64;
}

/// Intercept, slope and correlation of an ordinary least-squares line.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LineFit {
    intercept: f64,
    slope: f64,
    r: f64,
}

fn fit_line(x: &[f64], y: &[f64]) -> Result<LineFit> {
    if x.len() != y.len() {
        return Err(StatsError::invalid_argument(
            "y",
            format!("length {} does not match x length {}", y.len(), x.len()),
        ));
    }
    if x.len() < 2 {
        return Err(StatsError::invalid_argument(
            "x",
            format!("regression needs at least 2 points, got {}", x.len()),
        ));
    }
    let non_finite = || StatsError::invalid_argument("data", "contains NaN or infinite values");
    let var_x = stats::variance(x).ok_or_else(non_finite)?;
    if var_x == 0.0 {
        return Err(StatsError::invalid_argument("x", "all x values are identical"));
    }
    let cov = stats::covariance(x, y).ok_or_else(non_finite)?;
    let mean_x = stats::mean(x).ok_or_else(non_finite)?;
    let mean_y = stats::mean(y).ok_or_else(non_finite)?;

    let slope = cov / var_x;
    Ok(LineFit {
        intercept: mean_y - slope * mean_x,
        slope,
        r: stats::correlation(x, y).unwrap_or(f64::NAN),
    })
}

/// Natural logs of strictly positive data.
fn ln_positive(function: &'static str, argument: &'static str, data: &[f64]) -> Result<Vec<f64>> {
    data.iter()
        .map(|&v| {
            if v > 0.0 {
                Ok(v.ln())
            } else {
                Err(StatsError::domain(function, argument, v))
            }
        })
        .collect()
}

// ============================================================================
// Linear
// ============================================================================

/// Ordinary least squares: y = α + βx.
///
/// # Examples
/// ```
/// use u_statkit::regression::{LinearRegression, RegressionModel};
/// let fit = LinearRegression::fit(&[1.0, 2.0, 3.0], &[3.0, 5.0, 7.0]).unwrap();
/// assert!((fit.alpha() - 1.0).abs() < 1e-12);
/// assert!((fit.beta() - 2.0).abs() < 1e-12);
/// assert!((fit.predict(10.0) - 21.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression {
    line: LineFit,
}

impl LinearRegression {
    /// # Errors
    /// [`StatsError::InvalidArgument`] for mismatched lengths, fewer than two
    /// points, non-finite data or constant `x`.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        Ok(Self {
            line: fit_line(x, y)?,
        })
    }
}

impl RegressionModel for LinearRegression {
    fn predict(&self, x: f64) -> f64 {
        self.line.intercept + self.line.slope * x
    }

    fn alpha(&self) -> f64 {
        self.line.intercept
    }

    fn beta(&self) -> f64 {
        self.line.slope
    }

    fn correlation(&self) -> f64 {
        self.line.r
    }
}

// ============================================================================
// Exponential
// ============================================================================

/// y = α·β^x, fitted as a line through (x, ln y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialRegression {
    alpha: f64,
    beta: f64,
    r: f64,
}

impl ExponentialRegression {
    /// # Errors
    /// As [`LinearRegression::fit`], plus [`StatsError::Domain`] if any `y`
    /// is not positive.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        let ln_y = ln_positive("ExponentialRegression::fit", "y", y)?;
        let line = fit_line(x, &ln_y)?;
        Ok(Self {
            alpha: line.intercept.exp(),
            beta: line.slope.exp(),
            r: line.r,
        })
    }
}

impl RegressionModel for ExponentialRegression {
    fn predict(&self, x: f64) -> f64 {
        self.alpha * self.beta.powf(x)
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn beta(&self) -> f64 {
        self.beta
    }

    fn correlation(&self) -> f64 {
        self.r
    }
}

// ============================================================================
// Logarithmic
// ============================================================================

/// y = α + β·ln x, fitted as a line through (ln x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogarithmicRegression {
    line: LineFit,
}

impl LogarithmicRegression {
    /// # Errors
    /// As [`LinearRegression::fit`], plus [`StatsError::Domain`] if any `x`
    /// is not positive.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        let ln_x = ln_positive("LogarithmicRegression::fit", "x", x)?;
        Ok(Self {
            line: fit_line(&ln_x, y)?,
        })
    }
}

impl RegressionModel for LogarithmicRegression {
    fn predict(&self, x: f64) -> f64 {
        self.line.intercept + self.line.slope * x.ln()
    }

    fn alpha(&self) -> f64 {
        self.line.intercept
    }

    fn beta(&self) -> f64 {
        self.line.slope
    }

    fn correlation(&self) -> f64 {
        self.line.r
    }
}

// ============================================================================
// Power
// ============================================================================

/// y = α·x^β, fitted as a line through (ln x, ln y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerRegression {
    alpha: f64,
    beta: f64,
    r: f64,
}

impl PowerRegression {
    /// # Errors
    /// As [`LinearRegression::fit`], plus [`StatsError::Domain`] if any `x`
    /// or `y` is not positive.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        let ln_x = ln_positive("PowerRegression::fit", "x", x)?;
        let ln_y = ln_positive("PowerRegression::fit", "y", y)?;
        let line = fit_line(&ln_x, &ln_y)?;
        Ok(Self {
            alpha: line.intercept.exp(),
            beta: line.slope,
            r: line.r,
        })
    }
}

impl RegressionModel for PowerRegression {
    fn predict(&self, x: f64) -> f64 {
        self.alpha * x.powf(self.beta)
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn beta(&self) -> f64 {
        self.beta
    }

    fn correlation(&self) -> f64 {
        self.r
    }
}
