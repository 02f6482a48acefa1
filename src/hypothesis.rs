//! Classical hypothesis tests built on the distribution layer.
//!
//! # T-Tests
//!
//! - **One-sample**: t = (x̄ − μ₀) / (s / √n), df = n − 1.
//! - **Two-sample (Welch)**: t = (x̄₁ − x̄₂) / √(s₁²/n₁ + s₂²/n₂), with the
//!   Welch–Satterthwaite degrees of freedom
//!   ```text
//!   df = (s₁²/n₁ + s₂²/n₂)² / [(s₁²/n₁)²/(n₁−1) + (s₂²/n₂)²/(n₂−1)]
//!   ```
//! - **Paired**: one-sample test of the pairwise differences against 0.
//!
//! T-test p-values are two-sided, `2·P(T > |t|)`.
//!
//! # Chi-Square Goodness of Fit
//!
//! χ² = Σ (oᵢ − eᵢ)² / eᵢ with an upper-tail p-value.

use crate::distributions::{ChiSquare, Distribution, StudentsT};
use crate::error::{Result, StatsError};
use crate::stats;

/// Statistic, its null distribution's CDF at the statistic, and p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    pub statistic: f64,
    pub degrees_of_freedom: f64,
    /// P(T ≤ statistic) under the null hypothesis.
    pub cumulative: f64,
    pub p_value: f64,
}

struct SampleSummary {
    n: f64,
    mean: f64,
    variance: f64,
}

fn summarize(argument: &'static str, sample: &[f64]) -> Result<SampleSummary> {
    if sample.len() < 2 {
        return Err(StatsError::invalid_argument(
            argument,
            format!("t-test requires at least 2 observations, got {}", sample.len()),
        ));
    }
    let non_finite = || StatsError::invalid_argument(argument, "contains NaN or infinite values");
    Ok(SampleSummary {
        n: sample.len() as f64,
        mean: stats::mean(sample).ok_or_else(non_finite)?,
        variance: stats::variance(sample).ok_or_else(non_finite)?,
    })
}

fn two_sided_t(statistic: f64, degrees_of_freedom: f64) -> Result<TestOutcome> {
    let dist = StudentsT::new(degrees_of_freedom)?;
    let cumulative = dist.cumulative(statistic)?;
    let p_value = (2.0 * dist.survival(statistic.abs())?).min(1.0);
    Ok(TestOutcome {
        statistic,
        degrees_of_freedom,
        cumulative,
        p_value,
    })
}

/// Tests whether the sample mean differs from `hypothesized_mean`.
///
/// # Errors
/// [`StatsError::InvalidArgument`] for fewer than two observations,
/// non-finite data or a constant sample.
///
/// # Examples
/// ```
/// use u_statkit::hypothesis::one_sample_t_test;
/// let outcome = one_sample_t_test(&[5.1, 4.9, 5.6, 5.8, 6.0, 5.3, 4.7, 5.5], 5.0).unwrap();
/// assert_eq!(outcome.degrees_of_freedom, 7.0);
/// assert!(outcome.p_value > 0.05 && outcome.p_value < 0.06);
/// ```
pub fn one_sample_t_test(sample: &[f64], hypothesized_mean: f64) -> Result<TestOutcome> {
    let summary = summarize("sample", sample)?;
    if summary.variance == 0.0 {
        return Err(StatsError::invalid_argument("sample", "all observations are identical"));
    }
    let standard_error = (summary.variance / summary.n).sqrt();
    let t = (summary.mean - hypothesized_mean) / standard_error;
    two_sided_t(t, summary.n - 1.0)
}

/// Welch's t-test for two independent samples with possibly unequal
/// variances.
///
/// # Errors
/// [`StatsError::InvalidArgument`] if either sample has fewer than two
/// observations or non-finite data, or both samples are constant.
pub fn two_sample_t_test(a: &[f64], b: &[f64]) -> Result<TestOutcome> {
    let sa = summarize("a", a)?;
    let sb = summarize("b", b)?;
    let va = sa.variance / sa.n;
    let vb = sb.variance / sb.n;
    let pooled = va + vb;
    if pooled == 0.0 {
        return Err(StatsError::invalid_argument("a", "both samples are constant"));
    }
    let t = (sa.mean - sb.mean) / pooled.sqrt();
    let df = pooled * pooled / (va * va / (sa.n - 1.0) + vb * vb / (sb.n - 1.0));
    two_sided_t(t, df)
}

/// Paired t-test: a one-sample test of `a[i] − b[i]` against
/// `hypothesized_difference` (0 for "no change").
///
/// # Errors
/// [`StatsError::InvalidArgument`] if the samples differ in length, plus
/// the conditions of [`one_sample_t_test`].
pub fn paired_t_test(a: &[f64], b: &[f64], hypothesized_difference: f64) -> Result<TestOutcome> {
    if a.len() != b.len() {
        return Err(StatsError::invalid_argument(
            "b",
            format!("length {} does not match a length {}", b.len(), a.len()),
        ));
    }
    let differences: Vec<f64> = a.iter().zip(b).map(|(x, y)| x - y).collect();
    one_sample_t_test(&differences, hypothesized_difference)
}

/// Pearson's chi-square goodness-of-fit test with `k − 1` degrees of
/// freedom.
///
/// # Errors
/// [`StatsError::InvalidArgument`] for mismatched lengths, fewer than two
/// categories or a non-positive expected count.
///
/// # Examples
/// ```
/// use u_statkit::hypothesis::chi_square_test;
/// let outcome = chi_square_test(&[18.0, 22.0, 29.0, 31.0], &[25.0; 4]).unwrap();
/// assert!((outcome.statistic - 4.4).abs() < 1e-12);
/// assert!((outcome.p_value - 0.221_385_387).abs() < 1e-6);
/// ```
pub fn chi_square_test(observed: &[f64], expected: &[f64]) -> Result<TestOutcome> {
    let categories = observed.len() as f64;
    chi_square_test_with_dof(observed, expected, categories - 1.0)
}

/// [`chi_square_test`] with explicit degrees of freedom, for fits whose
/// expected counts came from estimated parameters.
///
/// # Errors
/// As [`chi_square_test`], plus [`StatsError::InvalidParameters`] when
/// `degrees_of_freedom` is not positive.
pub fn chi_square_test_with_dof(
    observed: &[f64],
    expected: &[f64],
    degrees_of_freedom: f64,
) -> Result<TestOutcome> {
    if observed.len() != expected.len() {
        return Err(StatsError::invalid_argument(
            "expected",
            format!(
                "length {} does not match observed length {}",
                expected.len(),
                observed.len()
            ),
        ));
    }
    if observed.len() < 2 {
        return Err(StatsError::invalid_argument(
            "observed",
            "chi-square test requires at least 2 categories",
        ));
    }
    if let Some(&bad) = expected.iter().find(|&&e| !(e.is_finite() && e > 0.0)) {
        return Err(StatsError::invalid_argument(
            "expected",
            format!("expected counts must be finite and positive, found {bad}"),
        ));
    }
    if !observed.iter().all(|o| o.is_finite()) {
        return Err(StatsError::invalid_argument("observed", "contains NaN or infinite values"));
    }

    let terms: Vec<f64> = observed
        .iter()
        .zip(expected)
        .map(|(o, e)| (o - e) * (o - e) / e)
        .collect();
    let statistic = stats::kahan_sum(&terms);

    let dist = ChiSquare::new(degrees_of_freedom)?;
    Ok(TestOutcome {
        statistic,
        degrees_of_freedom,
        cumulative: dist.cumulative(statistic)?,
        p_value: dist.survival(statistic)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_one_sample_t() {
        let sample = [5.1, 4.9, 5.6, 5.8, 6.0, 5.3, 4.7, 5.5];
        let out = one_sample_t_test(&sample, 5.0).unwrap();
        assert_close(out.statistic, 2.293_675_494_561_534_7, 1e-12);
        assert_eq!(out.degrees_of_freedom, 7.0);
        assert_close(out.cumulative, 0.972_246_986_475_451_8, 1e-6);
        assert_close(out.p_value, 0.055_506_027_049_096_47, 1e-6);
    }

    #[test]
    fn test_welch_t() {
        let a = [19.1, 21.4, 18.7, 22.3, 20.5, 19.9, 21.0];
        let b = [17.2, 18.9, 16.5, 19.4, 18.1, 17.7];
        let out = two_sample_t_test(&a, &b).unwrap();
        assert_close(out.statistic, 3.753_084_788_947_025, 1e-10);
        assert_close(out.degrees_of_freedom, 10.999_412_826_569_381, 1e-9);
        assert_close(out.p_value, 0.003_193_061_361_899_802, 1e-6);
    }

    #[test]
    fn test_paired_t() {
        let before = [72.0, 68.0, 75.0, 80.0, 64.0, 70.0];
        let after = [70.0, 66.0, 74.0, 76.0, 65.0, 67.0];
        let out = paired_t_test(&before, &after, 0.0).unwrap();
        assert_close(out.statistic, 2.607_250_047_269_874_7, 1e-12);
        assert_eq!(out.degrees_of_freedom, 5.0);
        assert_close(out.cumulative, 0.976_085_785_201_850_4, 1e-6);
        assert_close(out.p_value, 0.047_828_429_596_299_2, 1e-6);
    }

    #[test]
    fn test_paired_t_against_nonzero_difference() {
        let before = [72.0, 68.0, 75.0, 80.0, 64.0, 70.0];
        let after = [70.0, 66.0, 74.0, 76.0, 65.0, 67.0];
        let out = paired_t_test(&before, &after, 1.0).unwrap();
        assert_close(out.statistic, 1.185_113_657_849_942_8, 1e-12);
        assert_close(out.cumulative, 0.855_387_705_431_104_5, 1e-6);
        assert_close(out.p_value, 0.289_224_589_137_790_9, 1e-6);
    }

    #[test]
    fn test_t_p_value_symmetric_in_sign() {
        let sample = [1.2, 0.8, 1.9, 1.4, 0.6];
        let up = one_sample_t_test(&sample, 0.5).unwrap();
        let shifted: Vec<f64> = sample.iter().map(|x| -x).collect();
        let down = one_sample_t_test(&shifted, -0.5).unwrap();
        assert_close(up.statistic, -down.statistic, 1e-12);
        assert_close(up.p_value, down.p_value, 1e-12);
        assert_close(up.cumulative + down.cumulative, 1.0, 1e-12);
    }

    #[test]
    fn test_chi_square() {
        let out = chi_square_test(&[18.0, 22.0, 29.0, 31.0], &[25.0; 4]).unwrap();
        assert_close(out.statistic, 4.4, 1e-12);
        assert_eq!(out.degrees_of_freedom, 3.0);
        assert_close(out.cumulative, 0.778_614_612_810_511_9, 1e-9);
        assert_close(out.p_value, 0.221_385_387_189_488_1, 1e-9);
    }

    #[test]
    fn test_chi_square_perfect_fit() {
        let out = chi_square_test(&[10.0, 20.0, 30.0], &[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(out.statistic, 0.0);
        assert_eq!(out.p_value, 1.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            one_sample_t_test(&[1.0], 0.0),
            Err(StatsError::InvalidArgument { argument: "sample", .. })
        ));
        assert!(one_sample_t_test(&[2.0, 2.0, 2.0], 0.0).is_err());
        assert!(two_sample_t_test(&[1.0, 2.0], &[3.0]).is_err());
        assert!(paired_t_test(&[1.0, 2.0], &[1.0], 0.0).is_err());
        assert!(chi_square_test(&[1.0, 2.0], &[1.0]).is_err());
        assert!(chi_square_test(&[1.0, 2.0], &[1.0, 0.0]).is_err());
        assert!(chi_square_test(&[1.0], &[1.0]).is_err());
        assert!(chi_square_test_with_dof(&[1.0, 2.0], &[1.5, 1.5], 0.0).is_err());
    }
}
