//! Descriptive statistics with numerical stability guarantees.
//!
//! All functions in this module handle edge cases explicitly and use
//! numerically stable algorithms to avoid catastrophic cancellation.
//! Functions over samples return `None` for empty input, mismatched lengths
//! or non-finite data.
//!
//! # Algorithms
//!
//! - **Sum/Mean**: Neumaier compensated summation for O(ε) error
//!   independent of n.
//! - **Variance/StdDev**: Welford's online algorithm.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Combinatorics**: multiplicative products in `f64`, exact while the
//!   result stays below 2⁵³.

fn all_finite(data: &[f64]) -> bool {
    data.iter().all(|x| x.is_finite())
}

/// Compensated sum of the slice.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use u_statkit::stats::sum;
/// assert_eq!(sum(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(15.0));
/// ```
pub fn sum(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !all_finite(data) {
        return None;
    }
    Some(kahan_sum(data))
}

/// Product of the slice.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use u_statkit::stats::product;
/// assert_eq!(product(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(120.0));
/// ```
pub fn product(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !all_finite(data) {
        return None;
    }
    Some(data.iter().product())
}

/// Computes the arithmetic mean using compensated summation.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use u_statkit::stats::mean;
/// let v = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert!((mean(&v).unwrap() - 3.0).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    sum(data).map(|s| s / data.len() as f64)
}

/// Geometric mean `(Π xᵢ)^(1/n)`, evaluated as `exp(mean(ln xᵢ))`.
///
/// # Returns
/// - `None` if `data` is empty, contains non-finite values, or any value
///   is not strictly positive.
///
/// # Examples
/// ```
/// use u_statkit::stats::geometric_mean;
/// assert!((geometric_mean(&[1.0, 4.0]).unwrap() - 2.0).abs() < 1e-12);
/// ```
pub fn geometric_mean(data: &[f64]) -> Option<f64> {
    if data.iter().any(|&x| x <= 0.0) {
        return None;
    }
    let logs: Vec<f64> = data.iter().map(|x| x.ln()).collect();
    mean(&logs).map(f64::exp)
}

/// Sum of squares Σ xᵢ².
pub fn sum_of_squares(data: &[f64]) -> Option<f64> {
    let squares: Vec<f64> = data.iter().map(|x| x * x).collect();
    sum(&squares)
}

/// Sum of pairwise products Σ xᵢyᵢ.
///
/// # Returns
/// - `None` if the slices differ in length, are empty, or contain NaN/Inf.
///
/// # Examples
/// ```
/// use u_statkit::stats::sum_of_products;
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [10.0, 11.0, 12.0, 13.0, 14.0];
/// assert_eq!(sum_of_products(&x, &y), Some(190.0));
/// ```
pub fn sum_of_products(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() {
        return None;
    }
    let products: Vec<f64> = x.iter().zip(y).map(|(a, b)| a * b).collect();
    sum(&products)
}

/// Sum of squared errors Σ (actualᵢ − predictedᵢ)².
pub fn sum_squared_errors(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    if actual.len() != predicted.len() {
        return None;
    }
    let squares: Vec<f64> = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .collect();
    sum(&squares)
}

/// Mean squared error `SSE / n`.
///
/// # Examples
/// ```
/// use u_statkit::stats::mean_squared_error;
/// let mse = mean_squared_error(&[1.0, 2.0, 3.0], &[1.0, 2.0, 5.0]).unwrap();
/// assert!((mse - 4.0 / 3.0).abs() < 1e-15);
/// ```
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    sum_squared_errors(actual, predicted).map(|sse| sse / actual.len() as f64)
}

/// Computes the sample variance using Welford's online algorithm.
///
/// Returns the **sample** (unbiased) variance with Bessel's correction
/// (denominator `n − 1`).
///
/// # Algorithm
/// Welford's method maintains a running mean and sum of squared deviations,
/// avoiding catastrophic cancellation inherent in the naive formula
/// `Var = E[X²] − (E[X])²`.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_statkit::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 || !all_finite(data) {
        return None;
    }
    WelfordAccumulator::from_slice(data).sample_variance()
}

/// Computes the population variance (denominator `n`).
///
/// # Returns
/// - `None` if `data` is empty or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_statkit::stats::population_variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_variance(&v).unwrap() - 4.0).abs() < 1e-10);
/// ```
pub fn population_variance(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !all_finite(data) {
        return None;
    }
    WelfordAccumulator::from_slice(data).population_variance()
}

/// Sample standard deviation, `sqrt(variance(data))`.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Population standard deviation, `sqrt(population_variance(data))`.
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    population_variance(data).map(f64::sqrt)
}

fn centered_cross_sum(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.is_empty() {
        return None;
    }
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;
    let deviations: Vec<f64> = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .collect();
    Some(kahan_sum(&deviations))
}

/// Computes the sample covariance of two equal-length slices.
///
/// ```text
/// Cov(X, Y) = Σ (xᵢ − x̄)(yᵢ − ȳ) / (n − 1)
/// ```
///
/// # Returns
/// - `None` if `x.len() != y.len()`, `n < 2`, or data contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_statkit::stats::covariance;
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 6.0, 8.0, 10.0];
/// assert!((covariance(&x, &y).unwrap() - 5.0).abs() < 1e-14);
/// ```
pub fn covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 {
        return None;
    }
    centered_cross_sum(x, y).map(|s| s / (x.len() - 1) as f64)
}

/// Population covariance (denominator `n`).
///
/// # Examples
/// ```
/// use u_statkit::stats::population_covariance;
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [10.0, 11.0, 12.0, 13.0, 14.0];
/// assert!((population_covariance(&x, &y).unwrap() - 2.0).abs() < 1e-14);
/// ```
pub fn population_covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    centered_cross_sum(x, y).map(|s| s / x.len() as f64)
}

/// Pearson correlation coefficient r ∈ [−1, 1].
///
/// # Returns
/// - `None` under the same conditions as [`covariance`], or when either
///   slice has zero variance.
///
/// # Examples
/// ```
/// use u_statkit::stats::correlation;
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [10.0, 11.0, 12.0, 13.0, 14.0];
/// assert!((correlation(&x, &y).unwrap() - 1.0).abs() < 1e-12);
/// ```
pub fn correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let cov = covariance(x, y)?;
    let sx = std_dev(x)?;
    let sy = std_dev(y)?;
    if sx == 0.0 || sy == 0.0 {
        return None;
    }
    Some((cov / (sx * sy)).clamp(-1.0, 1.0))
}

// ---------------------------------------------------------------------------
// Combinatorics
// ---------------------------------------------------------------------------

/// n! as `f64`; `f64::INFINITY` once the result exceeds the `f64` range
/// (n > 170).
///
/// # Examples
/// ```
/// use u_statkit::stats::factorial;
/// assert_eq!(factorial(0), 1.0);
/// assert_eq!(factorial(10), 3628800.0);
/// ```
pub fn factorial(n: u64) -> f64 {
    if n > 170 {
        return f64::INFINITY;
    }
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// Number of ordered selections of `k` items out of `n`: n! / (n − k)!.
///
/// Returns 0 when `k > n`.
///
/// # Examples
/// ```
/// use u_statkit::stats::permutations;
/// assert_eq!(permutations(8, 5), 6720.0);
/// ```
pub fn permutations(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    (n - k + 1..=n).fold(1.0, |acc, i| acc * i as f64)
}

/// Binomial coefficient C(n, k).
///
/// # Algorithm
/// Multiplicative form over `min(k, n − k)` factors, each step producing an
/// intermediate binomial coefficient, so no factorial overflows along the
/// way. Results below 2⁵³ are exact.
///
/// Returns 0 when `k > n`.
///
/// # Examples
/// ```
/// use u_statkit::stats::combinations;
/// assert_eq!(combinations(8, 5), 56.0);
/// assert_eq!(combinations(4, 2), 6.0);
/// ```
pub fn combinations(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0_f64;
    for i in 1..=k {
        result = result * (n - k + i) as f64 / i as f64;
    }
    if result < 9_007_199_254_740_992.0 {
        result.round()
    } else {
        result
    }
}

// ---------------------------------------------------------------------------
// Kahan compensated summation
// ---------------------------------------------------------------------------

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// An improved variant of Kahan summation that also handles the case where
/// the addend is larger in magnitude than the running sum.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *ZAMM* 54(1), pp. 39–51.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Streaming accumulator for mean and variance.
///
/// # Examples
/// ```
/// use u_statkit::stats::WelfordAccumulator;
/// let mut acc = WelfordAccumulator::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.population_variance().unwrap() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    /// Creates a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    fn from_slice(data: &[f64]) -> Self {
        let mut acc = Self::new();
        for &x in data {
            acc.update(x);
        }
        acc
    }

    /// Feeds a new sample into the accumulator.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            self.mean_acc = value;
            return;
        }
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    /// Returns the number of samples seen so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the running mean, or `None` if no samples have been added.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean_acc)
    }

    /// Sample variance (n − 1 denominator); `None` below 2 samples.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Population variance (n denominator); `None` when empty.
    pub fn population_variance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.m2 / self.count as f64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const X: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
    const Y: [f64; 5] = [10.0, 11.0, 12.0, 13.0, 14.0];
    const Z: [f64; 5] = [28.8, 27.1, 42.4, 53.5, 90.0];

    fn close(actual: f64, expected: f64, tol: f64) -> bool {
        (actual - expected).abs() < tol
    }

    // --- sums and products ---

    #[test]
    fn test_sum_reference() {
        assert_eq!(sum(&X), Some(15.0));
        assert_eq!(sum(&Y), Some(60.0));
        assert!(close(sum(&Z).unwrap(), 241.8, 1e-12));
    }

    #[test]
    fn test_sum_empty_and_nan() {
        assert_eq!(sum(&[]), None);
        assert_eq!(sum(&[1.0, f64::NAN]), None);
        assert_eq!(sum(&[1.0, f64::INFINITY]), None);
    }

    #[test]
    fn test_product_reference() {
        assert_eq!(product(&X), Some(120.0));
        assert_eq!(product(&Y), Some(240240.0));
        assert_eq!(product(&[]), None);
    }

    #[test]
    fn test_sum_of_squares_reference() {
        assert_eq!(sum_of_squares(&X), Some(55.0));
        assert_eq!(sum_of_squares(&Y), Some(730.0));
        assert!(close(sum_of_squares(&Z).unwrap(), 14323.86, 1e-9));
    }

    #[test]
    fn test_sum_of_products_reference() {
        assert_eq!(sum_of_products(&X, &Y), Some(190.0));
        assert_eq!(sum_of_products(&X, &Y[..3]), None);
    }

    #[test]
    fn test_sse_and_mse() {
        let actual = [3.0, -0.5, 2.0, 7.0];
        let predicted = [2.5, 0.0, 2.0, 8.0];
        assert!(close(sum_squared_errors(&actual, &predicted).unwrap(), 1.5, 1e-15));
        assert!(close(mean_squared_error(&actual, &predicted).unwrap(), 0.375, 1e-15));
        assert_eq!(mean_squared_error(&actual, &predicted[..2]), None);
    }

    // --- means ---

    #[test]
    fn test_mean_reference() {
        assert_eq!(mean(&X), Some(3.0));
        assert_eq!(mean(&Y), Some(12.0));
        assert!(close(mean(&Z).unwrap(), 48.36, 1e-12));
    }

    #[test]
    fn test_mean_single() {
        assert_eq!(mean(&[42.0]), Some(42.0));
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_geometric_mean() {
        assert!(close(geometric_mean(&X).unwrap(), 2.605171084697352, 1e-12));
        assert_eq!(geometric_mean(&[1.0, 0.0]), None);
        assert_eq!(geometric_mean(&[-1.0, 2.0]), None);
    }

    // --- dispersion ---

    #[test]
    fn test_variance_basic() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let var = variance(&v).unwrap();
        assert!((var - 4.571428571428571).abs() < 1e-10, "variance = {var}");
    }

    #[test]
    fn test_variance_needs_two_points() {
        assert_eq!(variance(&[1.0]), None);
        assert_eq!(variance(&[]), None);
        assert_eq!(population_variance(&[1.0]), Some(0.0));
    }

    #[test]
    fn test_population_variance_reference() {
        assert!(close(population_variance(&X).unwrap(), 2.0, 1e-12));
        assert!(close(population_variance(&Z).unwrap(), 526.0824, 1e-9));
    }

    #[test]
    fn test_std_dev_reference() {
        assert!(close(population_std_dev(&X).unwrap(), 1.41421, 1e-5));
        assert!(close(population_std_dev(&Z).unwrap(), 22.93649, 1e-5));
        assert!(close(std_dev(&X).unwrap(), 1.58114, 1e-5));
        assert!(close(std_dev(&Z).unwrap(), 25.64377, 1e-5));
    }

    #[test]
    fn test_variance_large_offset() {
        let base = 1e9;
        let data: Vec<f64> = (0..5).map(|i| base + i as f64).collect();
        let var = variance(&data).unwrap();
        assert!((var - 2.5).abs() < 1e-6, "variance of offset data = {var}");
    }

    // --- covariance / correlation ---

    #[test]
    fn test_population_covariance_reference() {
        assert!(close(population_covariance(&X, &Y).unwrap(), 2.0, 1e-12));
        assert!(close(population_covariance(&Z, &Y).unwrap(), 29.76, 1e-9));
    }

    #[test]
    fn test_covariance_perfect_negative() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [10.0, 8.0, 6.0, 4.0, 2.0];
        assert!((covariance(&x, &y).unwrap() - (-5.0)).abs() < 1e-14);
    }

    #[test]
    fn test_covariance_edge_cases() {
        assert_eq!(covariance(&[1.0], &[2.0]), None);
        assert_eq!(covariance(&[1.0, 2.0], &[1.0]), None);
        assert_eq!(population_covariance(&[], &[]), None);
    }

    #[test]
    fn test_correlation_reference() {
        assert!(close(correlation(&X, &Y).unwrap(), 1.0, 1e-12));
        assert!(close(correlation(&Z, &Y).unwrap(), 0.91747, 1e-5));
    }

    #[test]
    fn test_correlation_constant_series() {
        assert_eq!(correlation(&X, &[3.0; 5]), None);
    }

    // --- combinatorics ---

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(10), 3628800.0);
        assert!(factorial(170).is_finite());
        assert_eq!(factorial(171), f64::INFINITY);
    }

    #[test]
    fn test_permutations() {
        assert_eq!(permutations(8, 5), 6720.0);
        assert_eq!(permutations(4, 2), 12.0);
        assert_eq!(permutations(4, 0), 1.0);
        assert_eq!(permutations(2, 3), 0.0);
    }

    #[test]
    fn test_combinations() {
        assert_eq!(combinations(8, 5), 56.0);
        assert_eq!(combinations(4, 2), 6.0);
        assert_eq!(combinations(10, 0), 1.0);
        assert_eq!(combinations(10, 10), 1.0);
        assert_eq!(combinations(3, 4), 0.0);
        let big = combinations(60, 30);
        assert!((big / 1.182_645_815_648_614_2e17 - 1.0).abs() < 1e-12, "C(60,30) = {big}");
    }

    // --- Kahan / Welford ---

    #[test]
    fn test_kahan_sum_precision() {
        let data = vec![1.0, 1e-16, 1e-16, 1e-16, 1e-16, 1e-16, 1e-16, 1e-16, 1e-16, 1e-16, 1e-16];
        let result = kahan_sum(&data);
        assert!((result - (1.0 + 1e-15)).abs() < 1e-15, "Kahan sum = {result}");
    }

    #[test]
    fn test_welford_empty() {
        let acc = WelfordAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.mean(), None);
        assert_eq!(acc.sample_variance(), None);
        assert_eq!(acc.population_variance(), None);
    }

    #[test]
    fn test_welford_matches_batch() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mut acc = WelfordAccumulator::new();
        for &x in &data {
            acc.update(x);
        }
        assert_eq!(acc.count(), 8);
        assert!((acc.mean().unwrap() - mean(&data).unwrap()).abs() < 1e-15);
        assert!((acc.sample_variance().unwrap() - variance(&data).unwrap()).abs() < 1e-15);
    }
}
