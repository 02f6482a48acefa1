//! Probability distributions.
//!
//! Every distribution is an immutable value type validated at construction
//! and implementing the object-safe [`Distribution`] contract, plus
//! [`ContinuousDistribution`] or [`DiscreteDistribution`].
//!
//! # Supported Distributions
//!
//! | Distribution | Parameters | Mean | Variance |
//! |---|---|---|---|
//! | [`Uniform`] | min, max | (a+b)/2 | (b−a)²/12 |
//! | [`Normal`] | μ, σ² | μ | σ² |
//! | [`Exponential`] | λ | 1/λ | 1/λ² |
//! | [`Gamma`] | k, θ | kθ | kθ² |
//! | [`Beta`] | α, β | α/(α+β) | αβ/((α+β)²(α+β+1)) |
//! | [`ChiSquare`] | k | k | 2k |
//! | [`StudentsT`] | ν | 0 (ν>1) | ν/(ν−2) (ν>2) |
//! | [`Pareto`] | xₘ, α | αxₘ/(α−1) (α>1) | see docs |
//! | [`DiscreteUniform`] | a, b | (a+b)/2 | ((b−a+1)²−1)/12 |
//! | [`Binomial`] | p, n | np | np(1−p) |
//! | [`Poisson`] | λ | λ | λ |
//! | [`Hypergeometric`] | L, m, n | nm/L | see docs |
//!
//! # Quantiles
//!
//! Closed forms are used where they exist. Otherwise continuous quantiles
//! are found by safeguarded Newton iteration on `cumulative` inside an
//! expanding bracket, and discrete quantiles by integer bisection for the
//! smallest `k` with `cumulative(k) ≥ p`.

mod beta;
mod binomial;
mod chi_square;
mod discrete_uniform;
mod exponential;
mod gamma;
mod hypergeometric;
pub mod moments;
mod normal;
mod pareto;
mod poisson;
mod students_t;
mod uniform;

pub use beta::Beta;
pub use binomial::Binomial;
pub use chi_square::ChiSquare;
pub use discrete_uniform::DiscreteUniform;
pub use exponential::Exponential;
pub use gamma::Gamma;
pub use hypergeometric::Hypergeometric;
pub use moments::{MomentKind, MomentSelector, Moments};
pub use normal::Normal;
pub use pareto::Pareto;
pub use poisson::Poisson;
pub use students_t::StudentsT;
pub use uniform::Uniform;

use rand::RngCore;

use crate::error::{Result, StatsError};
use crate::special::{self, Convergence};

/// Operations shared by every distribution.
///
/// The trait is object safe, so heterogeneous collections of
/// `Box<dyn Distribution>` work.
///
/// # Examples
/// ```
/// use u_statkit::distributions::{Binomial, Distribution, Poisson};
/// use u_statkit::random::create_rng;
///
/// let dists: Vec<Box<dyn Distribution>> = vec![
///     Box::new(Binomial::new(0.5, 5).unwrap()),
///     Box::new(Poisson::new(5.0).unwrap()),
/// ];
/// let mut rng = create_rng(42);
/// for d in &dists {
///     let x = d.sample(&mut rng).unwrap();
///     assert!(x >= 0.0);
///     let total = d.cumulative(x).unwrap() + d.survival(x).unwrap();
///     assert!((total - 1.0).abs() < 1e-12);
/// }
/// ```
pub trait Distribution {
    /// Draws one variate from `rng`.
    fn sample(&self, rng: &mut dyn RngCore) -> Result<f64>;

    /// P(X ≤ x).
    fn cumulative(&self, x: f64) -> Result<f64>;

    /// P(X > x) = 1 − P(X ≤ x).
    fn survival(&self, x: f64) -> Result<f64> {
        Ok(1.0 - self.cumulative(x)?)
    }

    /// Inverse of [`cumulative`](Distribution::cumulative).
    ///
    /// # Errors
    /// [`StatsError::Domain`] if `p` is NaN or outside `[0, 1]`.
    fn quantile(&self, p: f64) -> Result<f64>;

    /// Inverse of [`survival`](Distribution::survival): `quantile(1 − p)`.
    fn inverse_survival(&self, p: f64) -> Result<f64> {
        let p = check_probability("inverse_survival", p)?;
        self.quantile(1.0 - p)
    }

    /// Closed-form moments for the kinds in `selector`.
    fn moments(&self, selector: MomentSelector) -> Moments;
}

/// A distribution with a density.
pub trait ContinuousDistribution: Distribution {
    /// Probability density at `x`; 0 outside the support.
    fn density(&self, x: f64) -> Result<f64>;
}

/// A distribution on the integers.
pub trait DiscreteDistribution: Distribution {
    /// P(X = x); 0 for non-integer `x` and outside the support.
    fn mass(&self, x: f64) -> Result<f64>;
}

/// Validates a probability argument.
pub(crate) fn check_probability(function: &'static str, p: f64) -> Result<f64> {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return Err(StatsError::domain(function, "p", p));
    }
    Ok(p)
}

/// Shared validation message for constructors.
pub(crate) fn require(
    distribution: &'static str,
    condition: bool,
    reason: impl FnOnce() -> String,
) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(StatsError::invalid_parameters(distribution, reason()))
    }
}

// ============================================================================
// Numeric inversion
// ============================================================================

const NEWTON_MAX_ITER: usize = 100;
const MAX_BRACKET_EXPANSIONS: usize = 1100;

/// Solves `cumulative(x) = p` on the support `[lower, upper]`.
///
/// # Algorithm
/// 1. Expand a bracket outward from `guess` by doubling steps until the CDF
///    straddles `p` (finite support bounds are used as-is).
/// 2. Newton steps using the density, falling back to bisection whenever a
///    step leaves the bracket or the density is unusable.
///
/// Ends when the CDF matches `p` to a few ulps, or the bracket or Newton
/// step falls below 1e-12 relative.
pub(crate) fn invert_continuous<D>(
    dist: &D,
    p: f64,
    guess: f64,
    lower: f64,
    upper: f64,
) -> Result<f64>
where
    D: ContinuousDistribution + ?Sized,
{
    if p <= 0.0 {
        return Ok(lower);
    }
    if p >= 1.0 {
        return Ok(upper);
    }

    let guess = if guess.is_finite() {
        guess
    } else if lower.is_finite() && upper.is_finite() {
        0.5 * (lower + upper)
    } else if lower.is_finite() {
        lower + 1.0
    } else if upper.is_finite() {
        upper - 1.0
    } else {
        0.0
    };
    let (mut lo, mut hi) = bracket(dist, p, guess, lower, upper)?;

    let mut x = guess.max(lo).min(hi);
    for _ in 0..NEWTON_MAX_ITER {
        let f = dist.cumulative(x)? - p;
        if f.abs() <= 4.0 * f64::EPSILON * p {
            return Ok(x);
        }
        if f < 0.0 {
            lo = x;
        } else {
            hi = x;
        }
        let scale = x.abs().max(1e-100);
        if hi - lo <= 1e-12 * scale {
            return Ok(0.5 * (lo + hi));
        }

        let slope = dist.density(x)?;
        let next = x - f / slope;
        if slope.is_finite() && slope > 0.0 && next > lo && next < hi {
            if (next - x).abs() <= 1e-12 * scale {
                return Ok(next);
            }
            x = next;
        } else {
            x = 0.5 * (lo + hi);
        }
    }

    tracing::debug!(p, x, lo, hi, "quantile inversion used its full Newton budget");
    Ok(x)
}

fn bracket<D>(dist: &D, p: f64, guess: f64, lower: f64, upper: f64) -> Result<(f64, f64)>
where
    D: ContinuousDistribution + ?Sized,
{
    let base = guess.abs().max(1.0);

    let lo = if lower.is_finite() {
        lower
    } else {
        let start = guess.min(upper);
        let mut step = base;
        let mut lo = start - step;
        let mut expansions = 0;
        while dist.cumulative(lo)? > p {
            expansions += 1;
            if expansions > MAX_BRACKET_EXPANSIONS {
                return Err(StatsError::NonConvergence {
                    function: "quantile bracket",
                    iterations: MAX_BRACKET_EXPANSIONS,
                });
            }
            step *= 2.0;
            lo = start - step;
        }
        lo
    };

    let hi = if upper.is_finite() {
        upper
    } else {
        let mut step = base;
        let mut hi = guess.max(lo) + step;
        let mut expansions = 0;
        while dist.cumulative(hi)? < p {
            expansions += 1;
            if expansions > MAX_BRACKET_EXPANSIONS {
                return Err(StatsError::NonConvergence {
                    function: "quantile bracket",
                    iterations: MAX_BRACKET_EXPANSIONS,
                });
            }
            step *= 2.0;
            hi = guess.max(lo) + step;
        }
        hi
    };

    Ok((lo, hi))
}

/// Slack allowed when comparing a summed discrete CDF against `p`.
const DISCRETE_CDF_SLACK: f64 = 1e-12;
const MAX_DOUBLINGS: usize = 64;

/// Smallest integer `k` in `[lower, upper]` with `cumulative(k) ≥ p`.
///
/// `upper` may be `f64::INFINITY` for unbounded supports, in which case
/// the bracket grows by doubling before the integer bisection.
pub(crate) fn invert_discrete<D>(dist: &D, p: f64, lower: f64, upper: f64) -> Result<f64>
where
    D: DiscreteDistribution + ?Sized,
{
    if p <= 0.0 {
        return Ok(lower);
    }
    if p >= 1.0 {
        return Ok(upper);
    }
    let target = p - DISCRETE_CDF_SLACK;
    if dist.cumulative(lower)? >= target {
        return Ok(lower);
    }

    // cumulative(lo) < target ≤ cumulative(hi)
    let mut lo = lower;
    let mut hi = lower + 1.0;
    let mut step = 1.0;
    let mut doublings = 0;
    while hi < upper && dist.cumulative(hi)? < target {
        doublings += 1;
        if doublings > MAX_DOUBLINGS {
            return Err(StatsError::NonConvergence {
                function: "discrete quantile search",
                iterations: MAX_DOUBLINGS,
            });
        }
        lo = hi;
        step *= 2.0;
        hi = lower + step;
    }
    let mut hi = hi.min(upper);

    while hi - lo > 1.0 {
        let mid = (0.5 * (lo + hi)).floor();
        if dist.cumulative(mid)? >= target {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ok(hi)
}

/// ln C(n, k) via log-gamma, for supports too large for exact coefficients.
pub(crate) fn ln_choose(n: u64, k: u64) -> f64 {
    let (n, k) = (n as f64, k as f64);
    special::ln_gamma(n + 1.0) - special::ln_gamma(k + 1.0) - special::ln_gamma(n - k + 1.0)
}

/// Incomplete gamma policy for a distribution with shape `shape`.
///
/// The budget grows with √shape, and an unconverged value is an error
/// rather than a probability.
pub(crate) fn gamma_convergence(shape: f64) -> Convergence {
    Convergence::INCOMPLETE_GAMMA.scaled_for(shape).strict()
}

/// Incomplete beta policy for shape parameters `a` and `b`.
///
/// The preset stops at |δ − 1| < 3e-7, which leaves errors near 1e-8 in
/// the result for large shapes; distributions ask for 1e-13.
pub(crate) fn beta_convergence(a: f64, b: f64) -> Convergence {
    Convergence::INCOMPLETE_BETA
        .with_tolerance(1e-13)
        .scaled_for(a.max(b))
        .strict()
}

/// True when `x` is an integer-valued float.
pub(crate) fn is_integer(x: f64) -> bool {
    x.is_finite() && x == x.floor()
}
