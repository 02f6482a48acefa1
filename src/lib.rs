//! # u-statkit
//!
//! Special functions, probability distributions and descriptive statistics.
//!
//! The special-function engine (gamma, beta, their incomplete forms and
//! the error function) drives a family of continuous and discrete
//! distributions that share one contract: sampling, density or mass,
//! cumulative and survival functions, their inverses, and closed-form
//! moments.
//!
//! ## Modules
//!
//! - [`special`] — Gamma, beta, incomplete gamma/beta, error function
//! - [`distributions`] — The [`distributions::Distribution`] trait and its
//!   twelve implementations
//! - [`stats`] — Descriptive statistics with numerical stability guarantees
//! - [`regression`] — Linear, exponential, logarithmic and power fits
//! - [`hypothesis`] — T-tests and the chi-square goodness-of-fit test
//! - [`random`] — Seeded generators and variate primitives
//! - [`error`] — The crate-wide [`StatsError`]
//!
//! ## Design Philosophy
//!
//! - **Numerical stability first**: log-space densities, Lentz continued
//!   fractions, Welford's algorithm for variance
//! - **Fail fast**: distributions validate their parameters on construction
//! - **Property-based testing**: Mathematical invariants verified via proptest
//!
//! ## Example
//!
//! ```
//! use u_statkit::distributions::{Distribution, MomentSelector, Poisson};
//!
//! let d = Poisson::new(5.0).unwrap();
//! assert_eq!(d.quantile(0.5).unwrap(), 5.0);
//! let m = d.moments("mvsk".parse::<MomentSelector>().unwrap());
//! assert_eq!(m.len(), 4);
//! ```

pub mod distributions;
pub mod error;
pub mod hypothesis;
pub mod random;
pub mod regression;
pub mod special;
pub mod stats;

pub use error::{Result, StatsError};
