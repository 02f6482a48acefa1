//! Error types for u-statkit.

use thiserror::Error;

/// Result type alias using [`StatsError`].
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors produced by special functions, distributions and the statistical
/// routines built on them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Argument outside the mathematical domain of a function.
    #[error("{function}: argument {argument} = {value} is outside the domain")]
    Domain {
        /// Function that rejected the argument
        function: &'static str,
        /// Name of the offending argument
        argument: &'static str,
        /// The offending value
        value: f64,
    },

    /// Distribution constructed with parameters that violate its invariants.
    #[error("invalid {distribution} parameters: {reason}")]
    InvalidParameters {
        /// Distribution being constructed
        distribution: &'static str,
        /// Description of the violated constraint
        reason: String,
    },

    /// Iterative evaluation hit its iteration cap before converging.
    #[error("{function} did not converge within {iterations} iterations")]
    NonConvergence {
        /// Routine that failed to converge
        function: &'static str,
        /// Iterations performed
        iterations: usize,
    },

    /// Malformed non-numeric input, such as mismatched sample lengths.
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// Argument name
        argument: &'static str,
        /// Reason the argument is invalid
        reason: String,
    },
}

impl StatsError {
    pub(crate) fn domain(function: &'static str, argument: &'static str, value: f64) -> Self {
        Self::Domain {
            function,
            argument,
            value,
        }
    }

    pub(crate) fn invalid_parameters(
        distribution: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameters {
            distribution,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}
