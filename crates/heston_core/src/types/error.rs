//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from parameter validation, pricing and simulation
//! - `DateError`: Errors from date construction and parsing
//! - `IntegrationError`: Errors from numerical quadrature
//! - `ConvergenceWarning`: Non-fatal quadrature diagnostic attached to a
//!   best-effort result

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Validation failures are raised before any numerical work starts, so a
/// caller never receives a partially-computed value together with an error.
///
/// # Variants
/// - `InvalidParameter`: A model or request input violates its domain
/// - `InvalidRange`: A time range or maturity is unusable (e.g. fewer than two
///   grid points, `tau <= 0`)
/// - `NumericalInstability`: Computation produced NaN or infinity
/// - `Date`: Calendar construction or parsing failed
///
/// # Examples
/// ```
/// use heston_core::types::PricingError;
///
/// let err = PricingError::invalid_parameter("sigma", -0.3, "must be positive");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter sigma = -0.3: must be positive"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A model parameter or pricing input violates its domain constraint.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Constraint that was violated
        reason: &'static str,
    },

    /// Time range or maturity cannot be used.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Calendar error.
    #[error(transparent)]
    Date(#[from] DateError),
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        PricingError::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Returns `true` for validation failures (parameter or range).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PricingError::InvalidParameter { .. } | PricingError::InvalidRange(_)
        )
    }
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use heston_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

/// Numerical quadrature errors.
///
/// Failing to reach the requested tolerance is *not* an error; see
/// [`ConvergenceWarning`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrationError {
    /// Bounds are non-finite or not strictly increasing.
    #[error("Invalid integration interval [{a}, {b}]")]
    InvalidInterval {
        /// Lower bound
        a: f64,
        /// Upper bound
        b: f64,
    },

    /// The integrand returned NaN or infinity.
    #[error("Integrand is not finite at x = {x}")]
    NonFiniteIntegrand {
        /// Abscissa where the integrand blew up
        x: f64,
    },
}

impl From<IntegrationError> for PricingError {
    fn from(err: IntegrationError) -> Self {
        match err {
            IntegrationError::InvalidInterval { .. } => PricingError::InvalidRange(err.to_string()),
            IntegrationError::NonFiniteIntegrand { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
        }
    }
}

/// Non-fatal signal that an adaptive integration stopped before reaching its
/// tolerance.
///
/// The associated value is still returned; callers decide whether to accept
/// it, retry with a different configuration, or discard it.
///
/// # Examples
/// ```
/// use heston_core::types::ConvergenceWarning;
///
/// let warning = ConvergenceWarning {
///     estimated_error: 2.5e-5,
///     tolerance: 1.49e-8,
///     subintervals: 50,
/// };
/// assert!(warning.to_string().contains("50 subintervals"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceWarning {
    /// Error estimate reported by the integrator.
    pub estimated_error: f64,
    /// Tolerance the integrator was asked to meet.
    pub tolerance: f64,
    /// Number of subintervals in use when the integrator stopped.
    pub subintervals: usize,
}

impl ConvergenceWarning {
    /// Ratio of estimated error to tolerance (greater than one by construction).
    pub fn excess(&self) -> f64 {
        if self.tolerance > 0.0 {
            self.estimated_error / self.tolerance
        } else {
            f64::INFINITY
        }
    }
}

impl fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "integration did not converge: estimated error {:.3e} exceeds tolerance {:.3e} after {} subintervals",
            self.estimated_error, self.tolerance, self.subintervals
        )
    }
}
