//! Core time and error types.
//!
//! This module provides:
//! - `time`: `Date`, the 1/253 business-day step and business-day grid generation
//! - `error`: Structured error types for pricing, dates and quadrature, plus
//!   the non-fatal `ConvergenceWarning`
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`business_days`], [`BUSINESS_DAY_STEP`] from `time`
//! - [`PricingError`], [`DateError`], [`IntegrationError`], [`ConvergenceWarning`] from `error`

pub mod error;
pub mod time;

pub use error::{ConvergenceWarning, DateError, IntegrationError, PricingError};
pub use time::{business_days, Date, BUSINESS_DAYS_PER_YEAR, BUSINESS_DAY_STEP};
