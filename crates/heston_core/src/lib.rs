//! # heston_core: Foundation Layer for Heston Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! heston_core is the bottom layer of the workspace and provides:
//! - Error taxonomy: `PricingError`, `DateError`, `IntegrationError` and the
//!   non-fatal `ConvergenceWarning` (`types::error`)
//! - Time types: `Date`, business-day grids and the 1/253 step (`types::time`)
//! - Adaptive Gauss-Kronrod quadrature (`math::quadrature`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other heston_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use heston_core::math::quadrature::{GaussKronrodIntegrator, QuadratureConfig};
//! use heston_core::types::{business_days, Date};
//!
//! // Business-day grid over one trading week
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 1, 7).unwrap();
//! assert_eq!(business_days(start, end).unwrap().len(), 5);
//!
//! // Adaptive quadrature
//! let integrator = GaussKronrodIntegrator::new(QuadratureConfig::default());
//! let result = integrator.integrate(|x: f64| x.exp(), 0.0, 1.0).unwrap();
//! assert!(result.converged);
//! # assert!((result.value - (1.0_f64.exp() - 1.0)).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Date` and `ConvergenceWarning`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
