//! Adaptive numerical integration.
//!
//! This module provides the quadrature used to invert characteristic
//! functions into option prices.
//!
//! ## Available Integrators
//!
//! - [`GaussKronrodIntegrator`]: Globally adaptive 7/15-point Gauss-Kronrod
//!   bisection with a per-subinterval error estimate
//!
//! ## Configuration
//!
//! [`QuadratureConfig`] controls:
//! - `abs_tolerance` / `rel_tolerance`: Stop once the summed error estimate
//!   falls below `max(abs_tolerance, rel_tolerance * |value|)` (default: 1.49e-8)
//! - `max_subintervals`: Subdivision budget (default: 50)
//!
//! Exhausting the budget is not an error: the integrator returns its best
//! estimate with `converged == false`, and [`QuadratureResult::warning`]
//! turns that into a [`ConvergenceWarning`](crate::types::ConvergenceWarning).
//!
//! ## Examples
//!
//! ```
//! use heston_core::math::quadrature::{GaussKronrodIntegrator, QuadratureConfig};
//!
//! let integrator = GaussKronrodIntegrator::new(QuadratureConfig::default());
//!
//! // ∫₀^π sin(x) dx = 2
//! let result = integrator.integrate(f64::sin, 0.0, std::f64::consts::PI).unwrap();
//! assert!(result.converged);
//! assert!((result.value - 2.0).abs() < 1e-12);
//! assert!(result.warning().is_none());
//! ```

mod config;
mod gauss_kronrod;

pub use config::QuadratureConfig;
pub use gauss_kronrod::{GaussKronrodIntegrator, QuadratureResult};
