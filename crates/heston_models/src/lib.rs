//! # Heston Models (L2: Business Logic)
//!
//! Model parameters, the semi-closed-form Heston pricer and the valuation
//! policies built on top of it.
//!
//! This crate provides:
//! - [`models::heston::HestonParams`]: validated model parameters
//!   (kappa, theta, sigma, rho, r)
//! - [`analytical::heston::HestonPricer`]: characteristic function in the
//!   Albrecher-Gatheral form, the two Fourier integrands and the European
//!   call price
//! - [`valuation`]: near-expiry intrinsic-value override, finite-difference
//!   delta and variance sensitivity, and per-quote mapping
//!
//! ## Example
//!
//! ```
//! use heston_models::analytical::heston::HestonPricer;
//! use heston_models::models::heston::HestonParams;
//! use heston_models::valuation::FiniteDifference;
//!
//! let params = HestonParams::new(2.0, 0.04, 0.3, -0.5, 0.01).unwrap();
//! let pricer = HestonPricer::new(params);
//!
//! let price = pricer.call_price(100.0, 0.04, 100.0, 1.0).unwrap();
//! assert!((price - 8.1775).abs() < 1e-3);
//!
//! let delta = FiniteDifference::default()
//!     .delta(&pricer, 100.0, 0.04, 100.0, 1.0)
//!     .unwrap();
//! assert!(delta > 0.5 && delta < 0.7);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod models;
pub mod valuation;
