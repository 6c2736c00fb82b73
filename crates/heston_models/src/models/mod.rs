//! Stochastic model parameter types.
//!
//! - [`heston`]: Heston stochastic-volatility parameters

pub mod heston;

pub use heston::HestonParams;
