//! Semi-analytical pricing formulas.
//!
//! - [`heston`]: Heston European call via characteristic-function inversion

pub mod heston;

pub use heston::{HestonPricer, PriceOutcome, PricerConfig, Probability};
