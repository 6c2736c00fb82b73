//! Valuation layer around the semi-analytic pricer.
//!
//! This module provides:
//! - [`NearExpiryPolicy`] / [`value_call`]: intrinsic-value override for
//!   maturities too short for the Fourier integral to be trusted
//! - [`FiniteDifference`]: central-difference delta and variance sensitivity
//! - [`OptionQuote`] / [`price_quotes`] / [`value_quotes`]: per-row mapping
//!   of quotes to prices and sensitivities
//!
//! Everything here evaluates prices through [`value_call`], so a quote below
//! the near-expiry threshold never reaches the characteristic-function
//! integral.

mod greeks;
mod policy;
mod quotes;

pub use greeks::FiniteDifference;
pub use policy::{intrinsic_call, value_call, NearExpiryPolicy, NEAR_EXPIRY_THRESHOLD};
pub use quotes::{price_quotes, value_quotes, OptionQuote, QuoteValuation};
