//! Per-quote mapping of inputs to prices and sensitivities.
//!
//! Each quote is valued independently: a failing row produces an `Err` in
//! its slot and does not affect its neighbours.

use heston_core::types::PricingError;

use super::greeks::FiniteDifference;
use super::policy::{value_call, NearExpiryPolicy};
use crate::analytical::HestonPricer;

/// One option quote: the inputs of a single call valuation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionQuote {
    /// Spot price of the underlying.
    pub spot: f64,
    /// Current instantaneous variance.
    pub variance: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to maturity in years.
    pub tau: f64,
}

impl OptionQuote {
    /// Bundle a quote. No validation happens until it is valued.
    pub fn new(spot: f64, variance: f64, strike: f64, tau: f64) -> Self {
        Self {
            spot,
            variance,
            strike,
            tau,
        }
    }

    /// Check the domain of every field.
    ///
    /// `tau = 0` passes here; it is only usable under a near-expiry policy.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.spot > 0.0 && self.spot.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "spot",
                self.spot,
                "must be positive and finite",
            ));
        }
        if !(self.variance >= 0.0 && self.variance.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "variance",
                self.variance,
                "must be non-negative and finite",
            ));
        }
        if !(self.strike > 0.0 && self.strike.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "strike",
                self.strike,
                "must be positive and finite",
            ));
        }
        if !(self.tau >= 0.0 && self.tau.is_finite()) {
            return Err(PricingError::InvalidRange(format!(
                "time to maturity tau = {} must be non-negative and finite",
                self.tau
            )));
        }
        Ok(())
    }
}

/// Price plus first-order sensitivities of one quote.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuoteValuation {
    /// Call price.
    pub price: f64,
    /// dPrice/dSpot.
    pub delta: f64,
    /// dPrice/dVariance (not implied-volatility vega).
    pub variance_sensitivity: f64,
}

/// Price every quote under `policy`.
///
/// # Example
///
/// ```
/// use heston_models::analytical::HestonPricer;
/// use heston_models::models::HestonParams;
/// use heston_models::valuation::{price_quotes, NearExpiryPolicy, OptionQuote};
///
/// let pricer = HestonPricer::new(HestonParams::default());
/// let quotes = [
///     OptionQuote::new(100.0, 0.04, 100.0, 1.0),
///     OptionQuote::new(100.0, 0.04, -1.0, 1.0),
/// ];
///
/// let prices = price_quotes(&pricer, &quotes, &NearExpiryPolicy::default());
/// assert!(prices[0].is_ok());
/// assert!(prices[1].is_err());
/// ```
pub fn price_quotes(
    pricer: &HestonPricer,
    quotes: &[OptionQuote],
    policy: &NearExpiryPolicy,
) -> Vec<Result<f64, PricingError>> {
    quotes
        .iter()
        .map(|quote| value_call(pricer, quote, policy))
        .collect()
}

/// Price, delta and variance sensitivity of every quote.
///
/// The near-expiry policy carried by `greeks` applies to the price as well.
pub fn value_quotes(
    pricer: &HestonPricer,
    quotes: &[OptionQuote],
    greeks: &FiniteDifference,
) -> Vec<Result<QuoteValuation, PricingError>> {
    quotes
        .iter()
        .map(|quote| {
            let price = value_call(pricer, quote, &greeks.policy)?;
            let delta = greeks.delta_for(pricer, quote)?;
            let variance_sensitivity = greeks.variance_sensitivity_for(pricer, quote)?;
            Ok(QuoteValuation {
                price,
                delta,
                variance_sensitivity,
            })
        })
        .collect()
}
