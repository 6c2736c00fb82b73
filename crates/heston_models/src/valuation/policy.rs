//! Near-expiry intrinsic-value override.

use heston_core::types::PricingError;

use super::quotes::OptionQuote;
use crate::analytical::HestonPricer;

/// Default materiality threshold in years, roughly one trading day.
pub const NEAR_EXPIRY_THRESHOLD: f64 = 0.0039;

/// Below `threshold` years to maturity the Fourier integral is bypassed and
/// the intrinsic value `max(S - K, 0)` is returned instead.
///
/// A threshold of zero disables the override.
///
/// # Example
///
/// ```
/// use heston_models::analytical::HestonPricer;
/// use heston_models::models::HestonParams;
/// use heston_models::valuation::{value_call, NearExpiryPolicy, OptionQuote};
///
/// let pricer = HestonPricer::new(HestonParams::default());
/// let quote = OptionQuote::new(105.0, 0.04, 100.0, 0.002);
///
/// let price = value_call(&pricer, &quote, &NearExpiryPolicy::default()).unwrap();
/// assert_eq!(price, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearExpiryPolicy {
    /// Maturity in years below which intrinsic value is used.
    pub threshold: f64,
}

impl Default for NearExpiryPolicy {
    fn default() -> Self {
        Self {
            threshold: NEAR_EXPIRY_THRESHOLD,
        }
    }
}

impl NearExpiryPolicy {
    /// Create a policy with a custom threshold.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `threshold` is negative or non-finite.
    pub fn new(threshold: f64) -> Result<Self, PricingError> {
        if !(threshold >= 0.0 && threshold.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "near_expiry_threshold",
                threshold,
                "must be non-negative and finite",
            ));
        }
        Ok(Self { threshold })
    }

    /// Policy that always defers to the pricer.
    pub fn disabled() -> Self {
        Self { threshold: 0.0 }
    }

    /// Whether a maturity of `tau` years falls under the override.
    #[inline]
    pub fn applies(&self, tau: f64) -> bool {
        tau < self.threshold
    }
}

/// Intrinsic value of a call, `max(s0 - strike, 0)`.
#[inline]
pub fn intrinsic_call(s0: f64, strike: f64) -> f64 {
    (s0 - strike).max(0.0)
}

/// Call value under the near-expiry policy.
///
/// Quotes with `0 <= tau < threshold` get exactly their intrinsic value and
/// never reach the integral; all others are priced by `pricer`.
///
/// # Errors
///
/// Quote validation errors (see [`OptionQuote::validate`]) and any error of
/// [`HestonPricer::call_price`].
pub fn value_call(
    pricer: &HestonPricer,
    quote: &OptionQuote,
    policy: &NearExpiryPolicy,
) -> Result<f64, PricingError> {
    quote.validate()?;
    if policy.applies(quote.tau) {
        return Ok(intrinsic_call(quote.spot, quote.strike));
    }
    pricer.call_price(quote.spot, quote.variance, quote.strike, quote.tau)
}
