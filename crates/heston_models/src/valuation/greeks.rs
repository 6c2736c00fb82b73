//! Central finite-difference sensitivities.
//!
//! ```text
//! delta                = (C(S + ΔS) - C(S - ΔS)) / 2ΔS,   ΔS = S · bump
//! variance sensitivity = (C(v + Δv) - C(v - Δv)) / 2Δv,   Δv = v · bump
//! ```
//!
//! The variance sensitivity differentiates with respect to the variance
//! state `v0`. It is not vega with respect to implied volatility.

use heston_core::types::PricingError;

use super::policy::{value_call, NearExpiryPolicy};
use super::quotes::OptionQuote;
use crate::analytical::HestonPricer;

/// Bump-and-revalue settings.
///
/// Every revaluation goes through [`value_call`], so quotes under the
/// near-expiry threshold are differentiated on their intrinsic value.
///
/// # Example
///
/// ```
/// use heston_models::analytical::HestonPricer;
/// use heston_models::models::HestonParams;
/// use heston_models::valuation::FiniteDifference;
///
/// let pricer = HestonPricer::new(HestonParams::default());
/// let fd = FiniteDifference::default();
///
/// let dv = fd.variance_sensitivity(&pricer, 100.0, 0.04, 100.0, 1.0).unwrap();
/// assert!(dv > 0.0);
///
/// // Zero variance leaves nothing to bump
/// assert!(fd.variance_sensitivity(&pricer, 100.0, 0.0, 100.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifference {
    /// Relative bump applied to spot and variance (default: 0.001).
    pub relative_bump: f64,
    /// Near-expiry override used for every revaluation.
    pub policy: NearExpiryPolicy,
}

impl Default for FiniteDifference {
    fn default() -> Self {
        Self {
            relative_bump: 0.001,
            policy: NearExpiryPolicy::default(),
        }
    }
}

impl FiniteDifference {
    /// Create settings with a custom relative bump.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` unless `0 < relative_bump < 1`.
    pub fn new(relative_bump: f64, policy: NearExpiryPolicy) -> Result<Self, PricingError> {
        if !(relative_bump > 0.0 && relative_bump < 1.0) {
            return Err(PricingError::invalid_parameter(
                "relative_bump",
                relative_bump,
                "must lie in (0, 1)",
            ));
        }
        Ok(Self {
            relative_bump,
            policy,
        })
    }

    /// Spot delta by central difference.
    pub fn delta(
        &self,
        pricer: &HestonPricer,
        s0: f64,
        v0: f64,
        strike: f64,
        tau: f64,
    ) -> Result<f64, PricingError> {
        self.delta_for(pricer, &OptionQuote::new(s0, v0, strike, tau))
    }

    /// Sensitivity to the variance state `v0` by central difference.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `v0 == 0`, since the bump would vanish.
    pub fn variance_sensitivity(
        &self,
        pricer: &HestonPricer,
        s0: f64,
        v0: f64,
        strike: f64,
        tau: f64,
    ) -> Result<f64, PricingError> {
        self.variance_sensitivity_for(pricer, &OptionQuote::new(s0, v0, strike, tau))
    }

    pub(crate) fn delta_for(
        &self,
        pricer: &HestonPricer,
        quote: &OptionQuote,
    ) -> Result<f64, PricingError> {
        quote.validate()?;
        let ds = quote.spot * self.relative_bump;
        let up = OptionQuote {
            spot: quote.spot + ds,
            ..*quote
        };
        let down = OptionQuote {
            spot: quote.spot - ds,
            ..*quote
        };
        self.central(pricer, &up, &down, ds)
    }

    pub(crate) fn variance_sensitivity_for(
        &self,
        pricer: &HestonPricer,
        quote: &OptionQuote,
    ) -> Result<f64, PricingError> {
        quote.validate()?;
        let dv = quote.variance * self.relative_bump;
        if dv <= 0.0 {
            return Err(PricingError::invalid_parameter(
                "variance",
                quote.variance,
                "must be positive to take a relative bump",
            ));
        }
        let up = OptionQuote {
            variance: quote.variance + dv,
            ..*quote
        };
        let down = OptionQuote {
            variance: quote.variance - dv,
            ..*quote
        };
        self.central(pricer, &up, &down, dv)
    }

    fn central(
        &self,
        pricer: &HestonPricer,
        up: &OptionQuote,
        down: &OptionQuote,
        bump: f64,
    ) -> Result<f64, PricingError> {
        let price_up = value_call(pricer, up, &self.policy)?;
        let price_down = value_call(pricer, down, &self.policy)?;
        Ok((price_up - price_down) / (2.0 * bump))
    }
}
