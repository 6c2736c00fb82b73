//! Heston stochastic-volatility model parameters.
//!
//! The Heston model is described by the SDEs:
//! ```text
//! dS = r * S * dt + sqrt(V) * S * dW_S
//! dV = kappa * (theta - V) * dt + sigma * sqrt(V) * dW_V
//! E[dW_S * dW_V] = rho * dt
//! ```
//! where:
//! - S = asset price
//! - V = instantaneous variance
//! - r = risk-free rate
//! - kappa = mean-reversion speed
//! - theta = long-run variance
//! - sigma = volatility of variance (vol-of-vol)
//! - rho = correlation between asset and variance shocks
//!
//! ## Feller condition
//!
//! Sufficient condition for the variance to stay strictly positive in
//! continuous time:
//! ```text
//! 2 * kappa * theta >= sigma^2
//! ```
//! It is reported, not enforced: violating parameters are legal input.
//!
//! ## Example
//!
//! ```
//! use heston_models::models::heston::HestonParams;
//!
//! let params = HestonParams::new(
//!     2.0,   // kappa
//!     0.04,  // theta
//!     0.3,   // sigma
//!     -0.5,  // rho
//!     0.01,  // r
//! );
//! assert!(params.is_ok());
//! assert!(params.unwrap().satisfies_feller());
//! ```

use heston_core::types::PricingError;

/// Heston model parameters.
///
/// Immutable once constructed; every constructor validates.
///
/// # Fields
///
/// * `kappa` - Mean-reversion speed (kappa > 0)
/// * `theta` - Long-run variance (theta > 0)
/// * `sigma` - Volatility of variance (sigma > 0)
/// * `rho` - Correlation (-1 <= rho <= 1)
/// * `rate` - Risk-free rate (finite)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawHestonParams"))]
pub struct HestonParams {
    kappa: f64,
    theta: f64,
    sigma: f64,
    rho: f64,
    rate: f64,
}

impl HestonParams {
    /// Create validated Heston parameters.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` naming the first offending field.
    ///
    /// ```
    /// use heston_models::models::heston::HestonParams;
    ///
    /// assert!(HestonParams::new(2.0, 0.04, 0.3, -0.5, 0.01).is_ok());
    /// assert!(HestonParams::new(2.0, 0.04, 0.0, -0.5, 0.01).is_err());
    /// assert!(HestonParams::new(2.0, 0.04, 0.3, -1.5, 0.01).is_err());
    /// ```
    pub fn new(kappa: f64, theta: f64, sigma: f64, rho: f64, rate: f64) -> Result<Self, PricingError> {
        let params = Self {
            kappa,
            theta,
            sigma,
            rho,
            rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every domain constraint.
    pub fn validate(&self) -> Result<(), PricingError> {
        positive("kappa", self.kappa)?;
        positive("theta", self.theta)?;
        positive("sigma", self.sigma)?;

        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(PricingError::invalid_parameter(
                "rho",
                self.rho,
                "must lie in [-1, 1]",
            ));
        }

        if !self.rate.is_finite() {
            return Err(PricingError::invalid_parameter(
                "rate",
                self.rate,
                "must be finite",
            ));
        }

        Ok(())
    }

    /// Mean-reversion speed.
    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    /// Long-run variance.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Volatility of variance.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Correlation between asset and variance shocks.
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Risk-free rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Feller condition `2 * kappa * theta >= sigma^2`.
    ///
    /// ```
    /// use heston_models::models::heston::HestonParams;
    ///
    /// // 2 * 2.0 * 0.04 = 0.16 >= 0.09
    /// let params = HestonParams::new(2.0, 0.04, 0.3, -0.5, 0.01).unwrap();
    /// assert!(params.satisfies_feller());
    ///
    /// // 2 * 0.5 * 0.04 = 0.04 < 0.25
    /// let params = HestonParams::new(0.5, 0.04, 0.5, -0.5, 0.01).unwrap();
    /// assert!(!params.satisfies_feller());
    /// ```
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta >= self.sigma * self.sigma
    }

    /// Feller ratio `2 * kappa * theta / sigma^2`; at least 1 when the
    /// condition holds.
    pub fn feller_ratio(&self) -> f64 {
        2.0 * self.kappa * self.theta / (self.sigma * self.sigma)
    }
}

impl Default for HestonParams {
    /// Reference parameters: kappa = 2, theta = 0.04, sigma = 0.3,
    /// rho = -0.5, r = 0.01.
    fn default() -> Self {
        Self {
            kappa: 2.0,
            theta: 0.04,
            sigma: 0.3,
            rho: -0.5,
            rate: 0.01,
        }
    }
}

/// Unvalidated wire form; deserialisation goes through [`HestonParams::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHestonParams {
    kappa: f64,
    theta: f64,
    sigma: f64,
    rho: f64,
    rate: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawHestonParams> for HestonParams {
    type Error = PricingError;

    fn try_from(raw: RawHestonParams) -> Result<Self, Self::Error> {
        HestonParams::new(raw.kappa, raw.theta, raw.sigma, raw.rho, raw.rate)
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            value,
            "must be positive and finite",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_valid() {
        let params = HestonParams::new(1.5, 0.04, 0.3, -0.7, 0.05).unwrap();
        assert_eq!(params.kappa(), 1.5);
        assert_eq!(params.theta(), 0.04);
        assert_eq!(params.sigma(), 0.3);
        assert_eq!(params.rho(), -0.7);
        assert_eq!(params.rate(), 0.05);
    }

    #[test]
    fn test_invalid_kappa() {
        for kappa in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = HestonParams::new(kappa, 0.04, 0.3, -0.5, 0.01).unwrap_err();
            assert!(matches!(
                err,
                PricingError::InvalidParameter { name: "kappa", .. }
            ));
        }
    }

    #[test]
    fn test_invalid_theta() {
        let err = HestonParams::new(2.0, 0.0, 0.3, -0.5, 0.01).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter { name: "theta", .. }
        ));
    }

    #[test]
    fn test_invalid_sigma() {
        let err = HestonParams::new(2.0, 0.04, -0.3, -0.5, 0.01).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter { name: "sigma", .. }
        ));
    }

    #[test]
    fn test_rho_bounds() {
        assert!(HestonParams::new(2.0, 0.04, 0.3, -1.0, 0.01).is_ok());
        assert!(HestonParams::new(2.0, 0.04, 0.3, 1.0, 0.01).is_ok());
        assert!(HestonParams::new(2.0, 0.04, 0.3, 1.0001, 0.01).is_err());
        assert!(HestonParams::new(2.0, 0.04, 0.3, f64::NAN, 0.01).is_err());
    }

    #[test]
    fn test_negative_rate_is_allowed() {
        assert!(HestonParams::new(2.0, 0.04, 0.3, -0.5, -0.005).is_ok());
        assert!(HestonParams::new(2.0, 0.04, 0.3, -0.5, f64::NAN).is_err());
    }

    #[test]
    fn test_feller_ratio() {
        let params = HestonParams::default();
        assert_relative_eq!(params.feller_ratio(), 0.16 / 0.09, epsilon = 1e-12);

        // Boundary: 2 * 1.125 * 0.04 = 0.09 = 0.3^2
        let boundary = HestonParams::new(1.125, 0.04, 0.3, 0.0, 0.0).unwrap();
        assert!(boundary.satisfies_feller());
        assert_relative_eq!(boundary.feller_ratio(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_default_is_valid() {
        assert!(HestonParams::default().validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let params: HestonParams = toml::from_str(
            "kappa = 2.0\ntheta = 0.04\nsigma = 0.3\nrho = -0.5\nrate = 0.01\n",
        )
        .unwrap();
        assert_eq!(params, HestonParams::default());

        let err = toml::from_str::<HestonParams>(
            "kappa = 2.0\ntheta = 0.04\nsigma = 0.0\nrho = -0.5\nrate = 0.01\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid parameter sigma"));

        let err = toml::from_str::<HestonParams>(
            "kappa = 2.0\ntheta = 0.04\nsigma = 0.3\nrho = -1.5\nrate = 0.01\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid parameter rho"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_wire_form_conversion() {
        let raw = RawHestonParams {
            kappa: 2.0,
            theta: 0.04,
            sigma: 0.0,
            rho: -0.5,
            rate: 0.01,
        };
        assert!(matches!(
            HestonParams::try_from(raw),
            Err(PricingError::InvalidParameter { name: "sigma", .. })
        ));
    }
}
