//! Semi-closed-form Heston pricer for European options.
//!
//! The call price is recovered from the characteristic function of the
//! log-price by Fourier inversion:
//!
//! ```text
//! C = ½(S₀ - K·e^{-rτ}) + (1/π) ∫₀^∞ [S₀·f₁(ξ) - K·e^{-rτ}·f₂(ξ)] dξ
//!
//! f₁(ξ) = Re[ φ(ξ - i) / (iξ·φ(-i)) · e^{-iξ ln K} ]
//! f₂(ξ) = Re[ φ(ξ) / (iξ) · e^{-iξ ln K} ]
//! ```
//!
//! φ is evaluated in the Albrecher–Gatheral ("little Heston trap") form,
//! which keeps the complex logarithm on its principal branch as ξ grows
//! and is stable for long maturities:
//!
//! ```text
//! β = κ - iξρσ
//! d = √(β² + σ²(iξ + ξ²))
//! g = (β - d) / (β + d)
//! C = iξrτ + (κθ/σ²)·[(β - d)τ - 2 ln((1 - g·e^{-dτ}) / (1 - g))]
//! D = (β - d)/σ² · (1 - e^{-dτ}) / (1 - g·e^{-dτ})
//! φ(ξ) = exp(C + D·v₀ + iξ ln S₀)
//! ```
//!
//! ## Known limitations
//!
//! The integral is truncated at [`PricerConfig::upper_bound`] (500 by
//! default). Truncation error grows as the integrand decays more slowly,
//! i.e. for very short maturities and strikes far from the money. The price
//! is not floored at intrinsic value; near-expiry handling lives in
//! [`crate::valuation`].

use std::f64::consts::PI;

use heston_core::math::quadrature::{GaussKronrodIntegrator, QuadratureConfig};
use heston_core::types::{ConvergenceWarning, PricingError};
use num_complex::Complex64;
use tracing::{debug, warn};

use crate::models::HestonParams;

/// Which of the two risk-neutral probabilities an integrand belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Probability {
    /// Stock-numeraire probability P₁, integrand shifted to `ξ - i`.
    First,
    /// Money-market probability P₂.
    Second,
}

/// Pricer configuration.
///
/// # Example
///
/// ```
/// use heston_models::analytical::PricerConfig;
///
/// let config = PricerConfig::default();
/// assert_eq!(config.upper_bound, 500.0);
/// assert_eq!(config.quadrature.max_subintervals, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricerConfig {
    /// Finite cut-off replacing the infinite upper limit of the integral.
    pub upper_bound: f64,
    /// Adaptive quadrature settings.
    pub quadrature: QuadratureConfig<f64>,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            upper_bound: 500.0,
            quadrature: QuadratureConfig::default(),
        }
    }
}

impl PricerConfig {
    /// Check the configuration before any pricing work is done.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.upper_bound > 0.0 && self.upper_bound.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "upper_bound",
                self.upper_bound,
                "must be positive and finite",
            ));
        }
        let q = &self.quadrature;
        if !(q.abs_tolerance > 0.0) {
            return Err(PricingError::invalid_parameter(
                "abs_tolerance",
                q.abs_tolerance,
                "must be positive",
            ));
        }
        if !(q.rel_tolerance > 0.0) {
            return Err(PricingError::invalid_parameter(
                "rel_tolerance",
                q.rel_tolerance,
                "must be positive",
            ));
        }
        if q.max_subintervals == 0 {
            return Err(PricingError::invalid_parameter(
                "max_subintervals",
                0.0,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// A price together with its integration diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceOutcome {
    /// Best-effort option price.
    pub price: f64,
    /// Present when the quadrature stopped before meeting its tolerance.
    pub warning: Option<ConvergenceWarning>,
    /// Subintervals used by the quadrature.
    pub subintervals: usize,
}

/// Heston semi-analytic pricer.
///
/// Built once per parameter set and then called repeatedly with varying
/// spot, variance, strike and maturity. Holds no mutable state, so a single
/// instance may be shared across threads.
///
/// # Example
///
/// ```
/// use heston_models::analytical::HestonPricer;
/// use heston_models::models::HestonParams;
///
/// let params = HestonParams::new(2.0, 0.04, 0.3, -0.5, 0.01).unwrap();
/// let pricer = HestonPricer::new(params);
///
/// let call = pricer.call_price(100.0, 0.04, 100.0, 1.0).unwrap();
/// assert!((call - 8.1775).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct HestonPricer {
    params: HestonParams,
    config: PricerConfig,
    integrator: GaussKronrodIntegrator<f64>,
}

/// Validated inputs of one pricing call with the logs precomputed.
#[derive(Debug, Clone, Copy)]
struct Request {
    variance: f64,
    tau: f64,
    ln_spot: f64,
    ln_strike: f64,
    forward: f64,
}

impl HestonPricer {
    /// Create a pricer with the default configuration.
    ///
    /// Cannot fail: [`HestonParams`] is validated by every constructor,
    /// deserialisation included, and the default configuration is valid.
    pub fn new(params: HestonParams) -> Self {
        let config = PricerConfig::default();
        Self {
            params,
            integrator: GaussKronrodIntegrator::new(config.quadrature),
            config,
        }
    }

    /// Create a pricer with a custom configuration.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` if either the parameters or the
    /// configuration are out of domain.
    pub fn with_config(params: HestonParams, config: PricerConfig) -> Result<Self, PricingError> {
        params.validate()?;
        config.validate()?;
        Ok(Self {
            params,
            integrator: GaussKronrodIntegrator::new(config.quadrature),
            config,
        })
    }

    /// Model parameters.
    pub fn params(&self) -> &HestonParams {
        &self.params
    }

    /// Active configuration.
    pub fn config(&self) -> &PricerConfig {
        &self.config
    }

    /// Characteristic function of `ln S_τ` at complex frequency `xi`.
    ///
    /// `tau = 0` is accepted and yields the degenerate `exp(i·xi·ln s0)`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for `s0 <= 0` or `v0 < 0`, `InvalidRange` for a
    /// negative or non-finite `tau`, `NumericalInstability` where the closed
    /// form has no finite value (e.g. `xi = -i` with `kappa < rho·sigma`).
    ///
    /// ```
    /// use heston_models::analytical::HestonPricer;
    /// use heston_models::models::HestonParams;
    /// use num_complex::Complex64;
    ///
    /// let pricer = HestonPricer::new(HestonParams::default());
    /// let phi = pricer
    ///     .characteristic_function(Complex64::new(0.0, 0.0), 100.0, 0.04, 1.0)
    ///     .unwrap();
    /// assert!((phi - Complex64::new(1.0, 0.0)).norm() < 1e-14);
    /// ```
    pub fn characteristic_function(
        &self,
        xi: Complex64,
        s0: f64,
        v0: f64,
        tau: f64,
    ) -> Result<Complex64, PricingError> {
        check_spot(s0)?;
        check_variance(v0)?;
        if !(tau >= 0.0 && tau.is_finite()) {
            return Err(PricingError::InvalidRange(format!(
                "time to maturity tau = {tau} must be non-negative and finite"
            )));
        }
        let phi = self.cf(xi, s0.ln(), v0, tau);
        if !(phi.re.is_finite() && phi.im.is_finite()) {
            return Err(PricingError::NumericalInstability(format!(
                "characteristic function is not finite at xi = {xi} (s0 = {s0}, v0 = {v0}, tau = {tau})"
            )));
        }
        Ok(phi)
    }

    /// Real integrand of the given probability at frequency `xi`.
    ///
    /// # Errors
    ///
    /// Request validation errors as for [`call_price`](Self::call_price);
    /// `InvalidRange` at `xi = 0`, where the integrand has a removable
    /// singularity and is not evaluated.
    pub fn integrand(
        &self,
        xi: f64,
        s0: f64,
        v0: f64,
        strike: f64,
        tau: f64,
        which: Probability,
    ) -> Result<f64, PricingError> {
        let request = self.request(s0, v0, strike, tau)?;
        if xi == 0.0 || !xi.is_finite() {
            return Err(PricingError::InvalidRange(format!(
                "integrand is undefined at xi = {xi}"
            )));
        }
        Ok(self.probability_integrand(xi, &request, which))
    }

    /// European call price.
    ///
    /// A [`ConvergenceWarning`] is logged through `tracing` and the
    /// best-effort price is still returned; use
    /// [`call_price_detailed`](Self::call_price_detailed) to receive it as a
    /// value.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for `s0 <= 0`, `v0 < 0`, `strike <= 0`
    /// - `InvalidRange` for `tau <= 0`
    /// - `NumericalInstability` if the integral is not finite
    pub fn call_price(&self, s0: f64, v0: f64, strike: f64, tau: f64) -> Result<f64, PricingError> {
        let outcome = self.call_price_detailed(s0, v0, strike, tau)?;
        log_warning(&outcome, s0, strike, tau);
        Ok(outcome.price)
    }

    /// European call price with integration diagnostics.
    pub fn call_price_detailed(
        &self,
        s0: f64,
        v0: f64,
        strike: f64,
        tau: f64,
    ) -> Result<PriceOutcome, PricingError> {
        let request = self.request(s0, v0, strike, tau)?;
        let discounted_strike = strike * (-self.params.rate() * tau).exp();

        let result = self.integrator.integrate(
            |xi| {
                s0 * self.probability_integrand(xi, &request, Probability::First)
                    - discounted_strike * self.probability_integrand(xi, &request, Probability::Second)
            },
            0.0,
            self.config.upper_bound,
        )?;

        let price = 0.5 * (s0 - discounted_strike) + result.value / PI;
        if !price.is_finite() {
            return Err(PricingError::NumericalInstability(format!(
                "call price is not finite (s0 = {s0}, v0 = {v0}, strike = {strike}, tau = {tau})"
            )));
        }

        debug!(
            s0,
            v0,
            strike,
            tau,
            price,
            subintervals = result.subintervals,
            evaluations = result.evaluations,
            "Heston call priced"
        );

        Ok(PriceOutcome {
            price,
            warning: result.warning(),
            subintervals: result.subintervals,
        })
    }

    /// European put price by put–call parity, `P = C - S₀ + K·e^{-rτ}`.
    pub fn put_price(&self, s0: f64, v0: f64, strike: f64, tau: f64) -> Result<f64, PricingError> {
        let outcome = self.call_price_detailed(s0, v0, strike, tau)?;
        log_warning(&outcome, s0, strike, tau);
        Ok(outcome.price - s0 + strike * (-self.params.rate() * tau).exp())
    }

    fn request(&self, s0: f64, v0: f64, strike: f64, tau: f64) -> Result<Request, PricingError> {
        check_spot(s0)?;
        check_variance(v0)?;
        if !(strike > 0.0 && strike.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "strike",
                strike,
                "must be positive and finite",
            ));
        }
        if !(tau > 0.0 && tau.is_finite()) {
            return Err(PricingError::InvalidRange(format!(
                "time to maturity tau = {tau} must be positive and finite"
            )));
        }

        Ok(Request {
            variance: v0,
            tau,
            ln_spot: s0.ln(),
            ln_strike: strike.ln(),
            // φ(-i) = E[S_τ] in closed form; evaluating φ at -i directly
            // divides by zero whenever κ < ρσ.
            forward: s0 * (self.params.rate() * tau).exp(),
        })
    }

    fn probability_integrand(&self, xi: f64, request: &Request, which: Probability) -> f64 {
        let i_xi = Complex64::new(0.0, xi);
        let strike_phase = (-i_xi * request.ln_strike).exp();

        let value = match which {
            Probability::First => {
                let phi = self.cf(
                    Complex64::new(xi, -1.0),
                    request.ln_spot,
                    request.variance,
                    request.tau,
                );
                phi / (i_xi * request.forward) * strike_phase
            }
            Probability::Second => {
                let phi = self.cf(
                    Complex64::new(xi, 0.0),
                    request.ln_spot,
                    request.variance,
                    request.tau,
                );
                phi / i_xi * strike_phase
            }
        };
        value.re
    }

    fn cf(&self, xi: Complex64, ln_spot: f64, v0: f64, tau: f64) -> Complex64 {
        let one = Complex64::new(1.0, 0.0);
        let kappa = self.params.kappa();
        let theta = self.params.theta();
        let sigma = self.params.sigma();
        let sigma2 = sigma * sigma;

        let i_xi = Complex64::i() * xi;
        let beta = Complex64::new(kappa, 0.0) - i_xi * (self.params.rho() * sigma);
        let d = (beta * beta + (i_xi + xi * xi) * sigma2).sqrt();
        let g = (beta - d) / (beta + d);
        let decay = (-d * tau).exp();

        let log_term = ((one - g * decay) / (one - g)).ln();
        let c = i_xi * (self.params.rate() * tau)
            + ((beta - d) * tau - log_term * 2.0) * (kappa * theta / sigma2);
        let d_term = (beta - d) / sigma2 * ((one - decay) / (one - g * decay));

        (c + d_term * v0 + i_xi * ln_spot).exp()
    }
}

fn log_warning(outcome: &PriceOutcome, s0: f64, strike: f64, tau: f64) {
    if let Some(warning) = &outcome.warning {
        warn!(
            s0,
            strike,
            tau,
            estimated_error = warning.estimated_error,
            tolerance = warning.tolerance,
            subintervals = warning.subintervals,
            excess = warning.excess(),
            "Heston integral did not converge, returning best-effort price"
        );
    }
}

fn check_spot(s0: f64) -> Result<(), PricingError> {
    if s0 > 0.0 && s0.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            "spot",
            s0,
            "must be positive and finite",
        ))
    }
}

fn check_variance(v0: f64) -> Result<(), PricingError> {
    if v0 >= 0.0 && v0.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            "variance",
            v0,
            "must be non-negative and finite",
        ))
    }
}
