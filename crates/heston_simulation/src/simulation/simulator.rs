//! Correlated Euler/Milstein path generation.

use heston_core::types::{business_days, Date, PricingError, BUSINESS_DAY_STEP};
use heston_models::models::HestonParams;
use tracing::{debug, warn};

use super::path::SimulatedPath;
use super::variance::NegativeVariance;
use crate::rng::NormalSource;

/// Combine asset shocks with independent auxiliary shocks into variance
/// shocks, `w1 = rho·w0 + √(1 - rho²)·aux`.
///
/// Each output is marginally N(0, 1) with correlation `rho` to its asset
/// shock. At `rho = ±1` the result is exactly `±w0`. Pairs are formed up to
/// the shorter of the two slices.
///
/// # Examples
///
/// ```
/// use heston_simulation::simulation::correlate_shocks;
///
/// let w0 = [0.3, -1.2];
/// let aux = [0.7, 0.1];
/// assert_eq!(correlate_shocks(-1.0, &w0, &aux), vec![-0.3, 1.2]);
/// assert_eq!(correlate_shocks(0.0, &w0, &aux), vec![0.7, 0.1]);
/// ```
pub fn correlate_shocks(rho: f64, w0: &[f64], aux: &[f64]) -> Vec<f64> {
    let orthogonal = (1.0 - rho * rho).max(0.0).sqrt();
    w0.iter()
        .zip(aux)
        .map(|(&w, &z)| rho * w + orthogonal * z)
        .collect()
}

/// Shock sequences driving one path.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedShocks {
    /// Asset shocks `w0`.
    pub asset: Vec<f64>,
    /// Variance shocks `w1`, correlated with `asset` by `rho`.
    pub variance: Vec<f64>,
}

/// Heston path simulator.
///
/// Euler scheme for the asset, Milstein scheme for the variance, shocks
/// drawn from a caller-supplied [`NormalSource`]. For a path of `m` grid
/// points all `m - 1` asset shocks are drawn first, then `m - 1` auxiliary
/// shocks, so a given seed always reproduces the same path.
///
/// # Examples
///
/// ```
/// use heston_models::models::HestonParams;
/// use heston_simulation::rng::SimulationRng;
/// use heston_simulation::simulation::{NegativeVariance, PathSimulator};
///
/// let simulator = PathSimulator::new(HestonParams::default())
///     .with_drift(0.05)
///     .with_negative_variance(NegativeVariance::Absorb);
///
/// let path = simulator
///     .simulate_steps(100.0, 0.04, 253, &mut SimulationRng::from_seed(1))
///     .unwrap();
/// assert_eq!(path.len(), 254);
/// assert!(path.min_variance() >= 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSimulator {
    params: HestonParams,
    drift: f64,
    negative_variance: NegativeVariance,
}

impl PathSimulator {
    /// Create a simulator whose asset drift defaults to the model rate.
    pub fn new(params: HestonParams) -> Self {
        Self {
            drift: params.rate(),
            params,
            negative_variance: NegativeVariance::default(),
        }
    }

    /// Set the asset drift `mu` (real-world or risk-neutral).
    pub fn with_drift(mut self, drift: f64) -> Self {
        self.drift = drift;
        self
    }

    /// Set the negative-variance policy.
    pub fn with_negative_variance(mut self, policy: NegativeVariance) -> Self {
        self.negative_variance = policy;
        self
    }

    /// Model parameters.
    pub fn params(&self) -> &HestonParams {
        &self.params
    }

    /// Asset drift.
    pub fn drift(&self) -> f64 {
        self.drift
    }

    /// Negative-variance policy.
    pub fn negative_variance(&self) -> NegativeVariance {
        self.negative_variance
    }

    /// Time step in years: one business day, `1 / 253`.
    pub fn dt(&self) -> f64 {
        BUSINESS_DAY_STEP
    }

    /// Simulate over the business days from `start` to `end` inclusive.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for `s0 <= 0`, `v0 < 0`, non-finite inputs or a
    ///   non-finite drift
    /// - `InvalidRange` if `end < start` or the grid has fewer than two dates
    ///
    /// Validation happens before any shock is drawn.
    pub fn simulate<R>(
        &self,
        s0: f64,
        v0: f64,
        start: Date,
        end: Date,
        rng: &mut R,
    ) -> Result<SimulatedPath, PricingError>
    where
        R: NormalSource + ?Sized,
    {
        self.validate_state(s0, v0)?;
        let dates = business_days(start, end)?;
        if dates.len() < 2 {
            return Err(PricingError::InvalidRange(format!(
                "simulation grid from {start} to {end} has {} business day(s); at least two are required",
                dates.len()
            )));
        }

        let (spot, variance) = self.evolve(s0, v0, dates.len() - 1, rng);
        let path = SimulatedPath::new(dates, spot, variance, self.dt());
        self.report(&path);
        Ok(path)
    }

    /// Simulate `n_steps` uniform steps without a calendar.
    ///
    /// # Errors
    ///
    /// As for [`simulate`](Self::simulate); `InvalidRange` if `n_steps == 0`.
    pub fn simulate_steps<R>(
        &self,
        s0: f64,
        v0: f64,
        n_steps: usize,
        rng: &mut R,
    ) -> Result<SimulatedPath, PricingError>
    where
        R: NormalSource + ?Sized,
    {
        self.validate_state(s0, v0)?;
        if n_steps == 0 {
            return Err(PricingError::InvalidRange(
                "at least one simulation step is required".to_string(),
            ));
        }

        let (spot, variance) = self.evolve(s0, v0, n_steps, rng);
        let path = SimulatedPath::new(Vec::new(), spot, variance, self.dt());
        self.report(&path);
        Ok(path)
    }

    /// Draw the shocks for `n_steps` steps in simulation order.
    pub fn draw_shocks<R>(&self, n_steps: usize, rng: &mut R) -> CorrelatedShocks
    where
        R: NormalSource + ?Sized,
    {
        let mut asset = vec![0.0; n_steps];
        let mut aux = vec![0.0; n_steps];
        rng.fill_standard_normal(&mut asset);
        rng.fill_standard_normal(&mut aux);
        let variance = correlate_shocks(self.params.rho(), &asset, &aux);
        CorrelatedShocks { asset, variance }
    }

    fn validate_state(&self, s0: f64, v0: f64) -> Result<(), PricingError> {
        if !(s0 > 0.0 && s0.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "spot",
                s0,
                "must be positive and finite",
            ));
        }
        if !(v0 >= 0.0 && v0.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "variance",
                v0,
                "must be non-negative and finite",
            ));
        }
        if !self.drift.is_finite() {
            return Err(PricingError::invalid_parameter(
                "drift",
                self.drift,
                "must be finite",
            ));
        }
        if !self.params.satisfies_feller() {
            warn!(
                feller_ratio = self.params.feller_ratio(),
                "Feller condition violated, simulated variance may reach zero"
            );
        }
        Ok(())
    }

    fn evolve<R>(&self, s0: f64, v0: f64, n_steps: usize, rng: &mut R) -> (Vec<f64>, Vec<f64>)
    where
        R: NormalSource + ?Sized,
    {
        let shocks = self.draw_shocks(n_steps, rng);

        let dt = self.dt();
        let kappa = self.params.kappa();
        let theta = self.params.theta();
        let sigma = self.params.sigma();
        let milstein = 0.25 * sigma * sigma * dt;
        let policy = self.negative_variance;

        let mut spot = Vec::with_capacity(n_steps + 1);
        let mut variance = Vec::with_capacity(n_steps + 1);
        spot.push(s0);
        variance.push(v0);

        let mut s = s0;
        let mut v = v0;
        for (&w0, &w1) in shocks.asset.iter().zip(&shocks.variance) {
            let root = (policy.root_argument(v) * dt).sqrt();
            let next_s = s * (1.0 + self.drift * dt + root * w0);
            let next_v =
                v + kappa * (theta - v) * dt + sigma * root * w1 + milstein * (w1 * w1 - 1.0);

            s = next_s;
            v = policy.stored(next_v);
            spot.push(s);
            variance.push(v);
        }

        (spot, variance)
    }

    fn report(&self, path: &SimulatedPath) {
        debug!(
            points = path.len(),
            dt = path.dt(),
            drift = self.drift,
            policy = %self.negative_variance,
            negative_variance_steps = path.negative_variance_steps(),
            "Heston path simulated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimulationRng;
    use approx::assert_relative_eq;

    /// Replays a fixed sequence, then zeros.
    struct Scripted {
        values: Vec<f64>,
        next: usize,
    }

    impl NormalSource for Scripted {
        fn next_standard_normal(&mut self) -> f64 {
            let z = self.values.get(self.next).copied().unwrap_or(0.0);
            self.next += 1;
            z
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_single_step_by_hand() {
        let params = HestonParams::new(2.0, 0.04, 0.3, 0.0, 0.01).unwrap();
        let simulator = PathSimulator::new(params).with_drift(0.05);
        // Draw order: asset shock, then auxiliary shock
        let mut source = Scripted {
            values: vec![0.5, -1.0],
            next: 0,
        };

        let path = simulator.simulate_steps(100.0, 0.04, 1, &mut source).unwrap();

        let dt: f64 = 1.0 / 253.0;
        let root = (0.04 * dt).sqrt();
        let expected_s = 100.0 * (1.0 + 0.05 * dt + root * 0.5);
        let expected_v =
            0.04 + 2.0 * (0.04 - 0.04) * dt + 0.3 * root * -1.0 + 0.25 * 0.09 * dt * (1.0 - 1.0);
        assert_relative_eq!(path.spot()[1], expected_s, epsilon = 1e-14);
        assert_relative_eq!(path.variance()[1], expected_v, epsilon = 1e-14);
    }

    #[test]
    fn test_initial_state_preserved() {
        let simulator = PathSimulator::new(HestonParams::default());
        let path = simulator
            .simulate(123.0, 0.09, ymd(2024, 3, 1), ymd(2024, 3, 29), &mut SimulationRng::from_seed(3))
            .unwrap();
        assert_eq!(path.spot()[0], 123.0);
        assert_eq!(path.variance()[0], 0.09);
        assert_eq!(path.dates()[0], ymd(2024, 3, 1));
        assert_eq!(*path.dates().last().unwrap(), ymd(2024, 3, 29));
    }

    #[test]
    fn test_grid_too_short() {
        let simulator = PathSimulator::new(HestonParams::default());
        let mut rng = SimulationRng::from_seed(1);

        // Saturday to Sunday: no business days
        let err = simulator
            .simulate(100.0, 0.04, ymd(2024, 1, 6), ymd(2024, 1, 7), &mut rng)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidRange(_)));

        // Single business day
        let err = simulator
            .simulate(100.0, 0.04, ymd(2024, 1, 5), ymd(2024, 1, 7), &mut rng)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidRange(_)));

        // End before start
        let err = simulator
            .simulate(100.0, 0.04, ymd(2024, 2, 1), ymd(2024, 1, 1), &mut rng)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidRange(_)));
    }

    #[test]
    fn test_validation_precedes_drawing() {
        let simulator = PathSimulator::new(HestonParams::default());
        let mut source = Scripted {
            values: Vec::new(),
            next: 0,
        };
        assert!(simulator
            .simulate_steps(-1.0, 0.04, 10, &mut source)
            .is_err());
        assert!(simulator
            .simulate_steps(100.0, -0.04, 10, &mut source)
            .is_err());
        assert!(simulator.simulate_steps(100.0, 0.04, 0, &mut source).is_err());
        assert_eq!(source.next, 0);
    }

    #[test]
    fn test_rho_extremes_are_exact() {
        let asset = [0.1, -2.0, 1.3];
        let aux = [5.0, 5.0, 5.0];
        assert_eq!(correlate_shocks(1.0, &asset, &aux), asset.to_vec());
        assert_eq!(correlate_shocks(-1.0, &asset, &aux), vec![-0.1, 2.0, -1.3]);
    }

    #[test]
    fn test_absorb_never_stores_negative() {
        // Feller badly violated
        let params = HestonParams::new(0.5, 0.04, 1.0, -0.7, 0.0).unwrap();
        let simulator =
            PathSimulator::new(params).with_negative_variance(NegativeVariance::Absorb);
        let path = simulator
            .simulate_steps(100.0, 0.01, 2000, &mut SimulationRng::from_seed(11))
            .unwrap();
        assert!(path.min_variance() >= 0.0);
        assert!(path.spot().iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_truncate_keeps_negative_values() {
        let params = HestonParams::new(0.5, 0.04, 1.0, -0.7, 0.0).unwrap();
        let simulator = PathSimulator::new(params);
        let path = simulator
            .simulate_steps(100.0, 0.01, 2000, &mut SimulationRng::from_seed(11))
            .unwrap();
        assert!(path.negative_variance_steps() > 0);
        assert!(path.variance().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_step_is_one_business_day() {
        let simulator = PathSimulator::new(HestonParams::default())
            .with_drift(0.05)
            .with_negative_variance(NegativeVariance::Reflect);
        assert_relative_eq!(simulator.dt(), 1.0 / 253.0);

        let start = Date::from_ymd(2024, 1, 5).unwrap();
        let end = Date::from_ymd(2024, 1, 9).unwrap();
        let path = simulator
            .simulate(100.0, 0.04, start, end, &mut SimulationRng::from_seed(3))
            .unwrap();
        assert_relative_eq!(path.dt(), 1.0 / 253.0);
        let terminal = path.terminal().unwrap();
        assert_relative_eq!(terminal.time, 2.0 / 253.0);
    }
}
