//! Simulated asset/variance path.

use heston_core::types::Date;

/// One grid point of a simulated path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    /// Grid index, 0 for the initial state.
    pub step: usize,
    /// Model time in years since the start, `step · dt`.
    pub time: f64,
    /// Calendar date, absent for undated paths.
    pub date: Option<Date>,
    /// Asset value.
    pub spot: f64,
    /// Variance value; may be negative under some policies.
    pub variance: f64,
}

/// A fully materialised path: asset and variance over an ascending grid.
///
/// Index 0 holds the initial asset price and variance exactly as supplied.
/// Negative variance values are kept as simulated; see
/// [`NegativeVariance`](super::NegativeVariance).
///
/// Serialisable for export only: a path is only ever built by the simulator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulatedPath {
    dates: Vec<Date>,
    spot: Vec<f64>,
    variance: Vec<f64>,
    dt: f64,
}

impl SimulatedPath {
    pub(crate) fn new(dates: Vec<Date>, spot: Vec<f64>, variance: Vec<f64>, dt: f64) -> Self {
        debug_assert_eq!(spot.len(), variance.len());
        debug_assert!(dates.is_empty() || dates.len() == spot.len());
        Self {
            dates,
            spot,
            variance,
            dt,
        }
    }

    /// Number of grid points (including the initial state).
    #[inline]
    pub fn len(&self) -> usize {
        self.spot.len()
    }

    /// Whether the path has no grid points. Never true for a simulated path.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spot.is_empty()
    }

    /// Grid dates in ascending order; empty for undated paths.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Asset values.
    pub fn spot(&self) -> &[f64] {
        &self.spot
    }

    /// Variance values.
    pub fn variance(&self) -> &[f64] {
        &self.variance
    }

    /// Time step in years.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The two-row matrix view: `[spot, variance]`.
    pub fn as_rows(&self) -> [&[f64]; 2] {
        [&self.spot, &self.variance]
    }

    /// Iterate over grid points in ascending order.
    pub fn points(&self) -> impl Iterator<Item = PathPoint> + '_ {
        self.spot
            .iter()
            .zip(&self.variance)
            .enumerate()
            .map(move |(step, (&spot, &variance))| PathPoint {
                step,
                time: step as f64 * self.dt,
                date: self.dates.get(step).copied(),
                spot,
                variance,
            })
    }

    /// Final grid point.
    pub fn terminal(&self) -> Option<PathPoint> {
        self.points().last()
    }

    /// Smallest simulated variance.
    pub fn min_variance(&self) -> f64 {
        self.variance.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Number of grid points whose stored variance is below zero.
    pub fn negative_variance_steps(&self) -> usize {
        self.variance.iter().filter(|&&v| v < 0.0).count()
    }
}
