//! Quadrature configuration types.

use num_traits::Float;

/// Configuration for adaptive quadrature.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerances (e.g., `f64`)
///
/// # Example
///
/// ```
/// use heston_core::math::quadrature::QuadratureConfig;
///
/// let config: QuadratureConfig<f64> = QuadratureConfig::default();
/// assert_eq!(config.max_subintervals, 50);
///
/// let custom = QuadratureConfig {
///     abs_tolerance: 1e-12,
///     rel_tolerance: 1e-12,
///     max_subintervals: 500,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureConfig<T: Float> {
    /// Absolute error tolerance.
    pub abs_tolerance: T,

    /// Relative error tolerance, applied to the magnitude of the running
    /// integral estimate.
    pub rel_tolerance: T,

    /// Maximum number of subintervals before the integrator gives up and
    /// reports a non-converged result.
    pub max_subintervals: usize,
}

impl<T: Float> Default for QuadratureConfig<T> {
    /// Default values:
    /// - `abs_tolerance`: 1.49e-8
    /// - `rel_tolerance`: 1.49e-8
    /// - `max_subintervals`: 50
    fn default() -> Self {
        Self {
            abs_tolerance: T::from(1.49e-8).unwrap_or(T::epsilon()),
            rel_tolerance: T::from(1.49e-8).unwrap_or(T::epsilon()),
            max_subintervals: 50,
        }
    }
}

impl<T: Float> QuadratureConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if either tolerance is not positive or `max_subintervals == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use heston_core::math::quadrature::QuadratureConfig;
    ///
    /// let config = QuadratureConfig::new(1e-10, 1e-10, 200);
    /// assert_eq!(config.max_subintervals, 200);
    /// ```
    pub fn new(abs_tolerance: T, rel_tolerance: T, max_subintervals: usize) -> Self {
        assert!(abs_tolerance > T::zero(), "abs_tolerance must be positive");
        assert!(rel_tolerance > T::zero(), "rel_tolerance must be positive");
        assert!(max_subintervals > 0, "max_subintervals must be > 0");
        Self {
            abs_tolerance,
            rel_tolerance,
            max_subintervals,
        }
    }

    /// Tight tolerances (1e-12) and a large subdivision budget (1000).
    pub fn high_precision() -> Self {
        Self {
            abs_tolerance: T::from(1e-12).unwrap_or(T::epsilon()),
            rel_tolerance: T::from(1e-12).unwrap_or(T::epsilon()),
            max_subintervals: 1000,
        }
    }

    /// Relaxed tolerances (1e-6) and a small budget (20).
    pub fn fast() -> Self {
        Self {
            abs_tolerance: T::from(1e-6).unwrap_or(T::epsilon()),
            rel_tolerance: T::from(1e-6).unwrap_or(T::epsilon()),
            max_subintervals: 20,
        }
    }

    /// Tolerance the integrator must meet for a running estimate `value`.
    #[inline]
    pub fn tolerance_for(&self, value: T) -> T {
        self.abs_tolerance.max(self.rel_tolerance * value.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: QuadratureConfig<f64> = QuadratureConfig::default();
        assert!((config.abs_tolerance - 1.49e-8).abs() < 1e-20);
        assert!((config.rel_tolerance - 1.49e-8).abs() < 1e-20);
        assert_eq!(config.max_subintervals, 50);
    }

    #[test]
    #[should_panic(expected = "abs_tolerance must be positive")]
    fn test_new_config_zero_abs_tolerance_panics() {
        let _: QuadratureConfig<f64> = QuadratureConfig::new(0.0, 1e-8, 50);
    }

    #[test]
    #[should_panic(expected = "max_subintervals must be > 0")]
    fn test_new_config_zero_subintervals_panics() {
        let _: QuadratureConfig<f64> = QuadratureConfig::new(1e-8, 1e-8, 0);
    }

    #[test]
    fn test_presets_are_ordered() {
        let precise: QuadratureConfig<f64> = QuadratureConfig::high_precision();
        let fast: QuadratureConfig<f64> = QuadratureConfig::fast();
        assert!(precise.abs_tolerance < fast.abs_tolerance);
        assert!(precise.max_subintervals > fast.max_subintervals);
    }

    #[test]
    fn test_tolerance_for_switches_to_relative() {
        let config: QuadratureConfig<f64> = QuadratureConfig::new(1e-8, 1e-6, 10);
        assert_eq!(config.tolerance_for(0.0), 1e-8);
        assert!((config.tolerance_for(-100.0) - 1e-4).abs() < 1e-18);
    }

    #[test]
    fn test_config_with_f32() {
        let config: QuadratureConfig<f32> = QuadratureConfig::default();
        assert!(config.abs_tolerance > 0.0);
    }
}
