//! Statistical and reproducibility properties of the path simulator.
//!
//! # Test Categories
//!
//! 1. **Shock structure**: correlation and marginals of the driving shocks
//! 2. **Determinism**: seeded runs reproduce bit-for-bit
//! 3. **Calendar grid**: dates, length and ordering of dated paths
//! 4. **Moments**: terminal spot mean under the simulated drift

use approx::assert_abs_diff_eq;
use heston_core::types::{Date, PricingError};
use heston_models::models::HestonParams;
use heston_simulation::rng::SimulationRng;
use heston_simulation::simulation::{correlate_shocks, NegativeVariance, PathSimulator};
use proptest::prelude::*;

fn ymd(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn params_with_rho(rho: f64) -> HestonParams {
    HestonParams::new(2.0, 0.04, 0.3, rho, 0.01).unwrap()
}

fn correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;
    let cov: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    let vx: f64 = xs.iter().map(|x| (x - mx).powi(2)).sum();
    let vy: f64 = ys.iter().map(|y| (y - my).powi(2)).sum();
    cov / (vx * vy).sqrt()
}

// ============================================================================
// Shock structure
// ============================================================================

#[test]
fn test_zero_rho_shocks_are_uncorrelated() {
    let simulator = PathSimulator::new(params_with_rho(0.0));
    let shocks = simulator.draw_shocks(50_000, &mut SimulationRng::from_seed(17));

    let rho_hat = correlation(&shocks.asset, &shocks.variance);
    assert!(rho_hat.abs() < 0.02, "sample correlation {rho_hat}");
}

#[test]
fn test_unit_rho_shocks_are_identical() {
    let up = PathSimulator::new(params_with_rho(1.0))
        .draw_shocks(1_000, &mut SimulationRng::from_seed(5));
    assert_eq!(up.variance, up.asset);

    let down = PathSimulator::new(params_with_rho(-1.0))
        .draw_shocks(1_000, &mut SimulationRng::from_seed(5));
    let negated: Vec<f64> = down.asset.iter().map(|w| -w).collect();
    assert_eq!(down.variance, negated);
}

#[test]
fn test_target_correlation_recovered() {
    let simulator = PathSimulator::new(params_with_rho(-0.5));
    let shocks = simulator.draw_shocks(50_000, &mut SimulationRng::from_seed(23));
    let rho_hat = correlation(&shocks.asset, &shocks.variance);
    assert_abs_diff_eq!(rho_hat, -0.5, epsilon = 0.02);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_correlated_shocks_keep_unit_variance(rho in -1.0f64..=1.0, seed in any::<u64>()) {
        let shocks = PathSimulator::new(params_with_rho(rho))
            .draw_shocks(20_000, &mut SimulationRng::from_seed(seed));
        let n = shocks.variance.len() as f64;
        let mean = shocks.variance.iter().sum::<f64>() / n;
        let var = shocks.variance.iter().map(|w| (w - mean).powi(2)).sum::<f64>() / (n - 1.0);
        prop_assert!((var - 1.0).abs() < 0.06, "variance {}", var);
    }

    #[test]
    fn prop_correlate_shocks_is_linear(
        rho in -1.0f64..=1.0,
        w in -5.0f64..5.0,
        z in -5.0f64..5.0,
    ) {
        let w1 = correlate_shocks(rho, &[w], &[z])[0];
        let expected = rho * w + (1.0 - rho * rho).sqrt() * z;
        prop_assert!((w1 - expected).abs() < 1e-12);
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_seeded_simulation_is_reproducible() {
    let simulator = PathSimulator::new(HestonParams::default());
    let start = ymd(2024, 1, 2);
    let end = ymd(2024, 12, 31);

    let first = simulator
        .simulate(100.0, 0.04, start, end, &mut SimulationRng::from_seed(42))
        .unwrap();
    let second = simulator
        .simulate(100.0, 0.04, start, end, &mut SimulationRng::from_seed(42))
        .unwrap();
    let other = simulator
        .simulate(100.0, 0.04, start, end, &mut SimulationRng::from_seed(43))
        .unwrap();

    assert_eq!(first, second);
    assert_ne!(first.spot(), other.spot());
}

#[test]
fn test_shared_stream_continues_between_paths() {
    let simulator = PathSimulator::new(HestonParams::default());
    let mut rng = SimulationRng::from_seed(9);
    let a = simulator.simulate_steps(100.0, 0.04, 10, &mut rng).unwrap();
    let b = simulator.simulate_steps(100.0, 0.04, 10, &mut rng).unwrap();
    assert_ne!(a.spot(), b.spot());
}

// ============================================================================
// Calendar grid
// ============================================================================

#[test]
fn test_dated_grid_is_business_days() {
    let simulator = PathSimulator::new(HestonParams::default());
    let path = simulator
        .simulate(
            100.0,
            0.04,
            ymd(2024, 1, 1),
            ymd(2024, 12, 31),
            &mut SimulationRng::from_seed(1),
        )
        .unwrap();

    assert_eq!(path.len(), 262);
    assert!(path.dates().iter().all(|d| d.is_business_day()));
    assert!(path.dates().windows(2).all(|w| w[0] < w[1]));
    assert_eq!(path.points().count(), path.len());
}

#[test]
fn test_two_day_grid_is_minimal() {
    let simulator = PathSimulator::new(HestonParams::default());
    let path = simulator
        .simulate(
            100.0,
            0.04,
            ymd(2024, 1, 5),
            ymd(2024, 1, 8),
            &mut SimulationRng::from_seed(1),
        )
        .unwrap();
    assert_eq!(path.len(), 2);
}

#[test]
fn test_weekend_range_rejected() {
    let simulator = PathSimulator::new(HestonParams::default());
    let err = simulator
        .simulate(
            100.0,
            0.04,
            ymd(2024, 1, 6),
            ymd(2024, 1, 8),
            &mut SimulationRng::from_seed(1),
        )
        .unwrap_err();
    assert!(matches!(err, PricingError::InvalidRange(_)));
}

// ============================================================================
// Moments
// ============================================================================

#[test]
fn test_terminal_mean_follows_drift() {
    // E[S_T] = S0 · (1 + mu·dt)^n for the Euler asset step
    let simulator = PathSimulator::new(HestonParams::default())
        .with_drift(0.05)
        .with_negative_variance(NegativeVariance::Truncate);
    let mut rng = SimulationRng::from_seed(2024);

    let n_paths = 4_000;
    let n_steps = 253;
    let mean = (0..n_paths)
        .map(|_| {
            let path = simulator.simulate_steps(100.0, 0.04, n_steps, &mut rng).unwrap();
            path.spot()[n_steps]
        })
        .sum::<f64>()
        / n_paths as f64;

    let expected = 100.0 * (1.0 + 0.05 / 253.0_f64).powi(n_steps as i32);
    // Standard error is about 20 / sqrt(4000) ≈ 0.32
    assert_abs_diff_eq!(mean, expected, epsilon = 1.5);
}
