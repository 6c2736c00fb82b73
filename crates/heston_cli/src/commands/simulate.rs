//! Simulate command implementation
//!
//! Simulates one asset/variance path over the business days between two
//! dates and writes it as `date,spot,variance` CSV.

use std::io::Write;
use std::path::Path;

use heston_core::types::Date;
use heston_simulation::rng::SimulationRng;
use heston_simulation::simulation::SimulatedPath;
use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::Result;

#[derive(Serialize)]
struct PathRow {
    date: Option<Date>,
    spot: f64,
    variance: f64,
}

/// Run the simulate command
pub fn run(
    config: &AppConfig,
    spot: f64,
    variance: f64,
    start: Date,
    end: Date,
    output: Option<&Path>,
) -> Result<()> {
    let simulator = config.path_simulator()?;
    let mut rng = match config.simulation.seed {
        Some(seed) => SimulationRng::from_seed(seed),
        None => SimulationRng::from_entropy(),
    };

    info!("Starting simulation...");
    info!("  Grid: {} to {}", start, end);
    info!("  Seed: {}", rng.seed());
    info!("  Negative variance: {}", simulator.negative_variance());

    let path = simulator.simulate(spot, variance, start, end, &mut rng)?;
    write_path(&path, super::open_output(output)?)?;

    info!(
        points = path.len(),
        negative_variance_steps = path.negative_variance_steps(),
        "Simulation complete"
    );
    Ok(())
}

/// Write a path as CSV with a `date,spot,variance` header.
pub fn write_path<W: Write>(path: &SimulatedPath, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for point in path.points() {
        csv.serialize(PathRow {
            date: point.date,
            spot: point.spot,
            variance: point.variance,
        })?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use heston_models::models::HestonParams;
    use heston_simulation::simulation::PathSimulator;

    #[test]
    fn test_write_path_csv() {
        let simulator = PathSimulator::new(HestonParams::default());
        let mut rng = SimulationRng::from_seed(7);
        let start = Date::from_ymd(2024, 1, 5).unwrap();
        let end = Date::from_ymd(2024, 1, 9).unwrap();
        let path = simulator
            .simulate(100.0, 0.04, start, end, &mut rng)
            .unwrap();

        let mut buf = Vec::new();
        write_path(&path, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "date,spot,variance");
        assert_eq!(lines[1], "2024-01-05,100.0,0.04");
        assert!(lines[2].starts_with("2024-01-08,"));
        assert!(lines[3].starts_with("2024-01-09,"));
    }

    #[test]
    fn test_seeded_runs_write_identical_output() {
        let simulator = PathSimulator::new(HestonParams::default());
        let start = Date::from_ymd(2024, 3, 1).unwrap();
        let end = Date::from_ymd(2024, 3, 29).unwrap();

        let render = |seed| {
            let mut rng = SimulationRng::from_seed(seed);
            let path = simulator
                .simulate(100.0, 0.04, start, end, &mut rng)
                .unwrap();
            let mut buf = Vec::new();
            write_path(&path, &mut buf).unwrap();
            buf
        };

        assert_eq!(render(11), render(11));
        assert_ne!(render(11), render(12));
    }
}
