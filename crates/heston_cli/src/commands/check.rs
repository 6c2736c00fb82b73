//! Check command implementation
//!
//! Prints the resolved model parameters, the Feller ratio and the reference
//! benchmark call so a configuration can be sanity-checked before use.

use std::io::{self, Write};

use crate::config::AppConfig;
use crate::Result;

/// Reference call: S0 = 100, V0 = 0.04, K = 100, tau = 1.
const BENCHMARK: (f64, f64, f64, f64) = (100.0, 0.04, 100.0, 1.0);

/// Run the check command
pub fn run(config: &AppConfig) -> Result<()> {
    report(config, io::stdout().lock())
}

/// Write the configuration report to `out`.
pub fn report<W: Write>(config: &AppConfig, mut out: W) -> Result<()> {
    let pricer = config.pricer()?;
    let params = pricer.params();

    writeln!(out, "Heston CLI v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out)?;
    writeln!(out, "Model parameters:")?;
    writeln!(out, "  kappa: {}", params.kappa())?;
    writeln!(out, "  theta: {}", params.theta())?;
    writeln!(out, "  sigma: {}", params.sigma())?;
    writeln!(out, "  rho:   {}", params.rho())?;
    writeln!(out, "  rate:  {}", params.rate())?;
    writeln!(
        out,
        "  Feller ratio 2*kappa*theta/sigma^2: {:.4} ({})",
        params.feller_ratio(),
        if params.satisfies_feller() {
            "satisfied"
        } else {
            "violated"
        }
    )?;
    writeln!(out)?;
    writeln!(out, "Pricing:")?;
    writeln!(out, "  upper bound:      {}", config.pricing.upper_bound)?;
    writeln!(out, "  max subintervals: {}", config.pricing.max_subintervals)?;
    writeln!(
        out,
        "  near expiry:      tau < {}",
        config.pricing.near_expiry_threshold
    )?;

    let (s0, v0, strike, tau) = BENCHMARK;
    let outcome = pricer.call_price_detailed(s0, v0, strike, tau)?;
    writeln!(
        out,
        "  benchmark call (S0={}, V0={}, K={}, tau={}): {:.6} [{} subintervals]",
        s0, v0, strike, tau, outcome.price, outcome.subintervals
    )?;
    if let Some(warning) = outcome.warning {
        writeln!(out, "  warning: {}", warning)?;
    }
    writeln!(out)?;
    writeln!(out, "Simulation:")?;
    writeln!(
        out,
        "  drift: {}",
        config.simulation.drift.unwrap_or(params.rate())
    )?;
    match config.simulation.seed {
        Some(seed) => writeln!(out, "  seed:  {}", seed)?,
        None => writeln!(out, "  seed:  (entropy)")?,
    }
    writeln!(
        out,
        "  negative variance: {}",
        config.simulation.negative_variance
    )?;
    Ok(())
}
