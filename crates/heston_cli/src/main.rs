//! Heston CLI - path simulation and option pricing from the command line
//!
//! # Commands
//!
//! - `heston simulate --spot <S0> --variance <V0> --start <DATE> --end <DATE>`
//!   - Simulate one business-day path and write `date,spot,variance` CSV
//! - `heston price --quotes <FILE>` - Price a CSV of call quotes
//! - `heston check` - Show the resolved model and the benchmark price
//!
//! # Configuration
//!
//! Settings resolve from defaults, an optional TOML file (`--config`),
//! `HESTON_*` environment variables and finally command-line flags.
//! `RUST_LOG` overrides the configured log level.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use heston_core::types::Date;
use heston_simulation::simulation::NegativeVariance;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use config::{build_config, CliOverrides, LogLevel};
pub use error::{CliError, Result};

/// Heston stochastic-volatility simulator and pricer
#[derive(Parser)]
#[command(name = "heston")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(flatten)]
    model: ModelArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Model parameter overrides
#[derive(Args)]
struct ModelArgs {
    /// Mean-reversion speed of the variance
    #[arg(long, global = true)]
    kappa: Option<f64>,

    /// Long-run variance
    #[arg(long, global = true)]
    theta: Option<f64>,

    /// Volatility of variance
    #[arg(long, global = true)]
    sigma: Option<f64>,

    /// Correlation between asset and variance shocks
    #[arg(long, global = true, allow_negative_numbers = true)]
    rho: Option<f64>,

    /// Risk-free rate
    #[arg(long, global = true, allow_negative_numbers = true)]
    rate: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate an asset/variance path over business days
    Simulate {
        /// Initial asset price
        #[arg(long)]
        spot: f64,

        /// Initial variance
        #[arg(long)]
        variance: f64,

        /// First grid date (YYYY-MM-DD)
        #[arg(long)]
        start: Date,

        /// Last grid date (YYYY-MM-DD)
        #[arg(long)]
        end: Date,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Asset drift (defaults to the model rate)
        #[arg(long, allow_negative_numbers = true)]
        drift: Option<f64>,

        /// Negative-variance policy (truncate, reflect, absorb)
        #[arg(long)]
        negative_variance: Option<NegativeVariance>,

        /// Output CSV file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Price European calls from a CSV of quotes
    Price {
        /// Quotes CSV with columns spot, variance, strike, tau
        #[arg(short, long)]
        quotes: PathBuf,

        /// Also compute delta and variance sensitivity
        #[arg(long)]
        greeks: bool,

        /// Integration cut-off
        #[arg(long)]
        upper_bound: Option<f64>,

        /// Output CSV file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check the resolved configuration
    Check,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            kappa: self.model.kappa,
            theta: self.model.theta,
            sigma: self.model.sigma,
            rho: self.model.rho,
            rate: self.model.rate,
            ..CliOverrides::default()
        };
        match &self.command {
            Commands::Simulate {
                seed,
                drift,
                negative_variance,
                ..
            } => {
                overrides.seed = *seed;
                overrides.drift = *drift;
                overrides.negative_variance = *negative_variance;
            }
            Commands::Price { upper_bound, .. } => {
                overrides.upper_bound = *upper_bound;
            }
            Commands::Check => {}
        }
        overrides
    }
}

/// Initialise tracing, letting `RUST_LOG` take precedence over the config
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.overrides())?;

    init_tracing(config.log_level);
    info!(log_level = %config.log_level, "Configuration loaded");

    match cli.command {
        Commands::Simulate {
            spot,
            variance,
            start,
            end,
            output,
            ..
        } => commands::simulate::run(&config, spot, variance, start, end, output.as_deref()),
        Commands::Price {
            quotes,
            greeks,
            output,
            ..
        } => commands::price::run(&config, &quotes, greeks, output.as_deref()),
        Commands::Check => commands::check::run(&config),
    }
}
