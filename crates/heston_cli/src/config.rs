//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command-line flags.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`HESTON_*`)
//! 3. Config file
//! 4. Default values

use std::path::{Path, PathBuf};
use std::str::FromStr;

use heston_core::math::quadrature::QuadratureConfig;
use heston_core::types::PricingError;
use heston_models::analytical::{HestonPricer, PricerConfig};
use heston_models::models::HestonParams;
use heston_models::valuation::{FiniteDifference, NearExpiryPolicy, NEAR_EXPIRY_THRESHOLD};
use heston_simulation::simulation::{NegativeVariance, PathSimulator};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "HESTON_LOG_LEVEL";
/// Environment variable overriding the simulation seed.
pub const ENV_SEED: &str = "HESTON_SEED";
/// Environment variable overriding the integration cut-off.
pub const ENV_UPPER_BOUND: &str = "HESTON_UPPER_BOUND";
/// Environment variable overriding the near-expiry threshold.
pub const ENV_NEAR_EXPIRY_THRESHOLD: &str = "HESTON_NEAR_EXPIRY_THRESHOLD";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] PricingError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// `[model]` table: the five Heston parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub kappa: f64,
    pub theta: f64,
    pub sigma: f64,
    pub rho: f64,
    pub rate: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let params = HestonParams::default();
        Self {
            kappa: params.kappa(),
            theta: params.theta(),
            sigma: params.sigma(),
            rho: params.rho(),
            rate: params.rate(),
        }
    }
}

/// `[simulation]` table.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Asset drift; the model rate when absent.
    pub drift: Option<f64>,
    /// Seed; entropy-seeded when absent.
    pub seed: Option<u64>,
    pub negative_variance: NegativeVariance,
}

/// `[pricing]` table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    pub upper_bound: f64,
    pub max_subintervals: usize,
    pub abs_tolerance: f64,
    pub rel_tolerance: f64,
    pub near_expiry_threshold: f64,
    pub relative_bump: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let pricer = PricerConfig::default();
        Self {
            upper_bound: pricer.upper_bound,
            max_subintervals: pricer.quadrature.max_subintervals,
            abs_tolerance: pricer.quadrature.abs_tolerance,
            rel_tolerance: pricer.quadrature.rel_tolerance,
            near_expiry_threshold: NEAR_EXPIRY_THRESHOLD,
            relative_bump: FiniteDifference::default().relative_bump,
        }
    }
}

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    pub model: ModelConfig,
    pub simulation: SimulationConfig,
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `HESTON_*` overrides, reading each variable through `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.simulation.seed = Some(parse_env(ENV_SEED, &seed)?);
        }
        if let Some(bound) = lookup(ENV_UPPER_BOUND) {
            self.pricing.upper_bound = parse_env(ENV_UPPER_BOUND, &bound)?;
        }
        if let Some(threshold) = lookup(ENV_NEAR_EXPIRY_THRESHOLD) {
            self.pricing.near_expiry_threshold = parse_env(ENV_NEAR_EXPIRY_THRESHOLD, &threshold)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        let model = &mut self.model;
        for (target, value) in [
            (&mut model.kappa, cli.kappa),
            (&mut model.theta, cli.theta),
            (&mut model.sigma, cli.sigma),
            (&mut model.rho, cli.rho),
            (&mut model.rate, cli.rate),
        ] {
            if let Some(value) = value {
                *target = value;
            }
        }
        if let Some(drift) = cli.drift {
            self.simulation.drift = Some(drift);
        }
        if let Some(seed) = cli.seed {
            self.simulation.seed = Some(seed);
        }
        if let Some(policy) = cli.negative_variance {
            self.simulation.negative_variance = policy;
        }
        if let Some(bound) = cli.upper_bound {
            self.pricing.upper_bound = bound;
        }
        Ok(())
    }

    /// Validate the configuration by building every domain object once
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pricer()?;
        self.finite_difference()?;
        self.path_simulator()?;
        Ok(())
    }

    /// Validated model parameters
    pub fn heston_params(&self) -> Result<HestonParams, ConfigError> {
        let m = &self.model;
        Ok(HestonParams::new(m.kappa, m.theta, m.sigma, m.rho, m.rate)?)
    }

    /// Pricer settings from the `[pricing]` table
    pub fn pricer_config(&self) -> PricerConfig {
        PricerConfig {
            upper_bound: self.pricing.upper_bound,
            quadrature: QuadratureConfig {
                abs_tolerance: self.pricing.abs_tolerance,
                rel_tolerance: self.pricing.rel_tolerance,
                max_subintervals: self.pricing.max_subintervals,
            },
        }
    }

    /// Pricer built from the model and pricing tables
    pub fn pricer(&self) -> Result<HestonPricer, ConfigError> {
        Ok(HestonPricer::with_config(
            self.heston_params()?,
            self.pricer_config(),
        )?)
    }

    /// Near-expiry override
    pub fn near_expiry_policy(&self) -> Result<NearExpiryPolicy, ConfigError> {
        Ok(NearExpiryPolicy::new(self.pricing.near_expiry_threshold)?)
    }

    /// Finite-difference settings, carrying the near-expiry override
    pub fn finite_difference(&self) -> Result<FiniteDifference, ConfigError> {
        Ok(FiniteDifference::new(
            self.pricing.relative_bump,
            self.near_expiry_policy()?,
        )?)
    }

    /// Path simulator from the model and simulation tables
    pub fn path_simulator(&self) -> Result<PathSimulator, ConfigError> {
        let params = self.heston_params()?;
        let drift = self.simulation.drift.unwrap_or(params.rate());
        if !drift.is_finite() {
            return Err(PricingError::invalid_parameter("drift", drift, "must be finite").into());
        }
        Ok(PathSimulator::new(params)
            .with_drift(drift)
            .with_negative_variance(self.simulation.negative_variance))
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{} = {:?} cannot be parsed", key, value)))
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub kappa: Option<f64>,
    pub theta: Option<f64>,
    pub sigma: Option<f64>,
    pub rho: Option<f64>,
    pub rate: Option<f64>,
    pub drift: Option<f64>,
    pub seed: Option<u64>,
    pub negative_variance: Option<NegativeVariance>,
    pub upper_bound: Option<f64>,
}

/// Build configuration from all sources
pub fn build_config(cli: &CliOverrides) -> Result<AppConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliOverrides, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.apply_env_with(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}
