//! Configuration module for SiliconTrace.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Generator, Forecaster, Risk, Ledger, and Observability.

mod forecaster_config;
mod generator_config;
mod ledger_config;
mod observability_config;
mod risk_env_config;

pub use forecaster_config::ForecasterEnvConfig;
pub use generator_config::GeneratorEnvConfig;
pub use ledger_config::LedgerEnvConfig;
pub use observability_config::ObservabilityEnvConfig;
pub use risk_env_config::RiskEnvConfig;

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Main application configuration, one sub-config per concern.
#[derive(Debug, Clone)]
pub struct Config {
    pub generator: GeneratorEnvConfig,
    pub forecaster: ForecasterEnvConfig,
    pub risk: RiskEnvConfig,
    pub ledger: LedgerEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            generator: GeneratorEnvConfig::from_env().context("Failed to load generator config")?,
            forecaster: ForecasterEnvConfig::from_env()
                .context("Failed to load forecaster config")?,
            risk: RiskEnvConfig::from_env().context("Failed to load risk config")?,
            ledger: LedgerEnvConfig::from_env().context("Failed to load ledger config")?,
            observability: ObservabilityEnvConfig::from_env(),
        })
    }
}

/// Reads `key`, falling back to `default` when unset. A set but unparsable value is an error.
pub(crate) fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .context(format!("Failed to parse {}", key)),
        Err(_) => Ok(default),
    }
}
