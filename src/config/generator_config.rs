//! Synthetic dataset configuration parsing from environment variables.

use super::parse_var;
use crate::application::generator::{DEFAULT_ROWS, DEFAULT_SEED};
use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Dataset location and synthetic generator settings
#[derive(Debug, Clone)]
pub struct GeneratorEnvConfig {
    pub dataset_path: PathBuf,
    pub seed: u64,
    pub rows: usize,
}

impl GeneratorEnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            dataset_path: env::var("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/supply_logs.csv")),
            seed: parse_var("GENERATOR_SEED", DEFAULT_SEED)?,
            rows: parse_var("GENERATOR_ROWS", DEFAULT_ROWS)?,
        })
    }
}
