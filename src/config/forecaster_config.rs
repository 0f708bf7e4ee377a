//! Forecaster training configuration parsing from environment variables.
//!
//! These are training-time knobs only; nothing here changes at inference.

use super::parse_var;
use crate::application::ml::forecaster::{BoostingParameters, InitialEstimate};
use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct ForecasterEnvConfig {
    pub boosting: BoostingParameters,
}

impl ForecasterEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = BoostingParameters::default();

        let initial_estimate = match env::var("BOOST_INITIAL_ESTIMATE") {
            Ok(value) => value
                .parse::<InitialEstimate>()
                .context("Failed to parse BOOST_INITIAL_ESTIMATE")?,
            Err(_) => defaults.initial_estimate,
        };

        Ok(Self {
            boosting: BoostingParameters {
                n_rounds: parse_var("BOOST_ROUNDS", defaults.n_rounds)?,
                learning_rate: parse_var("BOOST_LEARNING_RATE", defaults.learning_rate)?,
                max_depth: parse_var("BOOST_MAX_DEPTH", defaults.max_depth)?,
                seed: parse_var("BOOST_SEED", defaults.seed)?,
                initial_estimate,
            },
        })
    }
}
