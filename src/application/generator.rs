//! Synthetic semiconductor supply history.
//!
//! Produces the ground truth the forecaster learns from: seasonal consumer
//! demand, a slow technology trend, Beta-distributed logistics risk, and wafer
//! orders that overreact to retail orders (the bullwhip law).

use crate::domain::errors::GeneratorError;
use crate::domain::supply::types::HistoricalRecord;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Beta, Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::info;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_ROWS: usize = 5000;

/// Shape of the generated series. `Default` is the reference law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorParameters {
    // Consumer demand seasonality
    pub demand_baseline: f64,
    pub demand_amplitude: f64,
    pub season_length_days: f64,
    // Technology trend
    pub trend_growth: f64,
    pub trend_cycle_amplitude: f64,
    /// Length of one full tech cycle in days. `2π·1000` yields `sin(day / 1000)`.
    pub trend_cycle_days: f64,
    // Logistics risk ~ Beta(alpha, beta)
    pub risk_alpha: f64,
    pub risk_beta: f64,
    // Noise
    pub retail_noise_std: f64,
    pub wafer_noise_std: f64,
    // Bullwhip law
    pub structural_amplification: f64,
    pub risk_amplification: f64,
}

impl Default for GeneratorParameters {
    fn default() -> Self {
        Self {
            demand_baseline: 100.0,
            demand_amplitude: 20.0,
            season_length_days: 365.0,
            trend_growth: 0.5,
            trend_cycle_amplitude: 0.3,
            trend_cycle_days: 2.0 * PI * 1000.0,
            risk_alpha: 2.0,
            risk_beta: 10.0,
            retail_noise_std: 5.0,
            wafer_noise_std: 10.0,
            structural_amplification: 1.3,
            risk_amplification: 0.5,
        }
    }
}

pub struct SyntheticSeriesGenerator {
    seed: u64,
    params: GeneratorParameters,
    risk_dist: Beta<f64>,
    retail_noise: Normal<f64>,
    wafer_noise: Normal<f64>,
}

impl SyntheticSeriesGenerator {
    pub fn new(seed: u64, params: GeneratorParameters) -> Result<Self, GeneratorError> {
        if params.season_length_days <= 0.0 || params.trend_cycle_days <= 0.0 {
            return Err(GeneratorError::InvalidParameter {
                name: "cycle length",
                reason: "season and trend cycle lengths must be positive".to_string(),
            });
        }

        let risk_dist = Beta::new(params.risk_alpha, params.risk_beta).map_err(|e| {
            GeneratorError::InvalidParameter {
                name: "risk_alpha/risk_beta",
                reason: e.to_string(),
            }
        })?;
        let retail_noise = Normal::new(0.0, params.retail_noise_std).map_err(|e| {
            GeneratorError::InvalidParameter {
                name: "retail_noise_std",
                reason: e.to_string(),
            }
        })?;
        let wafer_noise = Normal::new(0.0, params.wafer_noise_std).map_err(|e| {
            GeneratorError::InvalidParameter {
                name: "wafer_noise_std",
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            seed,
            params,
            risk_dist,
            retail_noise,
            wafer_noise,
        })
    }

    /// Reference law with the given seed.
    pub fn with_seed(seed: u64) -> Result<Self, GeneratorError> {
        Self::new(seed, GeneratorParameters::default())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn params(&self) -> &GeneratorParameters {
        &self.params
    }

    pub fn base_demand(&self, day: u32) -> f64 {
        let p = &self.params;
        p.demand_baseline + p.demand_amplitude * (2.0 * PI * day as f64 / p.season_length_days).sin()
    }

    /// Unclamped: parameter sets with a large cycle amplitude can go below zero.
    pub fn tech_trend(&self, day: u32, rows: usize) -> f64 {
        let p = &self.params;
        let progress = if rows == 0 { 0.0 } else { day as f64 / rows as f64 };
        1.0 + p.trend_growth * progress
            + p.trend_cycle_amplitude * (2.0 * PI * day as f64 / p.trend_cycle_days).sin()
    }

    /// Generates `rows` records for days `1..=rows`.
    ///
    /// Each call starts from a fresh RNG seeded with `self.seed`, so repeated
    /// calls return identical series. Day numbers are `u32`, which bounds `rows`.
    pub fn generate(&self, rows: usize) -> Result<Vec<HistoricalRecord>, GeneratorError> {
        let last_day = u32::try_from(rows).map_err(|_| GeneratorError::InvalidParameter {
            name: "rows",
            reason: format!("{} exceeds the largest day number {}", rows, u32::MAX),
        })?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let p = &self.params;

        let records: Vec<HistoricalRecord> = (1..=last_day)
            .map(|day| {
                let base_demand = self.base_demand(day);
                let tech_trend = self.tech_trend(day, rows);
                let risk = self.risk_dist.sample(&mut rng);

                let retail_orders = base_demand * tech_trend + self.retail_noise.sample(&mut rng);
                let wafer_orders = retail_orders * p.structural_amplification
                    + retail_orders * risk * p.risk_amplification
                    + self.wafer_noise.sample(&mut rng);

                HistoricalRecord {
                    day,
                    base_demand: round_to(base_demand, 2),
                    tech_trend_multiplier: round_to(tech_trend, 2),
                    geopolitical_risk: round_to(risk, 3),
                    retail_orders: round_to(retail_orders, 0),
                    wafer_orders: round_to(wafer_orders, 0),
                }
            })
            .collect();

        info!(
            "Generated {} days of synthetic supply history (seed {})",
            records.len(),
            self.seed
        );
        Ok(records)
    }
}

/// Half-to-even rounding at a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}
