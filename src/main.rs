//! SiliconTrace - scenario risk evaluation
//!
//! Trains the demand forecaster once, evaluates a single market scenario and
//! prints the bullwhip risk report together with the provenance ledger status.
//!
//! # Usage
//! ```sh
//! cargo run -- --base-demand 150 --tech-trend 2.0 --risk-index 0.5
//! ```
//!
//! # Environment Variables
//! - `DATASET_PATH` - Training CSV (default: data/supply_logs.csv)
//! - `LEDGER_EXECUTABLE`, `LEDGER_STATUS_FILE`, `LEDGER_TIMEOUT_MS` - Ledger adapter
//! - `OBSERVABILITY_ENABLED` - Print Prometheus metrics after the report (default: false)

use anyhow::{Context, Result};
use clap::Parser;
use silicontrace::application::generator::SyntheticSeriesGenerator;
use silicontrace::application::ml::{DemandForecaster, ModelCache};
use silicontrace::application::pipeline::ScenarioPipeline;
use silicontrace::config::Config;
use silicontrace::domain::errors::ForecastError;
use silicontrace::domain::ports::{LedgerStatus, LedgerStatusProvider};
use silicontrace::domain::supply::{DemandDataset, ScenarioInput};
use silicontrace::infrastructure::observability::Metrics;
use silicontrace::infrastructure::{CsvDatasetRepository, SubprocessLedgerProvider};
use silicontrace::interfaces::ScenarioReport;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base retail demand in units (declared range 50-300)
    #[arg(long, default_value_t = 150.0)]
    base_demand: f64,

    /// Tech trend multiplier (declared range 1.0-3.0)
    #[arg(long, default_value_t = 2.0)]
    tech_trend: f64,

    /// Geopolitical risk index (declared range 0.0-1.0)
    #[arg(long, default_value_t = 0.5)]
    risk_index: f64,

    /// Training CSV; overrides DATASET_PATH
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Train on an in-memory synthetic series instead of the CSV
    #[arg(long)]
    synthetic: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr so that --json output stays clean
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let metrics = Metrics::new()?;

    // Ledger check is independent of the forecast and never fatal
    let ledger = SubprocessLedgerProvider::new(
        config.ledger.executable.clone(),
        config.ledger.status_file.clone(),
        config.ledger.timeout,
    );
    let ledger_task = tokio::spawn(async move { ledger.current_status().await });

    let dataset_path = cli
        .dataset
        .clone()
        .unwrap_or_else(|| config.generator.dataset_path.clone());
    let cache = ModelCache::new(DemandForecaster::new(config.forecaster.boosting));

    let started = Instant::now();
    let model = cache
        .get_or_train(|| {
            if cli.synthetic {
                let records = SyntheticSeriesGenerator::with_seed(config.generator.seed)
                    .and_then(|generator| generator.generate(config.generator.rows))
                    .map_err(|e| ForecastError::data_unavailable("synthetic generator", e.to_string()))?;
                Ok(DemandDataset::from_records(&records))
            } else {
                CsvDatasetRepository::new(&dataset_path).load()
            }
        })
        .with_context(|| {
            format!(
                "Failed to train forecaster from {:?}. Run `generate_data` first or pass --synthetic.",
                dataset_path
            )
        })?;
    metrics.record_training(started.elapsed(), model.training_rows());

    let pipeline = ScenarioPipeline::new(model, config.risk.policy);
    info!("Forecaster ready: {}", pipeline.predictor_name());

    let input = ScenarioInput::new(cli.base_demand, cli.tech_trend, cli.risk_index);
    let assessment = pipeline
        .evaluate_input(&input)
        .context("Scenario evaluation failed")?;
    metrics.record_assessment(&assessment);

    let ledger_status = ledger_task.await.unwrap_or_else(|e| {
        warn!("Ledger status task failed: {}", e);
        LedgerStatus::unknown()
    });
    metrics.record_ledger(ledger_status.status);

    let report = ScenarioReport::new(assessment, ledger_status);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }

    if config.observability.enabled {
        println!("{}", metrics.render());
    }

    Ok(())
}
