//! Writes the synthetic supply-chain history used to train the forecaster.
//!
//! ```sh
//! cargo run --bin generate_data -- --rows 5000 --seed 42
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use silicontrace::application::generator::SyntheticSeriesGenerator;
use silicontrace::config::Config;
use silicontrace::infrastructure::CsvDatasetRepository;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output CSV path (default: DATASET_PATH or data/supply_logs.csv)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Number of daily rows (default: GENERATOR_ROWS or 5000)
    #[arg(long)]
    rows: Option<usize>,

    /// Random seed (default: GENERATOR_SEED or 42)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let output = args.output.unwrap_or(config.generator.dataset_path);
    let rows = args.rows.unwrap_or(config.generator.rows);
    let seed = args.seed.unwrap_or(config.generator.seed);

    let generator = SyntheticSeriesGenerator::with_seed(seed)?;
    let records = generator.generate(rows)?;

    let repository = CsvDatasetRepository::new(&output);
    repository
        .save(&records)
        .with_context(|| format!("Failed to write dataset to {:?}", output))?;

    info!("Generated {} rows (seed {}) -> {:?}", records.len(), seed, output);
    if let Some(last) = records.last() {
        println!(
            "Day {}: base {:.2}, trend {:.2}, risk {:.3}, retail {}, wafers {}",
            last.day,
            last.base_demand,
            last.tech_trend_multiplier,
            last.geopolitical_risk,
            last.retail_orders,
            last.wafer_orders
        );
    }
    Ok(())
}
