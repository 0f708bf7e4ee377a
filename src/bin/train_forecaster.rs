//! Offline training run: hold-out accuracy plus a supply-crunch probe.
//!
//! ```sh
//! cargo run --release --bin train_forecaster -- --input data/supply_logs.csv
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use silicontrace::application::ml::evaluation::{DEFAULT_TEST_FRACTION, EvaluationReport, holdout_evaluation};
use silicontrace::application::ml::{DemandForecaster, TrainedModel};
use silicontrace::config::Config;
use silicontrace::domain::ports::DemandPredictor;
use silicontrace::domain::risk::bullwhip::BullwhipRiskScorer;
use silicontrace::domain::supply::FeatureVector;
use silicontrace::infrastructure::CsvDatasetRepository;
use silicontrace::infrastructure::observability::Metrics;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to training data CSV (default: DATASET_PATH)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    test_fraction: f64,

    /// Disable train/test split (train on 100% of data). Use after validation.
    #[arg(long)]
    no_split: bool,

    /// Number of boosting rounds (default: BOOST_ROUNDS)
    #[arg(long)]
    n_rounds: Option<usize>,

    /// Maximum depth of each tree (default: BOOST_MAX_DEPTH)
    #[arg(long)]
    max_depth: Option<u16>,
}

fn print_evaluation(report: &EvaluationReport) {
    println!("\n══════════════════════════════════════════════════════");
    println!("  HOLD-OUT EVALUATION");
    println!("══════════════════════════════════════════════════════");
    println!("  Train rows:     {:>8}", report.train_rows);
    println!("  Test rows:      {:>8}", report.test_rows);
    println!("  MAE:            {:>8.2} wafers", report.mae);
    println!("  RMSE:           {:>8.2} wafers", report.rmse);
    println!("  R²:             {:>8.4}", report.r2);
    println!("\n  Residuals (actual - predicted):");
    println!("    Mean:   {:+.3}", report.residual_mean);
    println!("    StdDev: {:.3}", report.residual_std_dev);
}

fn print_crunch_scenario(model: &TrainedModel, scorer: &BullwhipRiskScorer) -> Result<()> {
    // High demand, strong trend, elevated geopolitical risk
    let features = FeatureVector::from_scenario(150.0, 2.5, 0.8);
    let predicted_load = model.predict(&features)?;
    let score = scorer.assess(predicted_load, features.retail_orders);

    println!("\n══════════════════════════════════════════════════════");
    println!("  SUPPLY CRUNCH SCENARIO");
    println!("══════════════════════════════════════════════════════");
    println!("  Retail orders:        {:>8.0} units", features.retail_orders);
    println!("  Predicted wafer load: {:>8.0} wafers", predicted_load.trunc());
    println!("  Amplification factor: {:>8.3}", score.amplification_factor);
    println!("  Shortage risk score:  {:>8.2}", score.shortage_risk_score);
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let metrics = Metrics::new()?;

    let mut params = config.forecaster.boosting;
    if let Some(n_rounds) = args.n_rounds {
        params.n_rounds = n_rounds;
    }
    if let Some(max_depth) = args.max_depth {
        params.max_depth = max_depth;
    }
    let forecaster = DemandForecaster::new(params);

    let input = args.input.unwrap_or(config.generator.dataset_path);
    info!("Loading training data from {:?}", input);
    let dataset = CsvDatasetRepository::new(&input)
        .load()
        .with_context(|| format!("Failed to load {:?}. Run `generate_data` first.", input))?;
    info!("Loaded {} rows", dataset.len());

    let started = Instant::now();
    let model = if args.no_split {
        info!("Training on 100% of data (no hold-out)");
        forecaster.fit(&dataset)?
    } else {
        let (model, report) = holdout_evaluation(&forecaster, &dataset, args.test_fraction)?;
        print_evaluation(&report);
        metrics.record_evaluation(&report);
        model
    };
    metrics.record_training(started.elapsed(), model.training_rows());
    info!(
        "Trained {} trees on {} rows in {:.2?}",
        model.n_trees(),
        model.training_rows(),
        started.elapsed()
    );

    print_crunch_scenario(&model, &BullwhipRiskScorer::new(config.risk.policy))?;

    if config.observability.enabled {
        println!("\n{}", metrics.render());
    }
    Ok(())
}
