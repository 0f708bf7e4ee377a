//! Offline hold-out evaluation of the forecaster.

use super::forecaster::{DemandForecaster, TrainedModel};
use crate::domain::errors::ForecastError;
use crate::domain::supply::dataset::DemandDataset;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use statrs::statistics::{Data, Distribution};
use tracing::info;

pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub train_rows: usize,
    pub test_rows: usize,
    pub mae: f64,
    pub rmse: f64,
    pub r2: f64,
    pub residual_mean: f64,
    pub residual_std_dev: f64,
}

/// Shuffled split of the table into (train, test). The shuffle is seeded.
pub fn train_test_split(
    dataset: &DemandDataset,
    test_fraction: f64,
    seed: u64,
) -> (DemandDataset, DemandDataset) {
    let n = dataset.len();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_rows = ((n as f64) * test_fraction.clamp(0.0, 1.0)).round() as usize;
    let (test_idx, train_idx) = indices.split_at(test_rows.min(n));
    (dataset.select_rows(train_idx), dataset.select_rows(test_idx))
}

/// Scores a trained model against a labelled table.
pub fn evaluate(
    model: &TrainedModel,
    test: &DemandDataset,
    train_rows: usize,
) -> Result<EvaluationReport, ForecastError> {
    let (_, actuals) = test.features_and_target()?;
    if actuals.is_empty() {
        return Err(ForecastError::data_unavailable(
            "evaluation split",
            "hold-out split has no rows",
        ));
    }
    let predictions = model.predict_dataset(test)?;
    let n = actuals.len() as f64;

    let residuals: Vec<f64> = actuals
        .iter()
        .zip(predictions.iter())
        .map(|(t, p)| t - p)
        .collect();
    let mae = residuals.iter().map(|r| r.abs()).sum::<f64>() / n;
    let mse = residuals.iter().map(|r| r.powi(2)).sum::<f64>() / n;

    let mean_y = actuals.iter().sum::<f64>() / n;
    let var_y = actuals.iter().map(|t| (t - mean_y).powi(2)).sum::<f64>() / n;
    let r2 = if var_y > 0.0 { 1.0 - mse / var_y } else { 0.0 };

    let data = Data::new(residuals);
    let residual_mean = data.mean().unwrap_or(0.0);
    let residual_std_dev = data.std_dev().unwrap_or(0.0);

    Ok(EvaluationReport {
        train_rows,
        test_rows: actuals.len(),
        mae,
        rmse: mse.sqrt(),
        r2,
        residual_mean,
        residual_std_dev,
    })
}

/// Fits on a shuffled training split and reports hold-out accuracy.
pub fn holdout_evaluation(
    forecaster: &DemandForecaster,
    dataset: &DemandDataset,
    test_fraction: f64,
) -> Result<(TrainedModel, EvaluationReport), ForecastError> {
    dataset.validate()?;
    let (train, test) = train_test_split(dataset, test_fraction, forecaster.params().seed);
    info!(
        "Hold-out split: {} training rows, {} test rows",
        train.len(),
        test.len()
    );

    let model = forecaster.fit(&train)?;
    let report = evaluate(&model, &test, train.len())?;
    info!(
        "Hold-out MAE {:.2} wafers, RMSE {:.2}, R² {:.4}",
        report.mae, report.rmse, report.r2
    );
    Ok((model, report))
}
