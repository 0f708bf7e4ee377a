use crate::domain::errors::ForecastError;
use crate::domain::ml::feature_registry::features_to_f64_vector;
use crate::domain::ports::DemandPredictor;
use crate::domain::supply::dataset::DemandDataset;
use crate::domain::supply::types::FeatureVector;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};
use smartcore::tree::decision_tree_regressor::{
    DecisionTreeRegressor, DecisionTreeRegressorParameters,
};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

type RegressionTree = DecisionTreeRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;
type LinearModel = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Starting point of the boosted ensemble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialEstimate {
    /// Mean of the target. Predictions saturate outside the training range.
    Mean,
    /// Least-squares fit over the features. Lets the ensemble extrapolate the
    /// amplification law to scenarios larger than any training day.
    Linear,
}

impl FromStr for InitialEstimate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(InitialEstimate::Mean),
            "linear" => Ok(InitialEstimate::Linear),
            _ => anyhow::bail!(
                "Invalid BOOST_INITIAL_ESTIMATE: {}. Must be 'mean' or 'linear'",
                s
            ),
        }
    }
}

/// Training-time knobs of the gradient-boosted ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostingParameters {
    pub n_rounds: usize,
    pub learning_rate: f64,
    pub max_depth: u16,
    /// Drives the hold-out shuffle. Tree growth itself is deterministic.
    pub seed: u64,
    pub initial_estimate: InitialEstimate,
}

impl Default for BoostingParameters {
    fn default() -> Self {
        Self {
            n_rounds: 200,
            learning_rate: 0.05,
            max_depth: 5,
            seed: 42,
            initial_estimate: InitialEstimate::Linear,
        }
    }
}

impl BoostingParameters {
    pub fn validate(&self) -> Result<(), ForecastError> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(ForecastError::Training {
                reason: format!("learning_rate must be in (0, 1], got {}", self.learning_rate),
            });
        }
        if self.max_depth == 0 {
            return Err(ForecastError::Training {
                reason: "max_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

enum BaseEstimate {
    Constant(f64),
    Linear(LinearModel),
}

impl BaseEstimate {
    fn predict(&self, x: &DenseMatrix<f64>, rows: usize) -> Result<Vec<f64>, ForecastError> {
        match self {
            BaseEstimate::Constant(value) => Ok(vec![*value; rows]),
            BaseEstimate::Linear(model) => model.predict(x).map_err(|e| ForecastError::Prediction {
                reason: format!("linear base estimate: {}", e),
            }),
        }
    }
}

/// Gradient-boosted regression trees mapping the four features to wafer orders.
pub struct DemandForecaster {
    params: BoostingParameters,
}

impl DemandForecaster {
    pub fn new(params: BoostingParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BoostingParameters {
        &self.params
    }

    /// Fits the ensemble. Either returns a complete model or an error; nothing
    /// is retained from a failed call.
    pub fn fit(&self, dataset: &DemandDataset) -> Result<TrainedModel, ForecastError> {
        self.params.validate()?;
        let (x, y) = dataset.features_and_target()?;
        if x.is_empty() {
            return Err(ForecastError::data_unavailable(
                "training dataset",
                "dataset has no rows",
            ));
        }

        let started = Instant::now();
        let rows = x.len();
        let x_matrix = DenseMatrix::from_2d_vec(&x).map_err(|e| ForecastError::Training {
            reason: format!("Matrix error: {}", e),
        })?;

        let base = match self.params.initial_estimate {
            InitialEstimate::Mean => BaseEstimate::Constant(y.iter().sum::<f64>() / rows as f64),
            InitialEstimate::Linear => {
                let model = LinearRegression::fit(&x_matrix, &y, LinearRegressionParameters::default())
                    .map_err(|e| ForecastError::Training {
                        reason: format!("linear base estimate: {}", e),
                    })?;
                BaseEstimate::Linear(model)
            }
        };
        let mut current = base.predict(&x_matrix, rows)?;

        let tree_params =
            DecisionTreeRegressorParameters::default().with_max_depth(self.params.max_depth);
        let mut trees = Vec::with_capacity(self.params.n_rounds);

        for round in 0..self.params.n_rounds {
            let residuals: Vec<f64> = y.iter().zip(current.iter()).map(|(t, p)| t - p).collect();

            let tree = RegressionTree::fit(&x_matrix, &residuals, tree_params.clone()).map_err(
                |e| ForecastError::Training {
                    reason: format!("round {}: {}", round, e),
                },
            )?;
            let update = tree.predict(&x_matrix).map_err(|e| ForecastError::Training {
                reason: format!("round {}: {}", round, e),
            })?;
            for (c, u) in current.iter_mut().zip(update.iter()) {
                *c += self.params.learning_rate * u;
            }
            trees.push(tree);

            if (round + 1) % 50 == 0 {
                debug!("Boosting round {}: train RMSE {:.3}", round + 1, rmse(&current, &y));
            }
        }

        info!(
            "Trained boosted ensemble on {} rows ({} rounds, depth {}, lr {}) in {:.2?}. Train RMSE {:.3}",
            rows,
            trees.len(),
            self.params.max_depth,
            self.params.learning_rate,
            started.elapsed(),
            rmse(&current, &y)
        );

        Ok(TrainedModel {
            base,
            trees,
            params: self.params,
            training_rows: rows,
        })
    }
}

impl Default for DemandForecaster {
    fn default() -> Self {
        Self::new(BoostingParameters::default())
    }
}

/// Immutable result of [`DemandForecaster::fit`].
pub struct TrainedModel {
    base: BaseEstimate,
    trees: Vec<RegressionTree>,
    params: BoostingParameters,
    training_rows: usize,
}

impl fmt::Debug for TrainedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainedModel")
            .field("trees", &self.trees.len())
            .field("params", &self.params)
            .field("training_rows", &self.training_rows)
            .finish()
    }
}

impl TrainedModel {
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn training_rows(&self) -> usize {
        self.training_rows
    }

    pub fn params(&self) -> &BoostingParameters {
        &self.params
    }

    /// Offline path: predicts many vectors in one pass.
    pub fn predict_batch(&self, features: &[FeatureVector]) -> Result<Vec<f64>, ForecastError> {
        if features.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<Vec<f64>> = features.iter().map(features_to_f64_vector).collect();
        let x = DenseMatrix::from_2d_vec(&rows).map_err(|e| ForecastError::Prediction {
            reason: format!("Matrix creation failed: {}", e),
        })?;

        let mut predictions = self.base.predict(&x, rows.len())?;
        for tree in &self.trees {
            let update = tree.predict(&x).map_err(|e| ForecastError::Prediction {
                reason: e.to_string(),
            })?;
            for (p, u) in predictions.iter_mut().zip(update.iter()) {
                *p += self.params.learning_rate * u;
            }
        }
        Ok(predictions)
    }

    /// Batch prediction over a full training table.
    pub fn predict_dataset(&self, dataset: &DemandDataset) -> Result<Vec<f64>, ForecastError> {
        let features: Vec<FeatureVector> = dataset.records()?.iter().map(|r| r.features()).collect();
        self.predict_batch(&features)
    }
}

impl DemandPredictor for TrainedModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ForecastError> {
        self.predict_batch(std::slice::from_ref(features))?
            .first()
            .copied()
            .ok_or_else(|| ForecastError::Prediction {
                reason: "No prediction returned".to_string(),
            })
    }

    fn name(&self) -> &str {
        "SmartCore Gradient Boosted Trees"
    }

    fn version(&self) -> &str {
        "v1.0"
    }
}

fn rmse(predictions: &[f64], targets: &[f64]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let sq_err: f64 = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| (p - t).powi(2))
        .sum();
    (sq_err / predictions.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generator::SyntheticSeriesGenerator;

    fn small_dataset(rows: usize) -> DemandDataset {
        let records = SyntheticSeriesGenerator::with_seed(42).unwrap().generate(rows).unwrap();
        DemandDataset::from_records(&records)
    }

    fn quick_params() -> BoostingParameters {
        BoostingParameters {
            n_rounds: 40,
            learning_rate: 0.1,
            ..Default::default()
        }
    }

    #[test]
    fn test_fit_produces_one_tree_per_round() {
        let model = DemandForecaster::new(quick_params()).fit(&small_dataset(300)).unwrap();
        assert_eq!(model.n_trees(), 40);
        assert_eq!(model.training_rows(), 300);
    }

    #[test]
    fn test_prediction_is_close_to_training_targets() {
        let dataset = small_dataset(600);
        let model = DemandForecaster::new(quick_params()).fit(&dataset).unwrap();
        let predictions = model.predict_dataset(&dataset).unwrap();
        let (_, y) = dataset.features_and_target().unwrap();

        let mae = predictions
            .iter()
            .zip(y.iter())
            .map(|(p, t)| (p - t).abs())
            .sum::<f64>()
            / y.len() as f64;
        // Wafer noise alone has σ = 10
        assert!(mae < 15.0, "train MAE {}", mae);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let dataset = small_dataset(300);
        let fv = FeatureVector::new(110.0, 1.3, 0.2, 143.0);
        let a = DemandForecaster::new(quick_params()).fit(&dataset).unwrap();
        let b = DemandForecaster::new(quick_params()).fit(&dataset).unwrap();
        assert_eq!(a.predict(&fv).unwrap(), b.predict(&fv).unwrap());
    }

    #[test]
    fn test_empty_dataset_is_data_unavailable() {
        let empty = DemandDataset::from_records(&[]);
        let err = DemandForecaster::default().fit(&empty).unwrap_err();
        assert!(matches!(err, ForecastError::DataUnavailable { .. }));
    }

    #[test]
    fn test_missing_risk_column_is_schema_mismatch() {
        let dataset = small_dataset(50).without_column("Geopolitical_Risk");
        let err = DemandForecaster::default().fit(&dataset).unwrap_err();
        match err {
            ForecastError::SchemaMismatch { missing, .. } => {
                assert_eq!(missing, vec!["Geopolitical_Risk".to_string()])
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_target_fails_instead_of_training() {
        let mut records = SyntheticSeriesGenerator::with_seed(42).unwrap().generate(50).unwrap();
        records[6].wafer_orders = f64::NAN;
        let dataset = DemandDataset::from_records(&records);

        let err = DemandForecaster::new(quick_params()).fit(&dataset).unwrap_err();
        assert!(matches!(err, ForecastError::DataUnavailable { .. }));
        assert!(err.to_string().contains("row 7"));
    }

    #[test]
    fn test_invalid_learning_rate_rejected() {
        let params = BoostingParameters {
            learning_rate: 0.0,
            ..Default::default()
        };
        let err = DemandForecaster::new(params).fit(&small_dataset(20)).unwrap_err();
        assert!(matches!(err, ForecastError::Training { .. }));
    }

    #[test]
    fn test_mean_start_saturates_beyond_training_range() {
        let dataset = small_dataset(600);
        let params = BoostingParameters {
            initial_estimate: InitialEstimate::Mean,
            ..quick_params()
        };
        let model = DemandForecaster::new(params).fit(&dataset).unwrap();
        let (_, y) = dataset.features_and_target().unwrap();
        let max_target = y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let far = model.predict(&FeatureVector::from_scenario(300.0, 3.0, 1.0)).unwrap();
        // The reference law would give ≈1700 here; tree leaves only average observed residuals
        assert!(far < 1.2 * max_target, "far {} max target {}", far, max_target);
    }

    #[test]
    fn test_linear_start_extrapolates() {
        let dataset = small_dataset(600);
        let model = DemandForecaster::new(quick_params()).fit(&dataset).unwrap();
        let near = model.predict(&FeatureVector::from_scenario(100.0, 1.2, 0.2)).unwrap();
        let far = model.predict(&FeatureVector::from_scenario(150.0, 2.0, 0.5)).unwrap();
        assert!(far > near * 1.8, "near {} far {}", near, far);
    }

    #[test]
    fn test_empty_batch_is_empty() {
        let model = DemandForecaster::new(quick_params()).fit(&small_dataset(100)).unwrap();
        assert!(model.predict_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_initial_estimate_from_str() {
        assert_eq!("LINEAR".parse::<InitialEstimate>().unwrap(), InitialEstimate::Linear);
        assert_eq!("mean".parse::<InitialEstimate>().unwrap(), InitialEstimate::Mean);
        assert!("median".parse::<InitialEstimate>().is_err());
    }
}
