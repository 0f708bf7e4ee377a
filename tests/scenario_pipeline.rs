use silicontrace::application::generator::SyntheticSeriesGenerator;
use silicontrace::application::ml::{BoostingParameters, DemandForecaster, ModelCache, TrainedModel};
use silicontrace::application::pipeline::ScenarioPipeline;
use silicontrace::domain::ports::DemandPredictor;
use silicontrace::domain::risk::assessment::RiskClassification;
use silicontrace::domain::risk::risk_policy::RiskPolicy;
use silicontrace::domain::supply::{DemandDataset, FeatureVector, ScenarioInput};
use silicontrace::infrastructure::CsvDatasetRepository;
use std::sync::{Arc, OnceLock};

// Training on the canonical series takes a while; share one model across tests.
static MODEL: OnceLock<Arc<TrainedModel>> = OnceLock::new();

fn canonical_model() -> Arc<TrainedModel> {
    MODEL
        .get_or_init(|| {
            let records = SyntheticSeriesGenerator::with_seed(42).unwrap().generate(5000).unwrap();
            let dataset = DemandDataset::from_records(&records);
            Arc::new(
                DemandForecaster::new(BoostingParameters::default())
                    .fit(&dataset)
                    .unwrap(),
            )
        })
        .clone()
}

fn pipeline() -> ScenarioPipeline {
    ScenarioPipeline::new(canonical_model(), RiskPolicy::default())
}

#[test]
fn test_default_scenario_is_high_risk() {
    let assessment = pipeline().evaluate(150.0, 2.0, 0.5).unwrap();

    assert!((assessment.retail_orders - 300.0).abs() < 1e-9);
    assert!(
        assessment.predicted_load > 300.0 && assessment.predicted_load < 600.0,
        "predicted load {} outside the expected band",
        assessment.predicted_load
    );
    assert!((assessment.amplification_factor - 1.15_f64.powi(4)).abs() < 1e-9);
    assert!(assessment.shortage_risk_score > 1.2);
    assert_eq!(assessment.risk_classification, RiskClassification::HighRisk);
}

#[test]
fn test_repeated_evaluations_are_identical() {
    let pipeline = pipeline();
    let first = pipeline.evaluate(150.0, 2.0, 0.5).unwrap();
    let second = pipeline.evaluate(150.0, 2.0, 0.5).unwrap();
    assert_eq!(first.predicted_load, second.predicted_load);
    assert_eq!(first.shortage_risk_score, second.shortage_risk_score);
}

#[test]
fn test_score_matches_formula() {
    let assessment = pipeline().evaluate(120.0, 1.5, 0.2).unwrap();
    let expected = assessment.predicted_load * assessment.amplification_factor / assessment.retail_orders;
    assert!((assessment.shortage_risk_score - expected).abs() < 1e-9);
}

#[test]
fn test_in_sample_predictions_track_targets() {
    let records = SyntheticSeriesGenerator::with_seed(42).unwrap().generate(5000).unwrap();
    let model = canonical_model();

    let mean_abs_error = records
        .iter()
        .take(500)
        .map(|r| (model.predict(&r.features()).unwrap() - r.wafer_orders).abs())
        .sum::<f64>()
        / 500.0;
    assert!(mean_abs_error < 25.0, "in-sample MAE {}", mean_abs_error);
}

#[test]
fn test_out_of_range_controls_still_evaluate() {
    let input = ScenarioInput::new(400.0, 3.5, 1.2);
    assert_eq!(input.out_of_range_controls().len(), 3);

    let assessment = pipeline().evaluate_input(&input).unwrap();
    assert!(assessment.predicted_load.is_finite());
    assert!((assessment.retail_orders - 1400.0).abs() < 1e-9);
}

#[test]
fn test_prediction_is_pure_function_of_features() {
    let model = canonical_model();
    let features = FeatureVector::from_scenario(150.0, 2.5, 0.8);
    let a = model.predict(&features).unwrap();
    let b = model.predict(&features).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_csv_round_trip_feeds_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("supply_logs.csv");
    let records = SyntheticSeriesGenerator::with_seed(42).unwrap().generate(300).unwrap();
    CsvDatasetRepository::new(&path).save(&records).unwrap();

    let params = BoostingParameters {
        n_rounds: 20,
        ..BoostingParameters::default()
    };
    let cache = ModelCache::new(DemandForecaster::new(params));
    let model = cache
        .get_or_train(|| CsvDatasetRepository::new(&path).load())
        .unwrap();

    assert_eq!(model.training_rows(), 300);
    assert_eq!(model.n_trees(), 20);
    assert!(cache.is_trained());
}
