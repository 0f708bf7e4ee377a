//! Scenario evaluation: controls → feature vector → forecast → bullwhip score.

use crate::domain::errors::ForecastError;
use crate::domain::ports::DemandPredictor;
use crate::domain::risk::assessment::{RiskAssessment, RiskClassification};
use crate::domain::risk::bullwhip::BullwhipRiskScorer;
use crate::domain::risk::risk_policy::RiskPolicy;
use crate::domain::supply::types::{FeatureVector, ScenarioInput};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ScenarioPipeline {
    predictor: Arc<dyn DemandPredictor>,
    scorer: BullwhipRiskScorer,
}

impl ScenarioPipeline {
    pub fn new(predictor: Arc<dyn DemandPredictor>, policy: RiskPolicy) -> Self {
        Self {
            predictor,
            scorer: BullwhipRiskScorer::new(policy),
        }
    }

    pub fn policy(&self) -> &RiskPolicy {
        self.scorer.policy()
    }

    pub fn predictor_name(&self) -> &str {
        self.predictor.name()
    }

    /// Evaluates one scenario. Inputs are used as given, out-of-range values included.
    pub fn evaluate(
        &self,
        base_demand: f64,
        tech_trend: f64,
        risk_index: f64,
    ) -> Result<RiskAssessment, ForecastError> {
        let features = FeatureVector::from_scenario(base_demand, tech_trend, risk_index);
        let predicted_load = self.predictor.predict(&features)?;
        let score = self.scorer.assess(predicted_load, features.retail_orders);

        let risk_classification =
            RiskClassification::classify(score.shortage_risk_score, self.policy().high_risk_threshold);

        debug!(
            "Scenario demand={} trend={} risk={} -> load {:.1}, score {:.3} ({})",
            base_demand,
            tech_trend,
            risk_index,
            predicted_load,
            score.shortage_risk_score,
            risk_classification
        );

        Ok(RiskAssessment {
            base_demand,
            retail_orders: features.retail_orders,
            predicted_load,
            amplification_factor: score.amplification_factor,
            shortage_risk_score: score.shortage_risk_score,
            risk_classification,
        })
    }

    pub fn evaluate_input(&self, input: &ScenarioInput) -> Result<RiskAssessment, ForecastError> {
        let out_of_range = input.out_of_range_controls();
        if !out_of_range.is_empty() {
            warn!(
                "Controls {:?} outside their declared range; prediction is extrapolated",
                out_of_range
            );
        }
        self.evaluate(input.base_demand, input.tech_trend, input.risk_index)
    }
}
