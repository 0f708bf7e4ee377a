use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskClassification {
    HighRisk,
    Stable,
}

impl RiskClassification {
    /// Strict greater-than: a score equal to the threshold is still stable.
    pub fn classify(shortage_risk_score: f64, high_risk_threshold: f64) -> Self {
        if shortage_risk_score > high_risk_threshold {
            RiskClassification::HighRisk
        } else {
            RiskClassification::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskClassification::HighRisk => "high risk",
            RiskClassification::Stable => "stable",
        }
    }
}

impl fmt::Display for RiskClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one scenario evaluation, as handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub base_demand: f64,
    pub retail_orders: f64,
    pub predicted_load: f64,
    pub amplification_factor: f64,
    pub shortage_risk_score: f64,
    pub risk_classification: RiskClassification,
}

/// One bar of the bullwhip chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierVolume {
    pub tier: &'static str,
    pub volume: f64,
}

impl RiskAssessment {
    pub fn is_high_risk(&self) -> bool {
        self.risk_classification == RiskClassification::HighRisk
    }

    /// Volumes at each observed supply tier, downstream first.
    pub fn tier_volumes(&self) -> Vec<TierVolume> {
        vec![
            TierVolume {
                tier: "Consumer Demand",
                volume: self.base_demand,
            },
            TierVolume {
                tier: "Retail Orders",
                volume: self.retail_orders,
            },
            TierVolume {
                tier: "Wafer Allocation",
                volume: self.predicted_load,
            },
        ]
    }
}
