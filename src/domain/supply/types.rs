use serde::{Deserialize, Serialize};

/// One simulated day of supply-chain history.
///
/// Field names serialize to the flat dataset header
/// (`Day, Base_Demand, Tech_Trend_Multiplier, Geopolitical_Risk, Retail_Orders, MediaTek_Wafer_Orders`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    #[serde(rename = "Day")]
    pub day: u32,
    #[serde(rename = "Base_Demand")]
    pub base_demand: f64,
    #[serde(rename = "Tech_Trend_Multiplier")]
    pub tech_trend_multiplier: f64,
    #[serde(rename = "Geopolitical_Risk")]
    pub geopolitical_risk: f64,
    #[serde(rename = "Retail_Orders")]
    pub retail_orders: f64,
    #[serde(rename = "MediaTek_Wafer_Orders")]
    pub wafer_orders: f64,
}

impl HistoricalRecord {
    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            base_demand: self.base_demand,
            tech_trend_multiplier: self.tech_trend_multiplier,
            geopolitical_risk: self.geopolitical_risk,
            retail_orders: self.retail_orders,
        }
    }
}

/// The four predictor inputs, built fresh for every prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub base_demand: f64,
    pub tech_trend_multiplier: f64,
    pub geopolitical_risk: f64,
    pub retail_orders: f64,
}

impl FeatureVector {
    pub fn new(
        base_demand: f64,
        tech_trend_multiplier: f64,
        geopolitical_risk: f64,
        retail_orders: f64,
    ) -> Self {
        Self {
            base_demand,
            tech_trend_multiplier,
            geopolitical_risk,
            retail_orders,
        }
    }

    /// Inference-time vector: retail orders are derived without noise.
    pub fn from_scenario(base_demand: f64, tech_trend: f64, risk_index: f64) -> Self {
        Self::new(base_demand, tech_trend, risk_index, base_demand * tech_trend)
    }
}

/// Scenario controls as exposed to the presentation layer, with their declared ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub base_demand: f64,
    pub tech_trend: f64,
    pub risk_index: f64,
}

impl ScenarioInput {
    pub const BASE_DEMAND_RANGE: (f64, f64) = (50.0, 300.0);
    pub const TECH_TREND_RANGE: (f64, f64) = (1.0, 3.0);
    pub const RISK_INDEX_RANGE: (f64, f64) = (0.0, 1.0);

    pub fn new(base_demand: f64, tech_trend: f64, risk_index: f64) -> Self {
        Self {
            base_demand,
            tech_trend,
            risk_index,
        }
    }

    /// Names of the controls that fall outside their declared range.
    /// Out-of-range values are still evaluated (the model extrapolates).
    pub fn out_of_range_controls(&self) -> Vec<&'static str> {
        let checks = [
            ("base_demand", self.base_demand, Self::BASE_DEMAND_RANGE),
            ("tech_trend", self.tech_trend, Self::TECH_TREND_RANGE),
            ("risk_index", self.risk_index, Self::RISK_INDEX_RANGE),
        ];
        checks
            .iter()
            .filter(|(_, value, (lo, hi))| value < lo || value > hi)
            .map(|(name, _, _)| *name)
            .collect()
    }
}

impl Default for ScenarioInput {
    fn default() -> Self {
        // Dashboard slider defaults
        Self::new(150.0, 2.0, 0.5)
    }
}
