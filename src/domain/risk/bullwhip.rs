//! Bullwhip amplification law.
//!
//! Turns a raw downstream prediction into a shortage risk score by compounding
//! a fixed per-tier overreaction across the supply chain.

use crate::domain::risk::risk_policy::RiskPolicy;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Output of a single scoring call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BullwhipScore {
    pub amplification_factor: f64,
    pub shortage_risk_score: f64,
    /// Set when retail orders were zero and the score fell back to 0.
    pub degenerate_input: bool,
}

/// Stateless scorer holding the chain shape it applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct BullwhipRiskScorer {
    policy: RiskPolicy,
}

impl BullwhipRiskScorer {
    pub fn new(policy: RiskPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    /// Scores a prediction with the configured tiers and per-tier factor.
    pub fn assess(&self, predicted_load: f64, retail_orders: f64) -> BullwhipScore {
        score(
            predicted_load,
            retail_orders,
            self.policy.tiers,
            self.policy.per_tier_amplification,
        )
    }
}

/// Compounded overreaction across `tiers` stages.
pub fn amplification_factor(tiers: u32, per_tier_amplification: f64) -> f64 {
    (0..tiers).fold(1.0, |acc, _| acc * per_tier_amplification)
}

/// `predicted_load × amplification / retail_orders`, or 0 when retail orders are 0.
pub fn score(
    predicted_load: f64,
    retail_orders: f64,
    tiers: u32,
    per_tier_amplification: f64,
) -> BullwhipScore {
    let amplification_factor = amplification_factor(tiers, per_tier_amplification);

    if retail_orders == 0.0 {
        debug!(
            "Zero retail orders (predicted load {:.2}); shortage risk score set to 0",
            predicted_load
        );
        return BullwhipScore {
            amplification_factor,
            shortage_risk_score: 0.0,
            degenerate_input: true,
        };
    }

    BullwhipScore {
        amplification_factor,
        shortage_risk_score: (predicted_load * amplification_factor) / retail_orders,
        degenerate_input: false,
    }
}
