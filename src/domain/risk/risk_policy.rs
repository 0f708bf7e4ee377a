use serde::{Deserialize, Serialize};

/// Error type for RiskPolicy validation
#[derive(Debug, thiserror::Error)]
pub enum RiskPolicyError {
    #[error("Invalid RiskPolicy: {0}")]
    ValidationError(String),
}

/// Supply chain shape and classification cut-off used to interpret a prediction.
///
/// The defaults encode an assumed retailer → distributor → fab → foundry chain.
/// They are configuration, not fitted from data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    pub tiers: u32,                  // Number of supply chain stages
    pub per_tier_amplification: f64, // Overreaction factor applied at every stage
    pub high_risk_threshold: f64,    // Scores strictly above this are "high risk"
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            tiers: 4,
            per_tier_amplification: 1.15,
            high_risk_threshold: 1.2,
        }
    }
}

impl RiskPolicy {
    pub fn validate(&self) -> Result<(), RiskPolicyError> {
        if !self.per_tier_amplification.is_finite() || self.per_tier_amplification <= 0.0 {
            return Err(RiskPolicyError::ValidationError(format!(
                "per_tier_amplification must be a positive number, got {}",
                self.per_tier_amplification
            )));
        }
        if !self.high_risk_threshold.is_finite() {
            return Err(RiskPolicyError::ValidationError(format!(
                "high_risk_threshold must be finite, got {}",
                self.high_risk_threshold
            )));
        }
        Ok(())
    }
}
