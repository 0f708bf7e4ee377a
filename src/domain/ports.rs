use crate::domain::errors::ForecastError;
use crate::domain::supply::types::FeatureVector;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interface for downstream-order regression models
pub trait DemandPredictor: Send + Sync {
    /// Predicted wafer order volume for a single feature vector
    fn predict(&self, features: &FeatureVector) -> Result<f64, ForecastError>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}

/// Integrity token reported by the provenance ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerState {
    Verified,
    Compromised,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for LedgerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerState::Verified => write!(f, "verified"),
            LedgerState::Compromised => write!(f, "compromised"),
            LedgerState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Ledger status as written to the ledger's JSON status file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStatus {
    pub status: LedgerState,
    #[serde(rename = "total_stages", default)]
    pub stage_count: u32,
}

impl LedgerStatus {
    pub fn unknown() -> Self {
        Self {
            status: LedgerState::Unknown,
            stage_count: 0,
        }
    }
}

impl Default for LedgerStatus {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Best-effort source of ledger integrity status.
///
/// Implementations never fail: any error is reported as [`LedgerStatus::unknown`].
#[async_trait]
pub trait LedgerStatusProvider: Send + Sync {
    async fn current_status(&self) -> LedgerStatus;
}
