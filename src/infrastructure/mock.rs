use crate::domain::errors::ForecastError;
use crate::domain::ports::{DemandPredictor, LedgerStatus, LedgerStatusProvider};
use crate::domain::supply::types::FeatureVector;
use async_trait::async_trait;

/// Predictor returning a constant load, or a constant error.
pub struct FixedLoadPredictor {
    load: Result<f64, String>,
}

impl FixedLoadPredictor {
    pub fn new(load: f64) -> Self {
        Self { load: Ok(load) }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            load: Err(reason.to_string()),
        }
    }
}

impl DemandPredictor for FixedLoadPredictor {
    fn predict(&self, _features: &FeatureVector) -> Result<f64, ForecastError> {
        self.load.clone().map_err(|reason| ForecastError::Prediction { reason })
    }

    fn name(&self) -> &str {
        "Fixed Load"
    }

    fn version(&self) -> &str {
        "mock"
    }
}

/// Ledger provider that always reports the same status.
#[derive(Debug, Clone, Default)]
pub struct StaticLedgerProvider {
    status: LedgerStatus,
}

impl StaticLedgerProvider {
    pub fn new(status: LedgerStatus) -> Self {
        Self { status }
    }
}

#[async_trait]
impl LedgerStatusProvider for StaticLedgerProvider {
    async fn current_status(&self) -> LedgerStatus {
        self.status
    }
}
