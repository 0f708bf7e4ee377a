use super::forecaster::{DemandForecaster, TrainedModel};
use crate::domain::errors::ForecastError;
use crate::domain::supply::dataset::DemandDataset;
use std::sync::{Arc, OnceLock};
use tracing::info;

/// Train-once accessor for the forecaster.
///
/// The first successful call to [`ModelCache::get_or_train`] trains and stores
/// the model; later calls return the same `Arc` without touching the loader.
/// A failed training attempt leaves the cache empty.
pub struct ModelCache {
    forecaster: DemandForecaster,
    model: OnceLock<Arc<TrainedModel>>,
}

impl ModelCache {
    pub fn new(forecaster: DemandForecaster) -> Self {
        Self {
            forecaster,
            model: OnceLock::new(),
        }
    }

    pub fn get_or_train<F>(&self, load: F) -> Result<Arc<TrainedModel>, ForecastError>
    where
        F: FnOnce() -> Result<DemandDataset, ForecastError>,
    {
        if let Some(model) = self.model.get() {
            return Ok(Arc::clone(model));
        }

        let dataset = load()?;
        info!("Model cache cold: training on {} rows", dataset.len());
        let trained = Arc::new(self.forecaster.fit(&dataset)?);
        Ok(Arc::clone(self.model.get_or_init(|| trained)))
    }

    pub fn get(&self) -> Option<Arc<TrainedModel>> {
        self.model.get().cloned()
    }

    pub fn is_trained(&self) -> bool {
        self.model.get().is_some()
    }
}
