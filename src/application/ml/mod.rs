pub mod evaluation;
pub mod forecaster;
pub mod model_cache;

pub use forecaster::{BoostingParameters, DemandForecaster, InitialEstimate, TrainedModel};
pub use model_cache::ModelCache;
