pub mod dataset;
pub mod types;

pub use dataset::DemandDataset;
pub use types::{FeatureVector, HistoricalRecord, ScenarioInput};
