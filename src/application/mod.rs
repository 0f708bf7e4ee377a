// Synthetic history generation
pub mod generator;

// Forecaster training, caching and evaluation
pub mod ml;

// Scenario orchestrator
pub mod pipeline;
