// Predictor feature contract
pub mod ml;

// Port interfaces
pub mod ports;

// Bullwhip risk domain
pub mod risk;

// Supply chain records and training table
pub mod supply;

// Domain-specific error types
pub mod errors;
