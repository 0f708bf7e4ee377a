// Bullwhip risk domain
pub mod assessment;
pub mod bullwhip;
pub mod risk_policy;
