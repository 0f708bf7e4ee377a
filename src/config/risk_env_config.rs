//! Bullwhip risk configuration parsing from environment variables.
//!
//! This module handles loading the supply chain shape (tier count, per-tier
//! amplification) and the high-risk classification threshold.

use super::parse_var;
use crate::domain::risk::risk_policy::RiskPolicy;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct RiskEnvConfig {
    pub policy: RiskPolicy,
}

impl RiskEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = RiskPolicy::default();
        let policy = RiskPolicy {
            tiers: parse_var("SUPPLY_CHAIN_TIERS", defaults.tiers)?,
            per_tier_amplification: parse_var(
                "PER_TIER_AMPLIFICATION",
                defaults.per_tier_amplification,
            )?,
            high_risk_threshold: parse_var("HIGH_RISK_THRESHOLD", defaults.high_risk_threshold)?,
        };
        policy.validate().context("Invalid risk policy")?;
        Ok(Self { policy })
    }
}
