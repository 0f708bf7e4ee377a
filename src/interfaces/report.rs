//! Terminal rendering of a scenario evaluation.

use crate::domain::ports::{LedgerState, LedgerStatus};
use crate::domain::risk::assessment::{RiskAssessment, TierVolume};
use serde::Serialize;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;

/// Everything the presentation layer shows for one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub assessment: RiskAssessment,
    pub tiers: Vec<TierVolume>,
    pub ledger: LedgerStatus,
}

impl ScenarioReport {
    pub fn new(assessment: RiskAssessment, ledger: LedgerStatus) -> Self {
        Self {
            tiers: assessment.tier_volumes(),
            assessment,
            ledger,
        }
    }

    pub fn render(&self) -> String {
        let a = &self.assessment;
        let mut out = String::new();

        let _ = writeln!(out, "══════════════════════════════════════════════════════");
        let _ = writeln!(out, "  SILICONTRACE: SEMICONDUCTOR SUPPLY PREDICTOR");
        let _ = writeln!(out, "══════════════════════════════════════════════════════");
        let _ = writeln!(out, "  Consumer Demand:      {:>8} units", a.base_demand.trunc());
        let _ = writeln!(out, "  Retail Orders:        {:>8} units", a.retail_orders.trunc());
        let _ = writeln!(out, "  Predicted Wafer Load: {:>8} wafers", a.predicted_load.trunc());
        let _ = writeln!(out, "  Shortage Risk Score:  {:>8.2}", a.shortage_risk_score);

        let _ = writeln!(out, "\n  Bullwhip Effect Amplification:");
        out.push_str(&render_bars(&self.tiers));

        let _ = writeln!(out, "\n  {}", ledger_line(&self.ledger));
        let _ = writeln!(out, "  {}", risk_line(a));
        out
    }
}

/// One horizontal bar per tier, scaled to the largest volume.
pub fn render_bars(tiers: &[TierVolume]) -> String {
    let max_volume = tiers
        .iter()
        .map(|t| t.volume)
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for (i, tier) in tiers.iter().enumerate() {
        let bar_len = if max_volume > 0.0 {
            (tier.volume.max(0.0) / max_volume * BAR_WIDTH as f64).ceil() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "    {}. {:<18} {:>9.1} {}",
            i + 1,
            tier.tier,
            tier.volume,
            "█".repeat(bar_len)
        );
    }
    out
}

pub fn ledger_line(ledger: &LedgerStatus) -> String {
    match ledger.status {
        LedgerState::Verified => format!(
            "[OK]    Ledger verified successfully. Total stages tracked: {}",
            ledger.stage_count
        ),
        LedgerState::Compromised => "[ERROR] Ledger integrity compromised!".to_string(),
        LedgerState::Unknown => "[WARN]  Ledger status unknown.".to_string(),
    }
}

pub fn risk_line(assessment: &RiskAssessment) -> String {
    if assessment.is_high_risk() {
        "[ALERT] High systemic shortage risk detected. Buffer allocation recommended.".to_string()
    } else {
        "[OK]    System operating within stable allocation range.".to_string()
    }
}
