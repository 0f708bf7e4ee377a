//! Prometheus metrics definitions for SiliconTrace
//!
//! All metrics use the `silicontrace_` prefix and are read-only.

use crate::application::ml::evaluation::EvaluationReport;
use crate::domain::ports::LedgerState;
use crate::domain::risk::assessment::RiskAssessment;
use prometheus::{
    CounterVec, Gauge, GaugeVec, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge, GenericGaugeVec},
};
use std::sync::Arc;
use std::time::Duration;

/// Prometheus metrics for the forecasting pipeline
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Scenario evaluations by classification
    pub scenarios_total: CounterVec,
    /// Wall time of the last training run
    pub training_duration_seconds: GenericGauge<AtomicF64>,
    /// Rows used by the last training run
    pub training_rows: GenericGauge<AtomicF64>,
    /// Hold-out mean absolute error (wafers)
    pub holdout_mae: GenericGauge<AtomicF64>,
    /// Shortage risk score of the last scenario
    pub shortage_risk_score: GenericGauge<AtomicF64>,
    /// Predicted wafer load of the last scenario
    pub predicted_load: GenericGauge<AtomicF64>,
    /// Ledger status (1 for the current token)
    pub ledger_status: GenericGaugeVec<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let scenarios_total = CounterVec::new(
            Opts::new(
                "silicontrace_scenarios_total",
                "Scenario evaluations by risk classification",
            ),
            &["classification"],
        )?;
        registry.register(Box::new(scenarios_total.clone()))?;

        let training_duration_seconds = Gauge::with_opts(Opts::new(
            "silicontrace_training_duration_seconds",
            "Wall time of the last forecaster training run",
        ))?;
        registry.register(Box::new(training_duration_seconds.clone()))?;

        let training_rows = Gauge::with_opts(Opts::new(
            "silicontrace_training_rows",
            "Rows used by the last forecaster training run",
        ))?;
        registry.register(Box::new(training_rows.clone()))?;

        let holdout_mae = Gauge::with_opts(Opts::new(
            "silicontrace_holdout_mae",
            "Hold-out mean absolute error in wafers",
        ))?;
        registry.register(Box::new(holdout_mae.clone()))?;

        let shortage_risk_score = Gauge::with_opts(Opts::new(
            "silicontrace_shortage_risk_score",
            "Shortage risk score of the last evaluated scenario",
        ))?;
        registry.register(Box::new(shortage_risk_score.clone()))?;

        let predicted_load = Gauge::with_opts(Opts::new(
            "silicontrace_predicted_load",
            "Predicted wafer load of the last evaluated scenario",
        ))?;
        registry.register(Box::new(predicted_load.clone()))?;

        let ledger_status = GaugeVec::new(
            Opts::new("silicontrace_ledger_status", "Ledger integrity status"),
            &["status"],
        )?;
        registry.register(Box::new(ledger_status.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            scenarios_total,
            training_duration_seconds,
            training_rows,
            holdout_mae,
            shortage_risk_score,
            predicted_load,
            ledger_status,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn record_training(&self, duration: Duration, rows: usize) {
        self.training_duration_seconds.set(duration.as_secs_f64());
        self.training_rows.set(rows as f64);
    }

    pub fn record_evaluation(&self, report: &EvaluationReport) {
        self.holdout_mae.set(report.mae);
    }

    pub fn record_assessment(&self, assessment: &RiskAssessment) {
        self.scenarios_total
            .with_label_values(&[assessment.risk_classification.label()])
            .inc();
        self.shortage_risk_score.set(assessment.shortage_risk_score);
        self.predicted_load.set(assessment.predicted_load);
    }

    pub fn record_ledger(&self, state: LedgerState) {
        for token in ["verified", "compromised", "unknown"] {
            self.ledger_status.with_label_values(&[token]).set(0.0);
        }
        self.ledger_status
            .with_label_values(&[state.to_string().as_str()])
            .set(1.0);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create default Metrics")
    }
}
