//! Push-based observability for SiliconTrace
//!
//! Metrics are rendered in Prometheus text format and written to stdout by the
//! binaries; nothing here listens for requests.

pub mod metrics;

pub use metrics::Metrics;
