//! Ledger adapter configuration parsing from environment variables.

use super::parse_var;
use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LedgerEnvConfig {
    pub executable: PathBuf,
    pub status_file: PathBuf,
    pub timeout: Duration,
}

impl LedgerEnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            executable: env::var("LEDGER_EXECUTABLE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("silicon_trace")),
            status_file: env::var("LEDGER_STATUS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("ledger_output.json")),
            timeout: Duration::from_millis(parse_var("LEDGER_TIMEOUT_MS", 5000u64)?),
        })
    }
}
