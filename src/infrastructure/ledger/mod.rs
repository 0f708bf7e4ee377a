//! Provenance ledger status adapter.
//!
//! Runs the external ledger executable (when it is installed) and reads the
//! JSON status file it leaves behind. Every failure path degrades to
//! `LedgerStatus::unknown()`; scenario evaluation never waits on more than
//! the configured timeout.

use crate::domain::ports::{LedgerStatus, LedgerStatusProvider};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

pub struct SubprocessLedgerProvider {
    executable: PathBuf,
    args: Vec<String>,
    status_file: PathBuf,
    timeout: Duration,
}

impl SubprocessLedgerProvider {
    pub fn new(executable: impl Into<PathBuf>, status_file: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            status_file: status_file.into(),
            timeout,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn status_file(&self) -> &Path {
        &self.status_file
    }

    /// Executable path anchored at the process working directory, so the
    /// existence check and the launch see the same file.
    fn resolved_executable(&self) -> PathBuf {
        std::path::absolute(&self.executable).unwrap_or_else(|_| self.executable.clone())
    }

    /// Runs the ledger; returns false when it could not complete successfully.
    async fn run_ledger(&self, executable: &Path) -> bool {
        let mut cmd = Command::new(executable);
        cmd.args(&self.args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        // The ledger writes its status file into its working directory
        if let Some(dir) = self.status_file.parent().filter(|d| !d.as_os_str().is_empty()) {
            cmd.current_dir(dir);
        }

        match tokio::time::timeout(self.timeout, cmd.status()).await {
            Ok(Ok(status)) if status.success() => {
                debug!("Ledger executable {:?} completed", executable);
                true
            }
            Ok(Ok(status)) => {
                warn!("Ledger executable {:?} exited with {}", executable, status);
                false
            }
            Ok(Err(e)) => {
                warn!("Failed to launch ledger executable {:?}: {}", executable, e);
                false
            }
            Err(_) => {
                warn!(
                    "Ledger executable {:?} timed out after {:?}",
                    executable, self.timeout
                );
                false
            }
        }
    }

    async fn read_status_file(&self) -> LedgerStatus {
        let contents = match tokio::fs::read_to_string(&self.status_file).await {
            Ok(contents) => contents,
            Err(e) => {
                debug!("Ledger status file {:?} unreadable: {}", self.status_file, e);
                return LedgerStatus::unknown();
            }
        };

        match serde_json::from_str::<LedgerStatus>(&contents) {
            Ok(status) => status,
            Err(e) => {
                warn!("Malformed ledger status file {:?}: {}", self.status_file, e);
                LedgerStatus::unknown()
            }
        }
    }
}

#[async_trait]
impl LedgerStatusProvider for SubprocessLedgerProvider {
    async fn current_status(&self) -> LedgerStatus {
        // A missing executable is not an error: a previously written status file still counts.
        let executable = self.resolved_executable();
        if executable.exists() {
            if !self.run_ledger(&executable).await {
                return LedgerStatus::unknown();
            }
        } else {
            debug!("Ledger executable {:?} not installed", executable);
        }

        let status = self.read_status_file().await;
        info!(
            "Ledger status: {} ({} stages)",
            status.status, status.stage_count
        );
        status
    }
}
