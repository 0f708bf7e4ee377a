#![cfg(unix)]

// Changes the process working directory, so it lives in its own test binary.

use silicontrace::domain::ports::{LedgerState, LedgerStatusProvider};
use silicontrace::infrastructure::SubprocessLedgerProvider;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::time::Duration;

#[tokio::test]
async fn test_bare_executable_name_runs_from_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("silicon_trace");
    fs::write(
        &script,
        "#!/bin/sh\nprintf '{\"status\":\"verified\",\"total_stages\":5}' > ledger_output.json\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    std::env::set_current_dir(dir.path()).unwrap();

    let provider = SubprocessLedgerProvider::new(
        "silicon_trace",
        "ledger_output.json",
        Duration::from_secs(5),
    );
    let status = provider.current_status().await;

    assert_eq!(status.status, LedgerState::Verified);
    assert_eq!(status.stage_count, 5);
    assert!(dir.path().join("ledger_output.json").exists());
}
