// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Nothing listens on the discard port, so probes and posts fail fast.
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

/// Command bound to `temp` as its state directory, isolated from the
/// caller's environment.
pub fn fieldsync(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("fieldsync");
    cmd.arg("--state-dir")
        .arg(temp.path())
        .env_remove("FIELDSYNC_STATE_DIR")
        .env_remove("FIELDSYNC_CONFIG")
        .env("RUST_LOG", "warn");
    cmd
}

/// State directory whose config points every endpoint at [`UNREACHABLE`].
pub fn offline_state() -> TempDir {
    let temp = TempDir::new().unwrap();
    let config = format!(
        "[probe]\nurl = \"{UNREACHABLE}/health\"\ntimeout_secs = 2\n\n\
         [retry]\nbase_delay_ms = 10\nmax_delay_ms = 20\n\n\
         [executor]\nbase_url = \"{UNREACHABLE}/api\"\ntimeout_secs = 2\n"
    );
    std::fs::write(temp.path().join("fieldsync.toml"), config).unwrap();
    temp
}

/// Queue an operation and return its id.
pub fn enqueue(temp: &TempDir, operation: &str, priority: &str) -> String {
    let output = fieldsync(temp)
        .args(["enqueue", operation, "-p", priority, "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "enqueue failed: {output:?}");

    let op: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    op["id"].as_str().unwrap().to_string()
}

/// Queued operation names in sync order.
pub fn queued_names(temp: &TempDir) -> Vec<String> {
    let output = fieldsync(temp)
        .args(["list", "-o", "json"])
        .output()
        .unwrap();
    let ops: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    ops.iter()
        .map(|op| op["operation_name"].as_str().unwrap().to_string())
        .collect()
}
