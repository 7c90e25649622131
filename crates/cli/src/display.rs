// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fieldsync_core::{NetworkStatus, QueuedOperation};

use crate::sync::{SkipReason, SyncReport};

/// Width of the priority column in queue listings.
const PRIORITY_WIDTH: usize = 8;

/// Format one queued operation as a single listing line.
///
/// `op-1700000000000-3  critical  submit_inspection  2023-11-14 22:13:20`
pub fn format_op_line(op: &QueuedOperation) -> String {
    format!(
        "{}  {:<width$}  {}  {}",
        op.id,
        op.priority.as_str(),
        op.operation_name,
        op.enqueued_at.format("%Y-%m-%d %H:%M:%S"),
        width = PRIORITY_WIDTH
    )
}

/// One line per operation, or a placeholder when there are none.
pub fn format_op_list(ops: &[QueuedOperation]) -> String {
    if ops.is_empty() {
        return "No queued operations".to_string();
    }
    ops.iter()
        .map(format_op_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_status(status: &NetworkStatus, failures: u32) -> String {
    if status.is_connected || failures == 0 {
        format!("Network: {status}")
    } else {
        format!("Network: {status} ({failures} failed probe(s))")
    }
}

/// Human summary of a sync pass.
pub fn format_report(report: &SyncReport) -> String {
    match report.skipped {
        Some(SkipReason::Disconnected) => {
            return format!(
                "Offline: {} operation(s) kept for later",
                report.deferred
            );
        }
        Some(SkipReason::EmptyQueue) => return "Nothing to sync".to_string(),
        None => {}
    }

    let mut lines = vec![format!(
        "Synced {} of {} attempted operation(s)",
        report.succeeded.len(),
        report.attempted
    )];
    if let Some(failed) = &report.failed {
        lines.push(format!(
            "Stopped at {} ({}, {}): {}",
            failed.id, failed.operation_name, failed.priority, failed.report.user_message
        ));
    }
    if report.deferred > 0 {
        lines.push(format!("{} operation(s) still queued", report.deferred));
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
