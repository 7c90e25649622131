// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync pass: drains the offline queue through an executor.
//!
//! A pass walks the queue in order and stops at the first failure, leaving
//! that operation and everything behind it queued. On a poor link only
//! urgent operations are attempted.

use std::sync::Arc;

use fieldsync_core::{FailureReport, NetworkStatus, OfflineQueue, OpId, Priority};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::alert::{Alert, Alerter};
use crate::executor::OperationExecutor;

/// Why a pass did not touch the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Disconnected,
    EmptyQueue,
}

/// The operation that stopped a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedOperation {
    pub id: OpId,
    pub operation_name: String,
    pub priority: Priority,
    pub report: FailureReport,
}

/// Outcome of one sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Operations handed to the executor.
    pub attempted: usize,
    /// Operations executed and removed from the queue.
    pub succeeded: Vec<OpId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<FailedOperation>,
    /// Operations left queued that were not attempted.
    pub deferred: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl SyncReport {
    fn skipped(reason: SkipReason, deferred: usize) -> Self {
        SyncReport {
            deferred,
            skipped: Some(reason),
            ..SyncReport::default()
        }
    }

    /// True when nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_none()
    }
}

/// Runs sync passes and raises alerts for failed critical operations.
pub struct SyncOrchestrator {
    alerter: Arc<dyn Alerter>,
}

impl SyncOrchestrator {
    pub fn new(alerter: Arc<dyn Alerter>) -> Self {
        SyncOrchestrator { alerter }
    }

    /// Executes pending operations in queue order.
    ///
    /// Does nothing when disconnected or when the queue is empty. Each
    /// success removes its operation; the first failure ends the pass.
    pub async fn sync_pending<E>(
        &self,
        queue: &mut OfflineQueue,
        status: &NetworkStatus,
        executor: &E,
    ) -> SyncReport
    where
        E: OperationExecutor + ?Sized,
    {
        if !status.is_connected {
            debug!(pending = queue.pending_count(), "offline, sync skipped");
            return SyncReport::skipped(SkipReason::Disconnected, queue.pending_count());
        }
        if queue.is_empty() {
            return SyncReport::skipped(SkipReason::EmptyQueue, 0);
        }

        let batch = if status.is_degraded() {
            queue.urgent_snapshot()
        } else {
            queue.snapshot()
        };
        info!(
            batch = batch.len(),
            pending = queue.pending_count(),
            link = %status,
            "sync pass started"
        );

        let mut report = SyncReport::default();
        for op in batch {
            report.attempted += 1;
            match executor.execute(&op.operation_name, &op.payload).await {
                Ok(()) => {
                    queue.remove(&op.id);
                    debug!(id = %op.id, operation = %op.operation_name, "synced");
                    report.succeeded.push(op.id);
                }
                Err(e) => {
                    let failure = FailureReport::from_error(&e);
                    warn!(
                        id = %op.id,
                        operation = %op.operation_name,
                        priority = %op.priority,
                        kind = %failure.kind,
                        "sync pass stopped: {}",
                        failure.technical_message
                    );
                    if op.priority == Priority::Critical {
                        self.alerter.alert(&Alert::sync_failure(&op, &failure));
                    }
                    report.failed = Some(FailedOperation {
                        id: op.id,
                        operation_name: op.operation_name,
                        priority: op.priority,
                        report: failure,
                    });
                    break;
                }
            }
        }

        let failed = usize::from(report.failed.is_some());
        report.deferred = queue.pending_count() - failed;
        info!(
            synced = report.succeeded.len(),
            failed,
            deferred = report.deferred,
            "sync pass finished"
        );
        report
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
