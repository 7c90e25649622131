// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::alert::AlertAction;
use crate::test_helpers::{MockExecutor, RecordingAlerter};
use fieldsync_core::{FailureKind, LinkStrength, ManualClock};
use serde_json::json;

struct Fixture {
    queue: OfflineQueue,
    executor: MockExecutor,
    alerter: Arc<RecordingAlerter>,
    orchestrator: SyncOrchestrator,
}

impl Fixture {
    fn new() -> Self {
        let alerter = Arc::new(RecordingAlerter::default());
        Fixture {
            queue: OfflineQueue::with_clock(ManualClock::new(1_700_000_000_000)),
            executor: MockExecutor::new(),
            orchestrator: SyncOrchestrator::new(alerter.clone()),
            alerter,
        }
    }

    fn enqueue(&mut self, name: &str, priority: Priority) -> OpId {
        self.queue.enqueue(name, json!({ "op": name }), priority)
    }

    async fn sync(&mut self, status: NetworkStatus) -> SyncReport {
        self.orchestrator
            .sync_pending(&mut self.queue, &status, &self.executor)
            .await
    }

    fn queued_names(&self) -> Vec<String> {
        self.queue
            .snapshot()
            .into_iter()
            .map(|op| op.operation_name)
            .collect()
    }
}

fn good() -> NetworkStatus {
    NetworkStatus::online(LinkStrength::Good)
}

fn poor() -> NetworkStatus {
    NetworkStatus::online(LinkStrength::Poor)
}

#[tokio::test]
async fn test_disconnected_never_invokes_executor() {
    let mut fx = Fixture::new();
    fx.enqueue("assign_task", Priority::Critical);
    fx.enqueue("update_status", Priority::Normal);

    let report = fx.sync(NetworkStatus::offline()).await;

    assert!(fx.executor.calls().is_empty());
    assert_eq!(report.skipped, Some(SkipReason::Disconnected));
    assert_eq!(report.attempted, 0);
    assert_eq!(report.deferred, 2);
    assert_eq!(fx.queue.pending_count(), 2);
}

#[tokio::test]
async fn test_empty_queue_is_noop() {
    let mut fx = Fixture::new();
    let report = fx.sync(good()).await;

    assert!(fx.executor.calls().is_empty());
    assert_eq!(report.skipped, Some(SkipReason::EmptyQueue));
    assert!(report.is_clean());
}

#[tokio::test]
async fn test_all_succeed_drains_queue_in_order() {
    let mut fx = Fixture::new();
    let low = fx.enqueue("refresh_cache", Priority::Low);
    let critical = fx.enqueue("submit_inspection", Priority::Critical);
    let normal = fx.enqueue("update_status", Priority::Normal);

    let report = fx.sync(good()).await;

    assert_eq!(
        fx.executor.calls(),
        vec!["submit_inspection", "update_status", "refresh_cache"]
    );
    assert_eq!(report.succeeded, vec![critical, normal, low]);
    assert_eq!(report.attempted, 3);
    assert_eq!(report.deferred, 0);
    assert!(report.is_clean());
    assert!(fx.queue.is_empty());
}

#[tokio::test]
async fn test_first_failure_stops_the_pass() {
    let mut fx = Fixture::new();
    let first = fx.enqueue("first", Priority::Normal);
    let second = fx.enqueue("second", Priority::Normal);
    fx.enqueue("third", Priority::Normal);
    fx.executor.fail("second", FailureKind::Generic);

    let report = fx.sync(good()).await;

    assert_eq!(fx.executor.calls(), vec!["first", "second"]);
    assert_eq!(fx.queued_names(), vec!["second", "third"]);
    assert_eq!(report.succeeded, vec![first]);
    assert_eq!(report.attempted, 2);
    assert_eq!(report.deferred, 1);
    let failed = report.failed.unwrap();
    assert_eq!(failed.id, second);
    assert_eq!(failed.priority, Priority::Normal);
    assert_eq!(failed.report.kind, FailureKind::Generic);
}

#[tokio::test]
async fn test_failed_operation_is_retried_next_pass() {
    let mut fx = Fixture::new();
    fx.enqueue("first", Priority::Normal);
    fx.enqueue("second", Priority::Normal);
    fx.executor.fail("first", FailureKind::Network);

    let report = fx.sync(good()).await;
    assert!(!report.is_clean());
    assert_eq!(fx.queue.pending_count(), 2);

    fx.executor.heal("first");
    let report = fx.sync(good()).await;
    assert!(report.is_clean());
    assert!(fx.queue.is_empty());
    assert_eq!(fx.executor.calls(), vec!["first", "first", "second"]);
}

#[tokio::test]
async fn test_poor_link_only_sends_urgent_operations() {
    let mut fx = Fixture::new();
    fx.enqueue("update_status", Priority::Normal);
    let critical = fx.enqueue("submit_inspection", Priority::Critical);

    let report = fx.sync(poor()).await;

    assert_eq!(fx.executor.calls(), vec!["submit_inspection"]);
    assert_eq!(report.succeeded, vec![critical]);
    assert_eq!(report.deferred, 1);
    assert_eq!(fx.queued_names(), vec!["update_status"]);
}

#[tokio::test]
async fn test_poor_link_includes_high_priority() {
    let mut fx = Fixture::new();
    fx.enqueue("refresh_cache", Priority::Low);
    fx.enqueue("assign_task", Priority::High);

    fx.sync(poor()).await;

    assert_eq!(fx.executor.calls(), vec!["assign_task"]);
    assert_eq!(fx.queued_names(), vec!["refresh_cache"]);
}

#[tokio::test]
async fn test_poor_link_without_urgent_work_sends_nothing() {
    let mut fx = Fixture::new();
    fx.enqueue("refresh_cache", Priority::Low);

    let report = fx.sync(poor()).await;

    assert!(fx.executor.calls().is_empty());
    assert_eq!(report.attempted, 0);
    assert_eq!(report.deferred, 1);
}

#[tokio::test]
async fn test_critical_failure_alerts_with_choices() {
    let mut fx = Fixture::new();
    fx.enqueue("submit_inspection", Priority::Critical);
    fx.executor.fail("submit_inspection", FailureKind::Permission);

    let report = fx.sync(good()).await;

    let alerts = fx.alerter.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(
        alerts[0].actions,
        vec![AlertAction::TryAgain, AlertAction::ContinueOffline]
    );
    assert!(alerts[0]
        .message
        .contains(FailureKind::Permission.user_message()));
    assert_eq!(report.failed.unwrap().report.kind, FailureKind::Permission);
}

#[tokio::test]
async fn test_non_critical_failure_is_silent() {
    let mut fx = Fixture::new();
    fx.enqueue("assign_task", Priority::High);
    fx.executor.fail("assign_task", FailureKind::Network);

    fx.sync(good()).await;

    assert!(fx.alerter.alerts().is_empty());
    assert_eq!(fx.queue.pending_count(), 1);
}

#[tokio::test]
async fn test_payload_reaches_executor() {
    let mut fx = Fixture::new();
    fx.queue
        .enqueue("upload_photo", json!({"photo": "p-9", "task": "t-3"}), Priority::High);

    fx.sync(good()).await;

    assert_eq!(
        fx.executor.payloads(),
        vec![json!({"photo": "p-9", "task": "t-3"})]
    );
}

#[test]
fn test_report_serializes_for_output() {
    let report = SyncReport {
        skipped: Some(SkipReason::Disconnected),
        deferred: 4,
        ..SyncReport::default()
    };
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["skipped"], "disconnected");
    assert_eq!(value["deferred"], 4);
    assert!(value.get("failed").is_none());
}
