// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::test_helpers::RecordingAlerter;
use fieldsync_core::{FailureKind, OfflineQueue, Priority};
use serde_json::json;

fn network_report() -> FailureReport {
    FailureReport {
        kind: FailureKind::Network,
        user_message: FailureKind::Network.user_message().to_string(),
        technical_message: "connection refused".to_string(),
    }
}

#[test]
fn test_sync_failure_offers_retry_and_offline() {
    let mut queue = OfflineQueue::new();
    let id = queue.enqueue("submit_inspection", json!({"site": 4}), Priority::Critical);
    let op = queue.get(&id).unwrap();

    let alert = Alert::sync_failure(op, &network_report());
    assert_eq!(alert.title, "Sync Failed");
    assert!(alert.message.contains("submit_inspection"));
    assert!(alert.message.contains(FailureKind::Network.user_message()));
    assert_eq!(
        alert.actions,
        vec![AlertAction::TryAgain, AlertAction::ContinueOffline]
    );
}

#[test]
fn test_operation_failure_includes_context() {
    let alert = Alert::operation_failure("upload site photo", &network_report());
    assert!(alert.message.starts_with("upload site photo:"));
    assert_eq!(alert.actions, vec![AlertAction::Acknowledge]);
}

#[test]
fn test_action_labels() {
    assert_eq!(AlertAction::TryAgain.to_string(), "Try again");
    assert_eq!(AlertAction::ContinueOffline.to_string(), "Continue offline");
    assert_eq!(AlertAction::Acknowledge.to_string(), "OK");
}

#[test]
fn test_shared_alerter_forwards() {
    let recorder = std::sync::Arc::new(RecordingAlerter::default());
    let shared: std::sync::Arc<dyn Alerter> = recorder.clone();
    shared.alert(&Alert::operation_failure("x", &network_report()));
    assert_eq!(recorder.alerts().len(), 1);
}
