// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use fieldsync_core::{ManualClock, Priority};
use serde_json::json;

fn sample_queue() -> OfflineQueue {
    let mut queue = OfflineQueue::with_clock(ManualClock::new(1_700_000_000_000));
    queue.enqueue("refresh_cache", json!({}), Priority::Low);
    queue.enqueue("submit_inspection", json!({}), Priority::Critical);
    queue.enqueue("update_status", json!({}), Priority::Normal);
    queue.enqueue("assign_task", json!({}), Priority::High);
    queue
}

fn names(ops: &[QueuedOperation]) -> Vec<&str> {
    ops.iter().map(|op| op.operation_name.as_str()).collect()
}

#[test]
fn test_list_all_in_sync_order() {
    let ops = run_impl(&sample_queue(), false);
    assert_eq!(
        names(&ops),
        vec!["submit_inspection", "assign_task", "update_status", "refresh_cache"]
    );
}

#[test]
fn test_list_urgent_only() {
    let ops = run_impl(&sample_queue(), true);
    assert_eq!(names(&ops), vec!["submit_inspection", "assign_task"]);
}

#[test]
fn test_list_does_not_mutate() {
    let queue = sample_queue();
    run_impl(&queue, true);
    assert_eq!(queue.pending_count(), 4);
}
