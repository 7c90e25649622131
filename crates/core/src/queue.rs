// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory offline operation queue.
//!
//! Holds operations that could not run immediately. Entries are kept in
//! queue order at all times: descending priority, then ascending
//! `enqueued_at`, then ascending sequence number. The queue owns its entries;
//! callers only ever see clones.
//!
//! The queue lives for the process. [`OfflineQueue::load_jsonl`],
//! [`OfflineQueue::save_jsonl`] and [`OfflineQueue::append_jsonl`] exist for
//! front ends that share a queue file across processes; such callers hold a
//! [`QueueLock`](crate::QueueLock) from load to write. Nothing here persists
//! implicitly.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::clock::{millis_to_utc, ClockSource, SystemClock};
use crate::error::Result;
use crate::jsonl;
use crate::op::{OpId, QueuedOperation};
use crate::priority::Priority;

/// Priority-ordered queue of deferred operations.
pub struct OfflineQueue {
    entries: Vec<QueuedOperation>,
    next_seq: u64,
    clock: Box<dyn ClockSource>,
}

impl OfflineQueue {
    /// Creates an empty queue stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates an empty queue with a custom clock source.
    pub fn with_clock<C: ClockSource + 'static>(clock: C) -> Self {
        OfflineQueue {
            entries: Vec::new(),
            next_seq: 1,
            clock: Box::new(clock),
        }
    }

    /// Adds an operation and returns its id.
    pub fn enqueue(
        &mut self,
        operation_name: impl Into<String>,
        payload: serde_json::Value,
        priority: Priority,
    ) -> OpId {
        let wall_ms = self.clock.now_ms();
        let id = OpId::new(wall_ms, self.next_seq);
        self.next_seq += 1;

        self.insert(QueuedOperation {
            id,
            operation_name: operation_name.into(),
            payload,
            enqueued_at: millis_to_utc(wall_ms),
            priority,
        });
        id
    }

    /// Removes the operation with the given id.
    ///
    /// Returns whether anything was removed. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &OpId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|op| op.id != *id);
        self.entries.len() != before
    }

    /// Looks up an operation by id.
    pub fn get(&self, id: &OpId) -> Option<&QueuedOperation> {
        self.entries.iter().find(|op| op.id == *id)
    }

    /// Total entries currently queued.
    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries with priority `critical` or `high`.
    pub fn critical_pending_count(&self) -> usize {
        self.entries.iter().filter(|op| op.is_urgent()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the queue unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns all entries in queue order.
    pub fn snapshot(&self) -> Vec<QueuedOperation> {
        self.entries.clone()
    }

    /// Returns entries matching `predicate`, in queue order.
    pub fn snapshot_filtered<F>(&self, predicate: F) -> Vec<QueuedOperation>
    where
        F: Fn(&QueuedOperation) -> bool,
    {
        self.entries
            .iter()
            .filter(|&op| predicate(op))
            .cloned()
            .collect()
    }

    /// Returns the `critical` and `high` entries, in queue order.
    pub fn urgent_snapshot(&self) -> Vec<QueuedOperation> {
        self.snapshot_filtered(QueuedOperation::is_urgent)
    }

    /// Loads a queue previously written by [`save_jsonl`](Self::save_jsonl).
    ///
    /// A missing file yields an empty queue. Later lines repeating an id
    /// already seen are dropped. New ids continue past the largest loaded
    /// sequence number.
    pub fn load_jsonl(path: &Path) -> Result<Self> {
        let mut queue = Self::new();
        queue.restore(jsonl::read_all(path)?);
        Ok(queue)
    }

    /// Writes every entry, in queue order, one per line.
    pub fn save_jsonl(&self, path: &Path) -> Result<()> {
        jsonl::write_all(path, &self.entries)
    }

    /// Appends one entry to a queue file without rewriting the rest.
    ///
    /// Returns the appended entry, or `None` when `id` is not queued here.
    pub fn append_jsonl(&self, id: &OpId, path: &Path) -> Result<Option<&QueuedOperation>> {
        let Some(op) = self.get(id) else {
            return Ok(None);
        };
        jsonl::append(path, op)?;
        Ok(Some(op))
    }

    /// Adds previously issued operations back into the queue.
    pub fn restore(&mut self, ops: Vec<QueuedOperation>) {
        let mut seen: HashSet<OpId> = self.entries.iter().map(|op| op.id).collect();

        for op in ops {
            if !seen.insert(op.id) {
                continue;
            }
            self.next_seq = self.next_seq.max(op.id.seq + 1);
            self.entries.push(op);
        }
        self.entries.sort_by(QueuedOperation::queue_order);
    }

    fn insert(&mut self, op: QueuedOperation) {
        let at = self
            .entries
            .partition_point(|existing| existing.queue_order(&op) != Ordering::Greater);
        self.entries.insert(at, op);
    }
}

impl Default for OfflineQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OfflineQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OfflineQueue")
            .field("entries", &self.entries)
            .field("next_seq", &self.next_seq)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
