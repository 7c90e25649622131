// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queued operations.
//!
//! A [`QueuedOperation`] is a deferred call: the name of an executor routine,
//! an opaque JSON payload for it, and the bookkeeping the queue needs to order
//! it (priority and enqueue time).
//!
//! Ids have the form `op-{wall_ms}-{seq}`. `seq` comes from a per-queue
//! counter, so two operations enqueued in the same millisecond still get
//! distinct ids.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::priority::Priority;

/// Unique identifier for a queued operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OpId {
    /// Wall clock time of the enqueue, in milliseconds since Unix epoch.
    pub wall_ms: u64,
    /// Queue-local sequence number.
    pub seq: u64,
}

impl OpId {
    pub fn new(wall_ms: u64, seq: u64) -> Self {
        OpId { wall_ms, seq }
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op-{}-{}", self.wall_ms, self.seq)
    }
}

impl FromStr for OpId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rest = s
            .strip_prefix("op-")
            .ok_or_else(|| Error::InvalidOpId(s.to_string()))?;
        let (wall, seq) = rest
            .split_once('-')
            .ok_or_else(|| Error::InvalidOpId(s.to_string()))?;

        let wall_ms = wall
            .parse::<u64>()
            .map_err(|_| Error::InvalidOpId(s.to_string()))?;
        let seq = seq
            .parse::<u64>()
            .map_err(|_| Error::InvalidOpId(s.to_string()))?;

        Ok(OpId::new(wall_ms, seq))
    }
}

impl TryFrom<String> for OpId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<OpId> for String {
    fn from(id: OpId) -> Self {
        id.to_string()
    }
}

/// An operation waiting in the offline queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedOperation {
    pub id: OpId,
    /// Which executor routine to invoke.
    pub operation_name: String,
    /// Caller-owned data handed to the executor unchanged.
    pub payload: serde_json::Value,
    pub enqueued_at: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
}

impl QueuedOperation {
    /// Returns true if this operation may run on a poor link.
    pub fn is_urgent(&self) -> bool {
        self.priority.is_urgent()
    }

    /// Queue ordering: higher priority first, then older first, then lower
    /// sequence number first.
    pub fn queue_order(&self, other: &Self) -> std::cmp::Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.enqueued_at.cmp(&other.enqueued_at))
            .then_with(|| self.id.seq.cmp(&other.id.seq))
    }
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;
