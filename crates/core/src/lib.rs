// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fieldsync-core: data model and offline operation queue for fieldsync.
//!
//! This crate holds everything that does not need an async runtime: the
//! queued operation record, priorities, network status values, failure
//! classification, and the in-memory [`OfflineQueue`] itself. The `fieldsync`
//! crate layers retry, connectivity monitoring, and sync orchestration on top.

pub mod clock;
pub mod error;
pub mod failure;
pub mod jsonl;
pub mod lock;
pub mod op;
pub mod priority;
pub mod queue;
pub mod status;

pub use clock::{ClockSource, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use failure::{Classify, FailureKind, FailureReport};
pub use lock::QueueLock;
pub use op::{OpId, QueuedOperation};
pub use priority::Priority;
pub use queue::OfflineQueue;
pub use status::{LinkStrength, NetworkStatus};
