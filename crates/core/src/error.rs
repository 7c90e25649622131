// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for fieldsync-core operations.

use thiserror::Error;

use crate::failure::{Classify, FailureKind};

/// All possible errors that can occur in fieldsync-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid priority: '{0}'\n  hint: valid priorities are: critical, high, normal, low")]
    InvalidPriority(String),

    #[error("invalid link strength: '{0}'\n  hint: valid values are: poor, fair, good, excellent")]
    InvalidStrength(String),

    #[error("invalid operation id: '{0}'")]
    InvalidOpId(String),

    #[error("corrupted queue file: line {line}: {reason}")]
    CorruptedQueue { line: usize, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for fieldsync-core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Classify for Error {
    fn failure_kind(&self) -> FailureKind {
        match self {
            Error::Io(e) => e.failure_kind(),
            _ => FailureKind::Generic,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
