// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use fieldsync_core::{Classify, FailureKind};
use thiserror::Error;

/// All possible errors that can occur in the fieldsync library.
///
/// HTTP failures are classified where they happen, so callers never have to
/// guess a [`FailureKind`] from message text.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] fieldsync_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("cannot write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid payload: {reason}\n  hint: payloads must be valid JSON, e.g. '{{\"task\": \"t-12\"}}'")]
    InvalidPayload { reason: String },

    #[error("request failed ({kind}): {message}")]
    Http { kind: FailureKind, message: String },

    #[error("{url} answered {status}")]
    Status { status: u16, url: String },

    #[error("probe timed out after {0:?}")]
    ProbeTimeout(Duration),

    #[error("{operation} failed ({kind}): {message}")]
    Operation {
        operation: String,
        kind: FailureKind,
        message: String,
    },
}

/// A specialized Result type for fieldsync operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Builds an executor failure with an explicit kind.
    pub fn operation(
        operation: impl Into<String>,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Error::Operation {
            operation: operation.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Maps an HTTP status code to a failure kind.
pub fn status_kind(status: u16) -> FailureKind {
    match status {
        401 | 403 => FailureKind::Permission,
        404 | 410 => FailureKind::NotFound,
        408 | 502..=504 => FailureKind::Network,
        _ => FailureKind::Generic,
    }
}

impl Classify for Error {
    fn failure_kind(&self) -> FailureKind {
        match self {
            Error::Core(e) => e.failure_kind(),
            Error::Io(e) => e.failure_kind(),
            Error::Http { kind, .. } | Error::Operation { kind, .. } => *kind,
            Error::Status { status, .. } => status_kind(*status),
            Error::ProbeTimeout(_) => FailureKind::Network,
            Error::Json(_)
            | Error::ConfigParse(_)
            | Error::ConfigWrite(_)
            | Error::Config(_)
            | Error::InvalidPayload { .. } => FailureKind::Generic,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return Error::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }

        let kind = if e.is_timeout() || e.is_connect() || e.is_request() {
            FailureKind::Network
        } else {
            FailureKind::Generic
        };
        Error::Http {
            kind,
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
