// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Failure classification.
//!
//! Errors are sorted into a small taxonomy that only drives the message shown
//! to the person holding the device. Classification never changes retry or
//! backoff behavior.
//!
//! The kind is expected to come from the layer that produced the error (the
//! HTTP client knows a 403 is a permission problem), via [`Classify`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Connectivity loss, DNS failure, or timeout.
    Network,
    /// Authorization denied.
    Permission,
    /// The target resource does not exist.
    NotFound,
    /// Anything else.
    Generic,
}

impl FailureKind {
    /// Returns the user-facing message for this kind of failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::Network => {
                "Unable to reach the server. Your changes are kept on this device and will sync when the site connection returns."
            }
            FailureKind::Permission => "You do not have permission to perform this action.",
            FailureKind::NotFound => "The requested item could not be found. It may have been removed.",
            FailureKind::Generic => "Something went wrong. Please try again.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Network => "network",
            FailureKind::Permission => "permission",
            FailureKind::NotFound => "not_found",
            FailureKind::Generic => "generic",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that know which [`FailureKind`] they belong to.
pub trait Classify {
    fn failure_kind(&self) -> FailureKind;
}

impl Classify for std::io::Error {
    fn failure_kind(&self) -> FailureKind {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::NotFound => FailureKind::NotFound,
            ErrorKind::PermissionDenied => FailureKind::Permission,
            ErrorKind::TimedOut
            | ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::NotConnected
            | ErrorKind::BrokenPipe => FailureKind::Network,
            _ => FailureKind::Generic,
        }
    }
}

/// A classified terminal failure, ready for logging or display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    pub kind: FailureKind,
    /// Message suitable for an alert shown to the user.
    pub user_message: String,
    /// The error's own description, for logs.
    pub technical_message: String,
}

impl FailureReport {
    /// Builds a report from any classifiable error.
    pub fn from_error<E: Classify + fmt::Display + ?Sized>(err: &E) -> Self {
        let kind = err.failure_kind();
        FailureReport {
            kind,
            user_message: kind.user_message().to_string(),
            technical_message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "failure_tests.rs"]
mod tests;
