// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing alerts for failures that block important work.

use std::fmt;
use std::sync::Arc;

use fieldsync_core::{FailureReport, QueuedOperation};

/// A choice offered to the user alongside an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    TryAgain,
    ContinueOffline,
    Acknowledge,
}

impl AlertAction {
    pub fn label(&self) -> &'static str {
        match self {
            AlertAction::TryAgain => "Try again",
            AlertAction::ContinueOffline => "Continue offline",
            AlertAction::Acknowledge => "OK",
        }
    }
}

impl fmt::Display for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A blocking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub actions: Vec<AlertAction>,
}

impl Alert {
    /// Alert for a critical queued operation that failed during sync.
    pub fn sync_failure(operation: &QueuedOperation, report: &FailureReport) -> Self {
        Alert {
            title: "Sync Failed".to_string(),
            message: format!(
                "Critical operation '{}' could not be synced. {}",
                operation.operation_name, report.user_message
            ),
            actions: vec![AlertAction::TryAgain, AlertAction::ContinueOffline],
        }
    }

    /// Alert for a critical operation that exhausted its retries.
    pub fn operation_failure(context: &str, report: &FailureReport) -> Self {
        Alert {
            title: "Operation Failed".to_string(),
            message: format!("{context}: {}", report.user_message),
            actions: vec![AlertAction::Acknowledge],
        }
    }
}

/// Receives alerts. Implementations decide how to present them.
pub trait Alerter: Send + Sync {
    fn alert(&self, alert: &Alert);
}

impl<A: Alerter + ?Sized> Alerter for Arc<A> {
    fn alert(&self, alert: &Alert) {
        (**self).alert(alert)
    }
}

/// Reports alerts through `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlerter;

impl Alerter for LogAlerter {
    fn alert(&self, alert: &Alert) {
        let actions: Vec<&str> = alert.actions.iter().map(AlertAction::label).collect();
        tracing::error!(title = %alert.title, actions = ?actions, "{}", alert.message);
    }
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
