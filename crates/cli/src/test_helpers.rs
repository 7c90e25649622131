// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

//! Shared test doubles for probes, executors and alerts.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fieldsync_core::FailureKind;

use crate::alert::{Alert, Alerter};
use crate::error::Error;
use crate::executor::{ExecuteFuture, OperationExecutor};
use crate::probe::{Probe, ProbeFuture};

/// Outcome of one scripted probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
    Unreachable,
    /// Never completes within any reasonable timeout.
    Hang,
}

/// Probe that replays a script, then repeats a fallback outcome.
#[derive(Clone)]
pub struct MockProbe {
    script: Arc<Mutex<VecDeque<ProbeOutcome>>>,
    fallback: Arc<Mutex<ProbeOutcome>>,
    calls: Arc<Mutex<usize>>,
}

impl MockProbe {
    pub fn new(fallback: ProbeOutcome) -> Self {
        MockProbe {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Arc::new(Mutex::new(fallback)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn reachable() -> Self {
        Self::new(ProbeOutcome::Reachable)
    }

    pub fn unreachable() -> Self {
        Self::new(ProbeOutcome::Unreachable)
    }

    /// Queue outcomes returned before the fallback.
    pub fn then(self, outcomes: &[ProbeOutcome]) -> Self {
        self.script.lock().unwrap().extend(outcomes.iter().copied());
        self
    }

    pub fn set_fallback(&self, outcome: ProbeOutcome) {
        *self.fallback.lock().unwrap() = outcome;
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl Probe for MockProbe {
    fn check(&self) -> ProbeFuture<'_> {
        *self.calls.lock().unwrap() += 1;
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| *self.fallback.lock().unwrap());
        Box::pin(async move {
            match outcome {
                ProbeOutcome::Reachable => Ok(()),
                ProbeOutcome::Unreachable => Err(Error::Http {
                    kind: FailureKind::Network,
                    message: "connection refused".into(),
                }),
                ProbeOutcome::Hang => {
                    tokio::time::sleep(Duration::from_secs(3_600)).await;
                    Ok(())
                }
            }
        })
    }
}

/// Executor that records calls and fails configured operation names.
#[derive(Clone, Default)]
pub struct MockExecutor {
    calls: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
    failures: Arc<Mutex<HashMap<String, FailureKind>>>,
    latency: Arc<Mutex<Option<Duration>>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call to `operation_name` fails with `kind`.
    pub fn fail(&self, operation_name: &str, kind: FailureKind) {
        self.failures
            .lock()
            .unwrap()
            .insert(operation_name.to_string(), kind);
    }

    /// Every call takes `latency` before answering.
    pub fn slow(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    pub fn heal(&self, operation_name: &str) {
        self.failures.lock().unwrap().remove(operation_name);
    }

    /// Operation names in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn payloads(&self) -> Vec<serde_json::Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

impl OperationExecutor for MockExecutor {
    fn execute<'a>(
        &'a self,
        operation_name: &'a str,
        payload: &'a serde_json::Value,
    ) -> ExecuteFuture<'a> {
        self.calls
            .lock()
            .unwrap()
            .push((operation_name.to_string(), payload.clone()));
        let failure = self.failures.lock().unwrap().get(operation_name).copied();
        let latency = *self.latency.lock().unwrap();
        Box::pin(async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            match failure {
                Some(kind) => Err(Error::operation(operation_name, kind, "rejected by mock")),
                None => Ok(()),
            }
        })
    }
}

/// Alerter that keeps every alert it receives.
#[derive(Default)]
pub struct RecordingAlerter {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingAlerter {
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Alerter for RecordingAlerter {
    fn alert(&self, alert: &Alert) {
        self.alerts.lock().unwrap().push(alert.clone());
    }
}
