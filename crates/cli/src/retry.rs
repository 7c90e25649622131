// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Retry with exponential backoff.
//!
//! [`RetryExecutor::execute_with_retry`] runs an async operation up to
//! `max_retries + 1` times. Intermediate failures are logged and swallowed;
//! the final failure is classified, logged, optionally raised as an alert,
//! and returned unchanged to the caller.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fieldsync_core::{Classify, FailureReport};
use tracing::{debug, error, warn};

use crate::alert::{Alert, Alerter};

/// Backoff schedule: `min(base_delay * 2^retry, max_delay)`, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(1_000),
            max_delay: Duration::from_millis(10_000),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry `retry` (0-based from the first retry).
    pub fn delay_for(&self, retry: u32) -> Duration {
        2u32.checked_pow(retry)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Total attempts allowed, counting the first one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Runs operations with retries and records how many attempts the most
/// recent invocation made.
pub struct RetryExecutor {
    policy: RetryPolicy,
    last_attempts: AtomicU32,
    alerter: Option<Arc<dyn Alerter>>,
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        RetryExecutor {
            policy,
            last_attempts: AtomicU32::new(0),
            alerter: None,
        }
    }

    /// Routes terminal failures of critical operations to `alerter`.
    pub fn with_alerter(mut self, alerter: Arc<dyn Alerter>) -> Self {
        self.alerter = Some(alerter);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Runs `operation` until it succeeds or the retry budget is spent.
    ///
    /// `context` names the operation in logs and alerts. When `is_critical`
    /// is set, a terminal failure also raises an [`Alert`]. The error of the
    /// last attempt is returned as-is.
    pub async fn execute_with_retry<T, E, F, Fut>(
        &self,
        mut operation: F,
        context: &str,
        is_critical: bool,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Classify + Display,
    {
        self.last_attempts.store(0, Ordering::SeqCst);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            self.last_attempts.store(attempt, Ordering::SeqCst);

            let err = match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(context, attempts = attempt, "operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            if attempt > self.policy.max_retries {
                let report = FailureReport::from_error(&err);
                error!(
                    context,
                    attempts = attempt,
                    kind = %report.kind,
                    "operation failed: {}",
                    report.technical_message
                );
                if is_critical {
                    if let Some(alerter) = &self.alerter {
                        alerter.alert(&Alert::operation_failure(context, &report));
                    }
                }
                return Err(err);
            }

            let delay = self.policy.delay_for(attempt - 1);
            warn!(
                context,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "operation failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Attempts made by the most recent invocation.
    pub fn retry_count(&self) -> u32 {
        self.last_attempts.load(Ordering::SeqCst)
    }

    /// Zeroes the recorded attempt count.
    pub fn reset(&self) {
        self.last_attempts.store(0, Ordering::SeqCst);
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        RetryExecutor::new(RetryPolicy::default())
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
