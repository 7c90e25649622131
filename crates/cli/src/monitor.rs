// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitoring.
//!
//! The monitor turns probe outcomes into a [`NetworkStatus`] published on a
//! `watch` channel. Probe failures never surface as errors: they become an
//! offline status and bump the consecutive-failure counter.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fieldsync_core::{LinkStrength, NetworkStatus};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::Error;
use crate::probe::Probe;

/// Probe cadence and per-probe timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            interval: Duration::from_secs(30),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Tracks whether the backend is reachable.
///
/// Cloning is cheap and every clone shares the same state, so one clone can
/// run the background loop while others call [`refresh`](Self::refresh).
#[derive(Clone)]
pub struct ConnectivityMonitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    probe: Box<dyn Probe>,
    config: MonitorConfig,
    status_tx: watch::Sender<NetworkStatus>,
    failures: AtomicU32,
}

impl ConnectivityMonitor {
    /// Creates a monitor that reports offline until the first probe completes.
    pub fn new<P: Probe + 'static>(probe: P, config: MonitorConfig) -> Self {
        let (status_tx, _) = watch::channel(NetworkStatus::offline());
        ConnectivityMonitor {
            inner: Arc::new(MonitorInner {
                probe: Box::new(probe),
                config,
                status_tx,
                failures: AtomicU32::new(0),
            }),
        }
    }

    /// Current status.
    pub fn status(&self) -> NetworkStatus {
        *self.inner.status_tx.borrow()
    }

    /// Receiver notified on every probe outcome.
    pub fn subscribe(&self) -> watch::Receiver<NetworkStatus> {
        self.inner.status_tx.subscribe()
    }

    /// Consecutive failed probes since the last success.
    pub fn failure_count(&self) -> u32 {
        self.inner.failures.load(Ordering::SeqCst)
    }

    /// Probes now and publishes the outcome.
    pub async fn refresh(&self) -> NetworkStatus {
        let inner = &self.inner;
        let outcome = tokio::time::timeout(inner.config.timeout, inner.probe.check())
            .await
            .unwrap_or_else(|_| Err(Error::ProbeTimeout(inner.config.timeout)));

        let status = match outcome {
            Ok(()) => {
                inner.failures.store(0, Ordering::SeqCst);
                NetworkStatus::online(LinkStrength::Good)
            }
            Err(e) => {
                let failures = inner.failures.fetch_add(1, Ordering::SeqCst) + 1;
                debug!(failures, error = %e, "connectivity probe failed");
                NetworkStatus::offline()
            }
        };

        let previous = inner.status_tx.send_replace(status);
        if previous.is_connected != status.is_connected {
            info!("network {}", status);
        }
        status
    }

    /// Starts probing in the background: once immediately, then every interval.
    pub fn spawn(&self) -> MonitorHandle {
        let token = CancellationToken::new();
        let cancel = token.clone();
        let monitor = self.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(monitor.inner.config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = monitor.refresh() => {}
                }
            }
            debug!("connectivity monitor stopped");
        });

        MonitorHandle {
            token,
            task: Some(task),
        }
    }
}

/// Owns the background probe loop. Dropping the handle cancels the loop.
pub struct MonitorHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Token that stops the loop when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancels the loop and waits for it to finish.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
