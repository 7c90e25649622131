// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Background sync agent.
//!
//! The agent decides *when* to sync. It listens to the connectivity monitor,
//! app lifecycle signals and a periodic tick, and runs one
//! [`SyncOrchestrator`] pass per trigger. Passes never overlap: the loop
//! awaits each pass before selecting again. Cancellation is only observed
//! between passes, so a pass in flight always reaches its `on_pass` hook.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use fieldsync_core::{NetworkStatus, OfflineQueue};
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::executor::OperationExecutor;
use crate::sync::{SyncOrchestrator, SyncReport};

/// Queue shared between the agent and foreground callers.
pub type SharedQueue = Arc<Mutex<OfflineQueue>>;

/// Callback run before every pass with the queue locked.
pub type PrepareHook = Box<dyn Fn(&mut OfflineQueue) + Send + Sync>;

/// Callback run after every pass while the queue lock is still held.
pub type PassHook = Box<dyn Fn(SyncTrigger, &OfflineQueue, &SyncReport) + Send + Sync>;

/// Application lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Foreground,
    Background,
}

/// What started a sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    Periodic,
    Reconnected,
    Foreground,
    Manual,
}

impl fmt::Display for SyncTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncTrigger::Periodic => "periodic",
            SyncTrigger::Reconnected => "reconnected",
            SyncTrigger::Foreground => "foreground",
            SyncTrigger::Manual => "manual",
        };
        write!(f, "{s}")
    }
}

pub struct SyncAgent<E> {
    queue: SharedQueue,
    status_rx: watch::Receiver<NetworkStatus>,
    executor: E,
    orchestrator: SyncOrchestrator,
    interval: Duration,
    before_pass: Option<PrepareHook>,
    on_pass: Option<PassHook>,
}

impl<E: OperationExecutor + 'static> SyncAgent<E> {
    pub fn new(
        queue: SharedQueue,
        status_rx: watch::Receiver<NetworkStatus>,
        executor: E,
        orchestrator: SyncOrchestrator,
        interval: Duration,
    ) -> Self {
        SyncAgent {
            queue,
            status_rx,
            executor,
            orchestrator,
            interval,
            before_pass: None,
            on_pass: None,
        }
    }

    /// Installs a hook run before every pass, e.g. to reload the queue.
    pub fn before_pass<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut OfflineQueue) + Send + Sync + 'static,
    {
        self.before_pass = Some(Box::new(hook));
        self
    }

    /// Installs a hook run after every pass, e.g. to persist the queue.
    pub fn on_pass<F>(mut self, hook: F) -> Self
    where
        F: Fn(SyncTrigger, &OfflineQueue, &SyncReport) + Send + Sync + 'static,
    {
        self.on_pass = Some(Box::new(hook));
        self
    }

    /// Runs one pass against the latest known status.
    pub async fn sync_now(&self, trigger: SyncTrigger) -> SyncReport {
        let status = *self.status_rx.borrow();
        let mut queue = self.queue.lock().await;
        debug!(%trigger, %status, "sync triggered");
        if let Some(hook) = &self.before_pass {
            hook(&mut *queue);
        }
        let report = self
            .orchestrator
            .sync_pending(&mut queue, &status, &self.executor)
            .await;
        if let Some(hook) = &self.on_pass {
            hook(trigger, &*queue, &report);
        }
        report
    }

    /// Moves the agent onto a background task.
    pub fn spawn(self) -> AgentHandle {
        let (lifecycle_tx, lifecycle_rx) = mpsc::channel(16);
        let (manual_tx, manual_rx) = mpsc::channel(4);
        let token = CancellationToken::new();
        let task = tokio::spawn(self.run(lifecycle_rx, manual_rx, token.clone()));

        AgentHandle {
            lifecycle_tx,
            manual_tx,
            token,
            task: Some(task),
        }
    }

    async fn run(
        mut self,
        mut lifecycle_rx: mpsc::Receiver<AppState>,
        mut manual_rx: mpsc::Receiver<()>,
        token: CancellationToken,
    ) {
        let mut ticker = tokio::time::interval_at(
            tokio::time::Instant::now() + self.interval,
            self.interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut was_connected = self.status_rx.borrow_and_update().is_connected;

        info!(interval = ?self.interval, "sync agent started");
        loop {
            let trigger = tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => SyncTrigger::Periodic,
                changed = self.status_rx.changed() => {
                    if changed.is_err() {
                        debug!("status source closed");
                        break;
                    }
                    let connected = self.status_rx.borrow_and_update().is_connected;
                    let reconnected = connected && !was_connected;
                    was_connected = connected;
                    if !reconnected {
                        continue;
                    }
                    SyncTrigger::Reconnected
                }
                Some(state) = lifecycle_rx.recv() => {
                    debug!(?state, "lifecycle change");
                    if state != AppState::Foreground || !self.status_rx.borrow().is_connected {
                        continue;
                    }
                    SyncTrigger::Foreground
                }
                Some(()) = manual_rx.recv() => SyncTrigger::Manual,
            };

            let report = self.sync_now(trigger).await;
            if report.attempted > 0 {
                info!(
                    %trigger,
                    synced = report.succeeded.len(),
                    clean = report.is_clean(),
                    deferred = report.deferred,
                    "sync pass complete"
                );
            }
        }
        info!("sync agent stopped");
    }
}

/// Controls a spawned [`SyncAgent`].
pub struct AgentHandle {
    lifecycle_tx: mpsc::Sender<AppState>,
    manual_tx: mpsc::Sender<()>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl AgentHandle {
    /// Sender for app lifecycle changes.
    pub fn lifecycle(&self) -> mpsc::Sender<AppState> {
        self.lifecycle_tx.clone()
    }

    pub async fn notify(&self, state: AppState) {
        let _ = self.lifecycle_tx.send(state).await;
    }

    /// Asks for a pass now, regardless of the periodic schedule.
    pub async fn request_sync(&self) {
        let _ = self.manual_tx.send(()).await;
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Stops the agent and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for AgentHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
