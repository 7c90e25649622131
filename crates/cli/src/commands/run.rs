// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use fieldsync_core::{OfflineQueue, QueueLock};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::agent::{SharedQueue, SyncAgent};
use crate::alert::LogAlerter;
use crate::error::Result;
use crate::sync::SyncOrchestrator;

use super::Context;

/// Runs the monitor and sync agent until Ctrl-C.
///
/// Each pass holds the queue lock from `before_pass` to `on_pass`: the file
/// is reloaded so operations queued by other invocations are picked up, and
/// saved if the pass removed anything. A pass that could not lock or reload
/// the file works on the in-memory copy and leaves the file alone.
pub async fn run(ctx: &Context) -> Result<()> {
    let queue: SharedQueue = Arc::new(Mutex::new(ctx.open_queue()?));
    let monitor = ctx.monitor()?;
    let executor = ctx.executor()?;
    let orchestrator = SyncOrchestrator::new(Arc::new(LogAlerter));

    let held: Arc<StdMutex<Option<QueueLock>>> = Arc::default();
    let load_path = ctx.queue_path();
    let save_path = load_path.clone();
    let load_held = Arc::clone(&held);
    let agent = SyncAgent::new(
        queue,
        monitor.subscribe(),
        executor,
        orchestrator,
        ctx.config.sync.interval(),
    )
    .before_pass(move |queue| {
        let lock = match QueueLock::acquire(&load_path) {
            Ok(lock) => lock,
            Err(e) => {
                warn!(error = %e, "cannot lock queue, using in-memory copy");
                return;
            }
        };
        match OfflineQueue::load_jsonl(&load_path) {
            Ok(fresh) => *queue = fresh,
            Err(e) => {
                warn!(error = %e, "cannot reload queue, using in-memory copy");
                return;
            }
        }
        *load_held.lock().unwrap_or_else(PoisonError::into_inner) = Some(lock);
    })
    .on_pass(move |_trigger, queue, report| {
        let Some(_lock) = held.lock().unwrap_or_else(PoisonError::into_inner).take() else {
            return;
        };
        if report.succeeded.is_empty() {
            return;
        }
        if let Err(e) = queue.save_jsonl(&save_path) {
            warn!(error = %e, "cannot save queue");
        }
    });

    let monitor_handle = monitor.spawn();
    let agent_handle = agent.spawn();
    info!(
        queue = %ctx.queue_path().display(),
        probe = %ctx.config.probe.url,
        "running, press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    agent_handle.shutdown().await;
    monitor_handle.shutdown().await;
    Ok(())
}
