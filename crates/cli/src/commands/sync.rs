// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use fieldsync_core::OfflineQueue;

use crate::alert::LogAlerter;
use crate::cli::OutputFormat;
use crate::display::format_report;
use crate::error::Result;
use crate::sync::SyncOrchestrator;

use super::Context;

/// Probes once, then runs a single pass and saves what is left.
///
/// The queue lock is held for the whole pass, so invocations that change
/// the queue meanwhile wait and then see the result.
pub async fn run(ctx: &Context, output: OutputFormat) -> Result<()> {
    let status = ctx.monitor()?.refresh().await;
    let executor = ctx.executor()?;
    let orchestrator = SyncOrchestrator::new(Arc::new(LogAlerter));

    let path = ctx.queue_path();
    let _lock = ctx.lock_queue()?;
    let mut queue = OfflineQueue::load_jsonl(&path)?;
    let report = orchestrator
        .sync_pending(&mut queue, &status, &executor)
        .await;
    if !report.succeeded.is_empty() {
        queue.save_jsonl(&path)?;
    }

    match output {
        OutputFormat::Text => println!("{}", format_report(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
