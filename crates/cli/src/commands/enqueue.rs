// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fieldsync_core::{OfflineQueue, OpId, Priority};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::{Error, Result};

use super::Context;

pub fn run(
    ctx: &Context,
    operation: String,
    payload: &str,
    priority: Priority,
    output: OutputFormat,
) -> Result<()> {
    let op = ctx.append_to_queue(|queue| run_impl(queue, operation, payload, priority))?;

    match output {
        OutputFormat::Text => {
            println!("Queued {} [{}] {}", op.id, op.priority, op.operation_name)
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&op)?),
    }
    Ok(())
}

/// Parses the payload and queues the operation.
pub(crate) fn run_impl(
    queue: &mut OfflineQueue,
    operation: String,
    payload: &str,
    priority: Priority,
) -> Result<OpId> {
    let payload = parse_payload(payload)?;
    let id = queue.enqueue(operation, payload, priority);
    debug!(%id, %priority, pending = queue.pending_count(), "operation queued");
    Ok(id)
}

pub(crate) fn parse_payload(payload: &str) -> Result<serde_json::Value> {
    serde_json::from_str(payload).map_err(|e| Error::InvalidPayload {
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "enqueue_tests.rs"]
mod tests;
