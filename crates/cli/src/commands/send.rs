// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use fieldsync_core::{Classify, FailureKind, FailureReport, OpId, Priority};
use tracing::info;

use crate::alert::LogAlerter;
use crate::error::Result;
use crate::executor::OperationExecutor;
use crate::retry::RetryExecutor;

use super::enqueue::parse_payload;
use super::Context;

/// What happened to an operation sent directly.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SendOutcome {
    Sent { attempts: u32 },
    Queued { id: OpId, report: FailureReport },
}

/// Executes an operation now with retries, queueing it if the network is down.
pub async fn run(
    ctx: &Context,
    operation: String,
    payload: &str,
    priority: Priority,
    queue_on_failure: bool,
) -> Result<()> {
    let payload = parse_payload(payload)?;
    let executor = ctx.executor()?;
    let retry = RetryExecutor::new(ctx.config.retry.policy()).with_alerter(Arc::new(LogAlerter));

    let outcome = run_impl(
        &retry,
        &executor,
        operation,
        payload,
        priority,
        queue_on_failure,
        |operation, payload, priority| {
            ctx.append_to_queue(|queue| Ok(queue.enqueue(operation, payload, priority)))
                .map(|op| op.id)
        },
    )
    .await?;

    match outcome {
        SendOutcome::Sent { attempts } => println!("Sent after {attempts} attempt(s)"),
        SendOutcome::Queued { id, report } => {
            println!("Queued {id} for the next sync: {}", report.user_message)
        }
    }
    Ok(())
}

/// Network failures fall back to the queue; anything else is returned.
pub(crate) async fn run_impl<E, Q>(
    retry: &RetryExecutor,
    executor: &E,
    operation: String,
    payload: serde_json::Value,
    priority: Priority,
    queue_on_failure: bool,
    queue_op: Q,
) -> Result<SendOutcome>
where
    E: OperationExecutor + ?Sized,
    Q: FnOnce(String, serde_json::Value, Priority) -> Result<OpId>,
{
    let context = format!("send {operation}");
    let result = retry
        .execute_with_retry(
            || executor.execute(&operation, &payload),
            &context,
            priority == Priority::Critical,
        )
        .await;

    match result {
        Ok(()) => Ok(SendOutcome::Sent {
            attempts: retry.retry_count(),
        }),
        Err(e) if queue_on_failure && e.failure_kind() == FailureKind::Network => {
            let report = FailureReport::from_error(&e);
            let id = queue_op(operation, payload, priority)?;
            info!(%id, "network unavailable, operation queued");
            Ok(SendOutcome::Queued { id, report })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "send_tests.rs"]
mod tests;
