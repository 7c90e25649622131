// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fieldsync_core::{OfflineQueue, QueuedOperation};

use crate::cli::OutputFormat;
use crate::display::format_op_list;
use crate::error::Result;

use super::Context;

pub fn run(ctx: &Context, urgent: bool, output: OutputFormat) -> Result<()> {
    let queue = ctx.open_queue()?;
    let ops = run_impl(&queue, urgent);

    match output {
        OutputFormat::Text => println!("{}", format_op_list(&ops)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ops)?),
    }
    Ok(())
}

/// Operations in sync order, optionally only the urgent ones.
pub(crate) fn run_impl(queue: &OfflineQueue, urgent: bool) -> Vec<QueuedOperation> {
    if urgent {
        queue.urgent_snapshot()
    } else {
        queue.snapshot()
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
