// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fieldsync_core::{NetworkStatus, OfflineQueue};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::display::format_status;
use crate::error::Result;

use super::Context;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct StatusJson {
    #[serde(flatten)]
    network: NetworkStatus,
    failed_probes: u32,
    pending: usize,
    urgent: usize,
}

pub async fn run(ctx: &Context, output: OutputFormat) -> Result<()> {
    let queue = ctx.open_queue()?;
    let monitor = ctx.monitor()?;
    let network = monitor.refresh().await;
    let summary = summarize(network, monitor.failure_count(), &queue);

    match output {
        OutputFormat::Text => {
            println!("{}", format_status(&summary.network, summary.failed_probes));
            println!(
                "Queue: {} pending ({} urgent)",
                summary.pending, summary.urgent
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

pub(crate) fn summarize(
    network: NetworkStatus,
    failed_probes: u32,
    queue: &OfflineQueue,
) -> StatusJson {
    StatusJson {
        network,
        failed_probes,
        pending: queue.pending_count(),
        urgent: queue.critical_pending_count(),
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
