// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fieldsync_core::{OfflineQueue, OpId};

use crate::error::Result;

use super::Context;

pub fn run(ctx: &Context, ids: &[String]) -> Result<()> {
    let outcomes = ctx.update_queue(|queue| run_impl(queue, ids))?;

    for (id, removed) in outcomes {
        if removed {
            println!("Removed {id}");
        } else {
            println!("{id} is not queued");
        }
    }
    Ok(())
}

/// Removes each id. Every id is validated before anything is removed.
pub(crate) fn run_impl(queue: &mut OfflineQueue, ids: &[String]) -> Result<Vec<(OpId, bool)>> {
    let ids = ids
        .iter()
        .map(|id| id.trim().parse::<OpId>())
        .collect::<fieldsync_core::Result<Vec<_>>>()?;
    Ok(ids.into_iter().map(|id| (id, queue.remove(&id))).collect())
}

pub fn run_clear(ctx: &Context) -> Result<()> {
    let cleared = ctx.update_queue(|queue| {
        let cleared = queue.pending_count();
        queue.clear();
        Ok(cleared)
    })?;
    println!("Cleared {cleared} operation(s)");
    Ok(())
}

#[cfg(test)]
#[path = "remove_tests.rs"]
mod tests;
