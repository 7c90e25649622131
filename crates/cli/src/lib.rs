// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fieldsync - offline-first operation sync for field crews.
//!
//! Operations recorded while a site has no network wait in an
//! [`OfflineQueue`](fieldsync_core::OfflineQueue) and are replayed in
//! priority order once the backend is reachable again.
//!
//! # Main Components
//!
//! - [`RetryExecutor`] - runs async work with exponential backoff
//! - [`ConnectivityMonitor`] - probes the backend and publishes [`NetworkStatus`]
//! - [`SyncOrchestrator`] - drains the queue through an [`OperationExecutor`]
//! - [`SyncAgent`] - decides when to sync (reconnect, foreground, periodic, manual)
//!
//! # Wiring
//!
//! ```rust,ignore
//! let monitor = ConnectivityMonitor::new(HttpProbe::from_config(&config.probe)?, config.probe.monitor_config());
//! let queue = Arc::new(Mutex::new(OfflineQueue::new()));
//! let agent = SyncAgent::new(queue, monitor.subscribe(), executor, orchestrator, config.sync.interval());
//! let _monitor = monitor.spawn();
//! let handle = agent.spawn();
//! handle.notify(AppState::Foreground).await;
//! ```

mod cli;
mod commands;
mod display;
mod env;

pub mod agent;
pub mod alert;
pub mod config;
pub mod error;
pub mod executor;
pub mod monitor;
pub mod probe;
pub mod retry;
pub mod sync;

#[cfg(test)]
mod test_helpers;

pub use agent::{AgentHandle, AppState, SyncAgent, SyncTrigger};
pub use alert::{Alert, AlertAction, Alerter, LogAlerter};
pub use cli::{Cli, Command, ConfigCommand, OutputFormat};
pub use config::Config;
pub use error::{Error, Result};
pub use executor::{HttpExecutor, OperationExecutor};
pub use fieldsync_core::{NetworkStatus, OfflineQueue, Priority};
pub use monitor::{ConnectivityMonitor, MonitorConfig, MonitorHandle};
pub use probe::{HttpProbe, Probe};
pub use retry::{RetryExecutor, RetryPolicy};
pub use sync::{SyncOrchestrator, SyncReport};

use commands::Context;

/// Runs one CLI command.
pub async fn run(cli: Cli) -> Result<()> {
    let ctx = Context::load(cli.state_dir.as_deref())?;

    match cli.command {
        Command::Enqueue {
            operation,
            payload,
            priority,
            output,
        } => commands::enqueue::run(&ctx, operation, &payload, priority, output),
        Command::Send {
            operation,
            payload,
            priority,
            no_queue,
        } => commands::send::run(&ctx, operation, &payload, priority, !no_queue).await,
        Command::List { urgent, output } => commands::list::run(&ctx, urgent, output),
        Command::Remove { ids } => commands::remove::run(&ctx, &ids),
        Command::Clear => commands::remove::run_clear(&ctx),
        Command::Status { output } => commands::status::run(&ctx, output).await,
        Command::Sync { output } => commands::sync::run(&ctx, output).await,
        Command::Run => commands::run::run(&ctx).await,
        Command::Config { command } => commands::config::run(&ctx, command),
    }
}
