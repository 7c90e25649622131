// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use fieldsync_core::Priority;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "fieldsync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline operation queue and sync agent for field crews")]
#[command(
    long_about = "Offline operation queue and sync agent for field crews.\n\n\
    Operations are queued locally while the site has no network and are \
    replayed in priority order once the backend is reachable again."
)]
pub struct Cli {
    /// Directory holding the queue file and config
    #[arg(long, global = true, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Queue an operation for the next sync
    #[command(after_help = "\
Examples:
  fieldsync enqueue submit_inspection -d '{\"site\": 4}' -p critical
  fieldsync enqueue update_status -d '{\"task\": \"t-12\", \"status\": \"done\"}'
  fieldsync enqueue refresh_cache -p low")]
    Enqueue {
        /// Operation name, posted to {executor.base_url}/{operation}
        #[arg(value_parser = non_empty_string)]
        operation: String,

        /// JSON payload
        #[arg(long, short = 'd', default_value = "{}")]
        payload: String,

        /// Priority: critical, high, normal or low
        #[arg(long, short, default_value = "normal")]
        priority: Priority,

        /// Output format
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Execute an operation now with retries, queueing it if the network is down
    #[command(after_help = "\
Examples:
  fieldsync send assign_task -d '{\"task\": \"t-7\", \"crew\": \"c-2\"}' -p high
  fieldsync send submit_inspection -d '{\"site\": 4}' -p critical --no-queue")]
    Send {
        /// Operation name, posted to {executor.base_url}/{operation}
        #[arg(value_parser = non_empty_string)]
        operation: String,

        /// JSON payload
        #[arg(long, short = 'd', default_value = "{}")]
        payload: String,

        /// Priority used if the operation ends up queued
        #[arg(long, short, default_value = "normal")]
        priority: Priority,

        /// Fail instead of queueing when the network is down
        #[arg(long)]
        no_queue: bool,
    },

    /// List queued operations in sync order
    List {
        /// Only critical and high priority operations
        #[arg(long)]
        urgent: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Remove operations from the queue
    Remove {
        /// Operation ids (op-<millis>-<seq>)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Drop every queued operation
    Clear,

    /// Probe the backend once and print the network status
    Status {
        /// Output format
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Probe once, then run a single sync pass
    Sync {
        /// Output format
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Monitor connectivity and sync in the background until interrupted
    Run,

    /// Show or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
