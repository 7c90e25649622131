// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration.
//!
//! Configuration is stored in `fieldsync.toml` inside the state directory and
//! has four sections:
//! - `probe`: connectivity probe endpoint, interval and timeout
//! - `retry`: backoff schedule for the retry executor
//! - `sync`: periodic sync interval and queue file location
//! - `executor`: remote endpoint that receives queued operations
//!
//! Every field has a default, so a missing file or a partial file is valid.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};
use crate::monitor::MonitorConfig;
use crate::retry::RetryPolicy;

const STATE_DIR_NAME: &str = "fieldsync";
const CONFIG_FILE_NAME: &str = "fieldsync.toml";
const QUEUE_FILE_NAME: &str = "queue.jsonl";

/// Top-level configuration stored in `fieldsync.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub executor: ExecutorConfig,
}

/// Connectivity probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Endpoint that answers a `HEAD` request when the network is usable.
    #[serde(default = "default_probe_url")]
    pub url: String,
    /// Seconds between background probes (default: 30).
    #[serde(default = "default_probe_interval_secs")]
    pub interval_secs: u64,
    /// Seconds before a probe counts as failed (default: 5).
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
}

/// Backoff schedule for retried operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds (default: 1000).
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Upper bound for any single delay in milliseconds (default: 10000).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

/// Sync agent settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Seconds between periodic sync passes (default: 30).
    #[serde(default = "default_sync_interval_secs")]
    pub interval_secs: u64,
    /// Queue file; relative paths resolve against the state directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_file: Option<PathBuf>,
}

/// Remote endpoint that executes queued operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Operations are posted to `{base_url}/{operation_name}`.
    #[serde(default = "default_executor_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 15).
    #[serde(default = "default_executor_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

fn default_probe_url() -> String {
    "https://connectivitycheck.gstatic.com/generate_204".to_string()
}

fn default_probe_interval_secs() -> u64 {
    30
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1_000
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_sync_interval_secs() -> u64 {
    30
}

fn default_executor_base_url() -> String {
    "http://localhost:8080/api/operations".to_string()
}

fn default_executor_timeout_secs() -> u64 {
    15
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            url: default_probe_url(),
            interval_secs: default_probe_interval_secs(),
            timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            interval_secs: default_sync_interval_secs(),
            queue_file: None,
        }
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        ExecutorConfig {
            base_url: default_executor_base_url(),
            timeout_secs: default_executor_timeout_secs(),
            auth_token: None,
        }
    }
}

impl ProbeConfig {
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            interval: Duration::from_secs(self.interval_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

impl SyncConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Config {
    /// Loads configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e.into()),
        };
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Checks URL schemes and that every interval is non-zero.
    pub fn validate(&self) -> Result<()> {
        validate_url("probe.url", &self.probe.url)?;
        validate_url("executor.base_url", &self.executor.base_url)?;

        let non_zero = [
            ("probe.interval_secs", self.probe.interval_secs),
            ("probe.timeout_secs", self.probe.timeout_secs),
            ("sync.interval_secs", self.sync.interval_secs),
            ("executor.timeout_secs", self.executor.timeout_secs),
        ];
        if let Some((field, _)) = non_zero.iter().find(|(_, value)| *value == 0) {
            return Err(Error::Config(format!("{field} must be greater than zero")));
        }

        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(Error::Config(format!(
                "retry.base_delay_ms ({}) exceeds retry.max_delay_ms ({})",
                self.retry.base_delay_ms, self.retry.max_delay_ms
            )));
        }
        Ok(())
    }

    /// Resolves the queue file, honoring `sync.queue_file`.
    pub fn queue_path(&self, state_dir: &Path) -> PathBuf {
        match &self.sync.queue_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => state_dir.join(path),
            None => state_dir.join(QUEUE_FILE_NAME),
        }
    }
}

fn validate_url(field: &str, url: &str) -> Result<()> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(()),
        Some(_) => Err(Error::Config(format!("{field} '{url}' has no host"))),
        None => Err(Error::Config(format!(
            "{field} '{url}' must start with http:// or https://"
        ))),
    }
}

/// Resolves the state directory.
///
/// Order: explicit override, `FIELDSYNC_STATE_DIR`, `$XDG_STATE_HOME/fieldsync`,
/// then `~/.local/state/fieldsync`.
pub fn state_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Some(dir) = env::state_dir() {
        return dir;
    }
    if let Some(dir) = env::xdg_state_home() {
        return dir.join(STATE_DIR_NAME);
    }
    dirs::home_dir()
        .map(|h| h.join(".local/state").join(STATE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".local/state").join(STATE_DIR_NAME))
}

/// Resolves the config file: `FIELDSYNC_CONFIG`, else inside the state directory.
pub fn config_path(state_dir: &Path) -> PathBuf {
    env::config_path().unwrap_or_else(|| state_dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
