// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod config;
pub mod enqueue;
pub mod list;
pub mod remove;
pub mod run;
pub mod send;
pub mod status;
pub mod sync;

use std::path::{Path, PathBuf};

use fieldsync_core::{OfflineQueue, OpId, QueueLock, QueuedOperation};

use crate::config::{self as cfg, Config};
use crate::error::{Error, Result};
use crate::executor::HttpExecutor;
use crate::monitor::ConnectivityMonitor;
use crate::probe::HttpProbe;

/// Resolved state directory, config and derived paths for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub state_dir: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
}

impl Context {
    /// Resolves the state directory and loads the config found there.
    pub fn load(state_dir: Option<&Path>) -> Result<Self> {
        let state_dir = cfg::state_dir(state_dir);
        let config_path = cfg::config_path(&state_dir);
        let config = Config::load(&config_path)?;
        Ok(Context {
            state_dir,
            config_path,
            config,
        })
    }

    pub fn queue_path(&self) -> PathBuf {
        self.config.queue_path(&self.state_dir)
    }

    /// Takes the cross-process queue lock, waiting for other invocations.
    pub fn lock_queue(&self) -> Result<QueueLock> {
        Ok(QueueLock::acquire(&self.queue_path())?)
    }

    /// Reads a consistent copy of the queue file.
    pub fn open_queue(&self) -> Result<OfflineQueue> {
        let _lock = self.lock_queue()?;
        Ok(OfflineQueue::load_jsonl(&self.queue_path())?)
    }

    /// Applies `change` to the queue file under the queue lock.
    pub fn update_queue<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut OfflineQueue) -> Result<T>,
    {
        let path = self.queue_path();
        let _lock = self.lock_queue()?;
        let mut queue = OfflineQueue::load_jsonl(&path)?;
        let out = change(&mut queue)?;
        queue.save_jsonl(&path)?;
        Ok(out)
    }

    /// Adds one operation under the queue lock by appending it to the file.
    ///
    /// The queue is loaded first so the new id continues the file's sequence.
    pub fn append_to_queue<F>(&self, add: F) -> Result<QueuedOperation>
    where
        F: FnOnce(&mut OfflineQueue) -> Result<OpId>,
    {
        let path = self.queue_path();
        let _lock = self.lock_queue()?;
        let mut queue = OfflineQueue::load_jsonl(&path)?;
        let id = add(&mut queue)?;
        queue
            .append_jsonl(&id, &path)?
            .cloned()
            .ok_or_else(|| Error::Core(fieldsync_core::Error::InvalidOpId(id.to_string())))
    }

    pub fn monitor(&self) -> Result<ConnectivityMonitor> {
        let probe = HttpProbe::from_config(&self.config.probe)?;
        Ok(ConnectivityMonitor::new(
            probe,
            self.config.probe.monitor_config(),
        ))
    }

    pub fn executor(&self) -> Result<HttpExecutor> {
        HttpExecutor::new(&self.config.executor)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
