// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-process lock for a queue file.
//!
//! Every process that reads, changes and writes a queue file holds a
//! [`QueueLock`] for the whole cycle. The lock lives on a sidecar file next
//! to the queue (`queue.jsonl` is guarded by `queue.jsonl.lock`) so the queue
//! itself can be replaced freely while locked.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::Result;

/// Exclusive lock on a queue file, released on drop.
#[derive(Debug)]
pub struct QueueLock {
    file: File,
}

impl QueueLock {
    /// Blocks until the lock for `queue_path` is free, then takes it.
    pub fn acquire(queue_path: &Path) -> Result<Self> {
        let path = lock_path(queue_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        file.lock_exclusive()?;
        Ok(QueueLock { file })
    }
}

impl Drop for QueueLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Sidecar lock file guarding `queue_path`.
pub fn lock_path(queue_path: &Path) -> PathBuf {
    let mut name = queue_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    queue_path.with_file_name(name)
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
