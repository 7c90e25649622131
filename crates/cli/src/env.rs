// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables read by fieldsync are named in
//! [`vars`] and read through the typed accessors below.

use std::path::PathBuf;

/// Environment variable names.
pub mod vars {
    /// Overrides the state directory (queue file and config).
    pub const FIELDSYNC_STATE_DIR: &str = "FIELDSYNC_STATE_DIR";
    /// Overrides the config file path.
    pub const FIELDSYNC_CONFIG: &str = "FIELDSYNC_CONFIG";
    /// XDG base directory for state files.
    pub const XDG_STATE_HOME: &str = "XDG_STATE_HOME";
}

/// Returns the value of `FIELDSYNC_STATE_DIR` if set and non-empty.
pub fn state_dir() -> Option<PathBuf> {
    non_empty(vars::FIELDSYNC_STATE_DIR)
}

/// Returns the value of `FIELDSYNC_CONFIG` if set and non-empty.
pub fn config_path() -> Option<PathBuf> {
    non_empty(vars::FIELDSYNC_CONFIG)
}

/// Returns the value of `XDG_STATE_HOME` if set and non-empty.
pub fn xdg_state_home() -> Option<PathBuf> {
    non_empty(vars::XDG_STATE_HOME)
}

fn non_empty(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
