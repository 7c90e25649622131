// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::path::PathBuf;

#[test]
fn test_vars_constants() {
    assert_eq!(vars::FIELDSYNC_STATE_DIR, "FIELDSYNC_STATE_DIR");
    assert_eq!(vars::FIELDSYNC_CONFIG, "FIELDSYNC_CONFIG");
    assert_eq!(vars::XDG_STATE_HOME, "XDG_STATE_HOME");
}

#[test]
fn test_state_dir_set_and_unset() {
    std::env::set_var("FIELDSYNC_STATE_DIR", "/tmp/fieldsync-env-test");
    assert_eq!(
        state_dir(),
        Some(PathBuf::from("/tmp/fieldsync-env-test"))
    );
    std::env::set_var("FIELDSYNC_STATE_DIR", "");
    assert_eq!(state_dir(), None);
    std::env::remove_var("FIELDSYNC_STATE_DIR");
    assert_eq!(state_dir(), None);
}
