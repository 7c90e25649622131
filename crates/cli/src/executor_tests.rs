// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::test_helpers::MockExecutor;
use fieldsync_core::{Classify, FailureKind};
use serde_json::json;
use yare::parameterized;

fn executor(base_url: &str) -> HttpExecutor {
    HttpExecutor::new(&ExecutorConfig {
        base_url: base_url.into(),
        timeout_secs: 2,
        auth_token: None,
    })
    .unwrap()
}

#[parameterized(
    plain = { "https://site.example/api", "https://site.example/api/assign_task" },
    trailing_slash = { "https://site.example/api/", "https://site.example/api/assign_task" },
    many_slashes = { "http://10.0.0.2:8080//", "http://10.0.0.2:8080/assign_task" },
)]
fn endpoint_joins_base_url(base_url: &str, expected: &str) {
    assert_eq!(executor(base_url).endpoint("assign_task"), expected);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_failure() {
    let executor = executor("http://127.0.0.1:9/api");
    let err = executor
        .execute("update_status", &json!({"task": "t-1"}))
        .await
        .unwrap_err();
    assert_eq!(err.failure_kind(), FailureKind::Network);
}

#[tokio::test]
async fn test_shared_executor_forwards() {
    let mock = Arc::new(MockExecutor::new());
    let shared: Arc<dyn OperationExecutor> = mock.clone();
    shared.execute("a", &json!(1)).await.unwrap();
    assert_eq!(mock.calls(), vec!["a"]);
    assert_eq!(mock.payloads(), vec![json!(1)]);
}
