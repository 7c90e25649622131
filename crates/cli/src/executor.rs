// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Operation executors.
//!
//! An executor performs one queued operation against the backend. The sync
//! pass may re-send an operation that already reached the server before a
//! failure, so executors must tolerate re-execution.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::ExecutorConfig;
use crate::error::{Error, Result};

/// Future returned by [`OperationExecutor::execute`].
pub type ExecuteFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Performs named operations with a JSON payload.
pub trait OperationExecutor: Send + Sync {
    fn execute<'a>(
        &'a self,
        operation_name: &'a str,
        payload: &'a serde_json::Value,
    ) -> ExecuteFuture<'a>;
}

impl<E: OperationExecutor + ?Sized> OperationExecutor for Arc<E> {
    fn execute<'a>(
        &'a self,
        operation_name: &'a str,
        payload: &'a serde_json::Value,
    ) -> ExecuteFuture<'a> {
        (**self).execute(operation_name, payload)
    }
}

/// Posts each operation's payload to `{base_url}/{operation_name}`.
pub struct HttpExecutor {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpExecutor {
    pub fn new(config: &ExecutorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("cannot build executor client: {e}")))?;
        Ok(HttpExecutor {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// URL an operation is posted to.
    pub fn endpoint(&self, operation_name: &str) -> String {
        format!("{}/{}", self.base_url, operation_name)
    }
}

impl OperationExecutor for HttpExecutor {
    fn execute<'a>(
        &'a self,
        operation_name: &'a str,
        payload: &'a serde_json::Value,
    ) -> ExecuteFuture<'a> {
        Box::pin(async move {
            let url = self.endpoint(operation_name);
            let mut request = self.client.post(&url).json(payload);
            if let Some(token) = &self.auth_token {
                request = request.bearer_auth(token);
            }

            let response = request.send().await?;
            let status = response.status();
            debug!(operation = operation_name, status = status.as_u16(), "operation posted");
            if status.is_success() {
                Ok(())
            } else {
                Err(Error::Status {
                    status: status.as_u16(),
                    url,
                })
            }
        })
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
