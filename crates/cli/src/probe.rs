// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reachability probes.
//!
//! A probe answers one question: can we reach the backend right now?
//! The monitor bounds every check with its own timeout, so probes do not
//! need to enforce one.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ProbeConfig;
use crate::error::{Error, Result};

/// Future returned by [`Probe::check`].
pub type ProbeFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// A single reachability check.
pub trait Probe: Send + Sync {
    /// Resolves to `Ok(())` when the endpoint is reachable.
    fn check(&self) -> ProbeFuture<'_>;
}

impl<P: Probe + ?Sized> Probe for Arc<P> {
    fn check(&self) -> ProbeFuture<'_> {
        (**self).check()
    }
}

impl<P: Probe + ?Sized> Probe for Box<P> {
    fn check(&self) -> ProbeFuture<'_> {
        (**self).check()
    }
}

/// Sends `HEAD {url}` and treats any 2xx answer as reachable.
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("cannot build probe client: {e}")))?;
        Ok(HttpProbe {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        Self::new(&config.url, Duration::from_secs(config.timeout_secs))
    }
}

impl Probe for HttpProbe {
    fn check(&self) -> ProbeFuture<'_> {
        Box::pin(async move {
            let response = self.client.head(&self.url).send().await?;
            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(Error::Status {
                    status: status.as_u16(),
                    url: self.url.clone(),
                })
            }
        })
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
