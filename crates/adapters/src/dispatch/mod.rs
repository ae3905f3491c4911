// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job HTTP client: fires a scheduled [`Task`](cdcron_core::Task)'s request.

mod http;

pub use http::ReqwestJobClient;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeJobClient, JobCall};

use async_trait::async_trait;
use cdcron_core::Task;
use thiserror::Error;

/// Outcome of firing a task's HTTP request: always carries a status and body
/// if the request made it to the server, even for 4xx/5xx (those are logged,
/// not treated as errors — only transport failures are).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum JobHttpError {
    #[error("transport error firing {method} {url}: {source}")]
    Transport {
        method: String,
        url: String,
        source: String,
    },
}

/// Fires a single task's HTTP request. The real implementation is a thin
/// `reqwest` wrapper; transport errors are the only `Err` case, matching
/// spec's "transport errors propagate" rule — 4xx/5xx come back as an `Ok`
/// [`JobResponse`] for the caller to log at the appropriate level.
#[async_trait]
pub trait JobHttpClient: Clone + Send + Sync + 'static {
    async fn fire(&self, task: &Task) -> Result<JobResponse, JobHttpError>;
}
