// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Real job HTTP client, over `reqwest`.

use super::{JobHttpClient, JobHttpError, JobResponse};
use async_trait::async_trait;
use cdcron_core::{HttpMethodKind, Task};
use std::str::FromStr;

/// Real [`JobHttpClient`], one `reqwest::Client` shared across every task's
/// firing loop.
#[derive(Clone, Default)]
pub struct ReqwestJobClient {
    http: reqwest::Client,
}

impl ReqwestJobClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl JobHttpClient for ReqwestJobClient {
    async fn fire(&self, task: &Task) -> Result<JobResponse, JobHttpError> {
        let method_kind = HttpMethodKind::from_str(&task.method).map_err(|e| JobHttpError::Transport {
            method: task.method.clone(),
            url: task.url.clone(),
            source: e.to_string(),
        })?;
        let method = to_reqwest_method(method_kind);

        let mut builder = self.http.request(method, &task.url);
        for (key, value) in &task.headers {
            builder = builder.header(key, value);
        }
        if method_kind.has_body() {
            if let Some(data) = &task.data {
                builder = builder.json(data);
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|e| JobHttpError::Transport {
                method: task.method.clone(),
                url: task.url.clone(),
                source: e.to_string(),
            })?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(JobResponse { status, body })
    }
}

fn to_reqwest_method(kind: HttpMethodKind) -> reqwest::Method {
    match kind {
        HttpMethodKind::Get => reqwest::Method::GET,
        HttpMethodKind::Head => reqwest::Method::HEAD,
        HttpMethodKind::Options => reqwest::Method::OPTIONS,
        HttpMethodKind::Trace => reqwest::Method::TRACE,
        HttpMethodKind::Put => reqwest::Method::PUT,
        HttpMethodKind::Delete => reqwest::Method::DELETE,
        HttpMethodKind::Post => reqwest::Method::POST,
        HttpMethodKind::Patch => reqwest::Method::PATCH,
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
