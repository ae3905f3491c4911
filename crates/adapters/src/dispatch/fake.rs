// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake job HTTP client for testing.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{JobHttpClient, JobHttpError, JobResponse};
use async_trait::async_trait;
use cdcron_core::Task;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct JobCall {
    pub method: String,
    pub url: String,
}

struct FakeState {
    calls: Vec<JobCall>,
    default_response: JobResponse,
    next_should_fail: bool,
}

/// Fake [`JobHttpClient`] recording every fired task.
#[derive(Clone)]
pub struct FakeJobClient {
    inner: Arc<Mutex<FakeState>>,
}

impl Default for FakeJobClient {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeState {
                calls: Vec::new(),
                default_response: JobResponse {
                    status: 200,
                    body: String::new(),
                },
                next_should_fail: false,
            })),
        }
    }
}

impl FakeJobClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<JobCall> {
        self.inner.lock().calls.clone()
    }

    pub fn set_default_response(&self, status: u16, body: impl Into<String>) {
        self.inner.lock().default_response = JobResponse {
            status,
            body: body.into(),
        };
    }

    pub fn fail_next(&self) {
        self.inner.lock().next_should_fail = true;
    }
}

#[async_trait]
impl JobHttpClient for FakeJobClient {
    async fn fire(&self, task: &Task) -> Result<JobResponse, JobHttpError> {
        let mut inner = self.inner.lock();
        inner.calls.push(JobCall {
            method: task.method.clone(),
            url: task.url.clone(),
        });
        if inner.next_should_fail {
            inner.next_should_fail = false;
            return Err(JobHttpError::Transport {
                method: task.method.clone(),
                url: task.url.clone(),
                source: "fake transport failure".to_string(),
            });
        }
        Ok(inner.default_response.clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
