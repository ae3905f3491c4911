// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator client: the HTTP operations the Leadership Manager needs
//! against the external coordinator (Consul-compatible) API.

mod http;

pub use http::HttpCoordinatorClient;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{CoordinatorCall, FakeCoordinatorClient};

use async_trait::async_trait;
use cdcron_core::{ElectionKey, LockObservation, ServiceIdentity, SessionId};
use thiserror::Error;

/// Errors from coordinator operations.
///
/// Most coordinator failures are fatal by contract (spec §4.2): the caller
/// is expected to log and exit the process rather than retry, except where
/// noted on individual trait methods.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("coordinator transport error: {0}")]
    Transport(String),
    #[error("coordinator returned unexpected status {status} for {operation}")]
    UnexpectedStatus { operation: &'static str, status: u16 },
    #[error("coordinator returned a malformed response for {operation}: {detail}")]
    Malformed {
        operation: &'static str,
        detail: String,
    },
}

/// Thin operations over the coordinator's HTTP API (spec §4.2).
#[async_trait]
pub trait CoordinatorClient: Clone + Send + Sync + 'static {
    /// `PUT /v1/agent/service/register`. Fatal on any non-200 or transport error.
    async fn register(&self, identity: &ServiceIdentity) -> Result<(), CoordinatorError>;

    /// `PUT /v1/agent/service/deregister/{service_id}`. 404 is treated as
    /// already-absent, not an error.
    async fn deregister(&self, identity: &ServiceIdentity) -> Result<(), CoordinatorError>;

    /// `GET /v1/catalog/service/{service_name}`. Returns whether the service
    /// is present in the catalog.
    async fn catalog_lookup(&self, service_name: &str) -> Result<bool, CoordinatorError>;

    /// `PUT /v1/session/create`. Returns the new session id.
    async fn session_create(&self, service_name: &str) -> Result<SessionId, CoordinatorError>;

    /// `PUT /v1/session/renew/{session_id}`.
    async fn session_renew(&self, session: &SessionId) -> Result<(), CoordinatorError>;

    /// `PUT /v1/kv/{key}?acquire={session_id}`. Returns whether the lock was
    /// acquired; `Ok(false)` is a normal not-acquired outcome, not an error.
    async fn lock_acquire(
        &self,
        key: &ElectionKey,
        session: &SessionId,
    ) -> Result<bool, CoordinatorError>;

    /// `GET /v1/kv/{key}`. A transport/status error here is non-fatal by
    /// contract (spec §4.2): callers log and retry on the next election tick.
    async fn lock_read(&self, key: &ElectionKey) -> Result<Option<LockObservation>, CoordinatorError>;

    /// `PUT /v1/kv/{key}?release={session_id}`. Returns whether anything was
    /// released; `Ok(false)` is a normal nothing-to-release outcome.
    async fn lock_release(
        &self,
        key: &ElectionKey,
        session: &SessionId,
    ) -> Result<bool, CoordinatorError>;
}
