// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake coordinator client for testing.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CoordinatorClient, CoordinatorError};
use async_trait::async_trait;
use cdcron_core::{ElectionKey, LockObservation, ServiceIdentity, SessionId};
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded coordinator call.
#[derive(Debug, Clone)]
pub enum CoordinatorCall {
    Register,
    Deregister,
    CatalogLookup,
    SessionCreate,
    SessionRenew { session: SessionId },
    LockAcquire { session: SessionId },
    LockRead,
    LockRelease { session: SessionId },
}

struct FakeState {
    calls: Vec<CoordinatorCall>,
    registered: bool,
    catalog_present: bool,
    next_session_id: u64,
    renew_should_fail: bool,
    lock: Option<LockObservation>,
    next_modify_index: u64,
    acquire_should_fail: bool,
}

/// Fake [`CoordinatorClient`] backed by in-memory state, in the shape of the
/// teacher's `FakeSessionAdapter`.
#[derive(Clone)]
pub struct FakeCoordinatorClient {
    inner: Arc<Mutex<FakeState>>,
}

impl Default for FakeCoordinatorClient {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeState {
                calls: Vec::new(),
                registered: false,
                catalog_present: true,
                next_session_id: 0,
                renew_should_fail: false,
                lock: None,
                next_modify_index: 1,
                acquire_should_fail: false,
            })),
        }
    }
}

impl FakeCoordinatorClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<CoordinatorCall> {
        self.inner.lock().calls.clone()
    }

    pub fn is_registered(&self) -> bool {
        self.inner.lock().registered
    }

    pub fn set_catalog_present(&self, present: bool) {
        self.inner.lock().catalog_present = present;
    }

    pub fn fail_next_renew(&self) {
        self.inner.lock().renew_should_fail = true;
    }

    pub fn fail_next_acquire(&self) {
        self.inner.lock().acquire_should_fail = true;
    }

    /// Simulate another replica holding the lock.
    pub fn set_held_by(&self, session: &SessionId, modify_index: u64) {
        let mut inner = self.inner.lock();
        inner.lock = Some(LockObservation {
            held_by: Some(session.clone()),
            modify_index,
        });
    }

    pub fn current_lock(&self) -> Option<LockObservation> {
        self.inner.lock().lock.clone()
    }
}

#[async_trait]
impl CoordinatorClient for FakeCoordinatorClient {
    async fn register(&self, _identity: &ServiceIdentity) -> Result<(), CoordinatorError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CoordinatorCall::Register);
        inner.registered = true;
        Ok(())
    }

    async fn deregister(&self, _identity: &ServiceIdentity) -> Result<(), CoordinatorError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CoordinatorCall::Deregister);
        inner.registered = false;
        Ok(())
    }

    async fn catalog_lookup(&self, _service_name: &str) -> Result<bool, CoordinatorError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CoordinatorCall::CatalogLookup);
        Ok(inner.catalog_present)
    }

    async fn session_create(&self, _service_name: &str) -> Result<SessionId, CoordinatorError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CoordinatorCall::SessionCreate);
        inner.next_session_id += 1;
        Ok(SessionId::from(format!("fake-session-{}", inner.next_session_id)))
    }

    async fn session_renew(&self, session: &SessionId) -> Result<(), CoordinatorError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CoordinatorCall::SessionRenew {
            session: session.clone(),
        });
        if inner.renew_should_fail {
            inner.renew_should_fail = false;
            return Err(CoordinatorError::UnexpectedStatus {
                operation: "session_renew",
                status: 500,
            });
        }
        Ok(())
    }

    async fn lock_acquire(
        &self,
        _key: &ElectionKey,
        session: &SessionId,
    ) -> Result<bool, CoordinatorError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CoordinatorCall::LockAcquire {
            session: session.clone(),
        });
        if inner.acquire_should_fail {
            inner.acquire_should_fail = false;
            return Ok(false);
        }
        let modify_index = inner.next_modify_index;
        inner.next_modify_index += 1;
        inner.lock = Some(LockObservation {
            held_by: Some(session.clone()),
            modify_index,
        });
        Ok(true)
    }

    async fn lock_read(&self, _key: &ElectionKey) -> Result<Option<LockObservation>, CoordinatorError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CoordinatorCall::LockRead);
        Ok(inner.lock.clone())
    }

    async fn lock_release(
        &self,
        _key: &ElectionKey,
        session: &SessionId,
    ) -> Result<bool, CoordinatorError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CoordinatorCall::LockRelease {
            session: session.clone(),
        });
        match &inner.lock {
            Some(observation) if observation.held_by.as_ref() == Some(session) => {
                inner.lock = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
