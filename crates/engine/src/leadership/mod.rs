// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Leadership Manager: orchestrates registration, session, and election,
//! exposing a single `is_leader` signal the cron dispatcher gates on.

mod election;
mod registration;
mod session;

use cdcron_adapters::CoordinatorClient;
use cdcron_core::{Clock, ElectionKey, ServiceIdentity, SessionId};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LeadershipError {
    #[error("registration failed: {0}")]
    Registration(#[from] cdcron_adapters::CoordinatorError),
    #[error("startup aborted before {0} completed")]
    StartupAborted(&'static str),
}

/// Shared store for the session id, set once by the Session Loop and read
/// by the Election Loop. Not a `watch` channel: the value is set exactly
/// once per process lifetime and subsequent loops only ever read it.
#[derive(Clone, Default)]
struct SessionStore(Arc<Mutex<Option<SessionId>>>);

impl SessionStore {
    fn set(&self, id: SessionId) {
        *self.0.lock() = Some(id);
    }

    fn get(&self) -> Option<SessionId> {
        self.0.lock().clone()
    }
}

/// Owns the three concurrent loops described in the leadership protocol and
/// the `is_leader` signal they jointly drive.
pub struct LeadershipManager<C: CoordinatorClient, K: Clock> {
    client: C,
    clock: K,
    identity: ServiceIdentity,
    election_key: ElectionKey,
    is_leader_tx: watch::Sender<bool>,
    is_leader_rx: watch::Receiver<bool>,
    session: SessionStore,
    tasks: Vec<JoinHandle<()>>,
    fatal_tx: mpsc::Sender<LeadershipError>,
    fatal_rx: Option<mpsc::Receiver<LeadershipError>>,
}

impl<C: CoordinatorClient, K: Clock + 'static> LeadershipManager<C, K> {
    pub fn new(client: C, clock: K, identity: ServiceIdentity) -> Self {
        let (is_leader_tx, is_leader_rx) = watch::channel(false);
        let (fatal_tx, fatal_rx) = mpsc::channel(4);
        let election_key = ElectionKey::new(identity.service_name.clone());
        Self {
            client,
            clock,
            identity,
            election_key,
            is_leader_tx,
            is_leader_rx,
            session: SessionStore::default(),
            tasks: Vec::new(),
            fatal_tx,
            fatal_rx: Some(fatal_rx),
        }
    }

    /// A receiver tracking the current leadership state, to hand to the
    /// Cron Dispatcher.
    pub fn is_leader_rx(&self) -> watch::Receiver<bool> {
        self.is_leader_rx.clone()
    }

    /// The channel on which any loop reports a fatal condition. Consumed
    /// once by the daemon's main loop, which exits the process on receipt
    /// (spec: "fatal" means the process terminates with a non-zero status).
    /// Returns `None` if already taken.
    pub fn take_fatal_rx(&mut self) -> Option<mpsc::Receiver<LeadershipError>> {
        self.fatal_rx.take()
    }

    /// Runs the strict startup sequence (spec §4.3): eager deregister, then
    /// block on Registration and Session loops signaling readiness, then
    /// start the Election Loop. Returns once the Election Loop is running.
    pub async fn start(&mut self) -> Result<(), LeadershipError> {
        self.client.deregister(&self.identity).await?;

        let (registered_tx, registered_rx) = oneshot::channel();
        let registration_handle = registration::spawn(
            self.client.clone(),
            self.identity.clone(),
            registered_tx,
            self.fatal_tx.clone(),
        );
        self.tasks.push(registration_handle);
        registered_rx
            .await
            .map_err(|_| LeadershipError::StartupAborted("registration"))?;
        info!(service = %self.identity.service_name, "registration loop ready");

        let (session_tx, session_rx) = oneshot::channel();
        let session_handle = session::spawn(
            self.client.clone(),
            self.identity.service_name.clone(),
            session_tx,
            self.session.clone(),
            self.fatal_tx.clone(),
        );
        self.tasks.push(session_handle);
        let session_id = session_rx
            .await
            .map_err(|_| LeadershipError::StartupAborted("session"))?;
        info!(session = %session_id, "session loop ready");

        let election_handle = election::spawn(
            self.client.clone(),
            self.clock.clone(),
            self.election_key.clone(),
            self.session.clone(),
            self.is_leader_tx.clone(),
            self.fatal_tx.clone(),
        );
        self.tasks.push(election_handle);

        Ok(())
    }

    /// Aborts all loops, then releases the lock and deregisters (best
    /// effort, idempotent — logged, never panics on failure).
    pub async fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }

        if let Some(session_id) = self.session.get() {
            if let Err(e) = self
                .client
                .lock_release(&self.election_key, &session_id)
                .await
            {
                warn!(error = %e, "lock release failed during shutdown");
            }
        }
        if let Err(e) = self.client.deregister(&self.identity).await {
            warn!(error = %e, "deregister failed during shutdown");
        }
        let _ = self.is_leader_tx.send(false);
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
