// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session Loop: creates the coordinator session once, then renews it at
//! one-third of its TTL.

use super::{LeadershipError, SessionStore};
use cdcron_adapters::CoordinatorClient;
use cdcron_core::SessionId;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::error;

/// TTL is 15s; renewing at one-third tolerates one missed renewal.
const RENEW_INTERVAL: Duration = Duration::from_secs(5);

pub(super) fn spawn<C: CoordinatorClient>(
    client: C,
    service_name: String,
    session_tx: oneshot::Sender<SessionId>,
    store: SessionStore,
    fatal_tx: mpsc::Sender<LeadershipError>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let session_id = match client.session_create(&service_name).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "session creation failed, fatal");
                let _ = fatal_tx.send(LeadershipError::Registration(e)).await;
                return;
            }
        };
        store.set(session_id.clone());
        let _ = session_tx.send(session_id.clone());

        loop {
            tokio::time::sleep(RENEW_INTERVAL).await;
            if let Err(e) = client.session_renew(&session_id).await {
                error!(error = %e, "session renewal failed, fatal");
                let _ = fatal_tx.send(LeadershipError::Registration(e)).await;
                return;
            }
        }
    })
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
