// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registration Loop: registers the service once, then periodically
//! verifies the catalog still carries it.

use super::LeadershipError;
use cdcron_adapters::CoordinatorClient;
use cdcron_core::ServiceIdentity;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{error, warn};

const CATALOG_CHECK_INTERVAL: Duration = Duration::from_secs(10);

pub(super) fn spawn<C: CoordinatorClient>(
    client: C,
    identity: ServiceIdentity,
    registered_tx: oneshot::Sender<()>,
    fatal_tx: mpsc::Sender<LeadershipError>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = client.register(&identity).await {
            error!(error = %e, "service registration failed, fatal");
            let _ = fatal_tx.send(LeadershipError::Registration(e)).await;
            return;
        }
        // Ignore send errors: the receiver (start()) may already have
        // moved on if the manager is being torn down concurrently.
        let _ = registered_tx.send(());

        loop {
            tokio::time::sleep(CATALOG_CHECK_INTERVAL).await;
            match client.catalog_lookup(&identity.service_name).await {
                Ok(true) => {}
                Ok(false) => {
                    warn!(service = %identity.service_name, "absent from catalog, re-registering");
                    if let Err(e) = client.register(&identity).await {
                        error!(error = %e, "re-registration failed, fatal");
                        let _ = fatal_tx.send(LeadershipError::Registration(e)).await;
                        return;
                    }
                }
                Err(e) => {
                    error!(error = %e, "catalog lookup failed, fatal");
                    let _ = fatal_tx.send(LeadershipError::Registration(e)).await;
                    return;
                }
            }
        }
    })
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
