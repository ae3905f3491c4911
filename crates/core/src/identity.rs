// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service identity: immutable for the process lifetime.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Identity this replica registers under with the coordinator.
///
/// `service_name` is shared across replicas (it names the election key and
/// the service catalog entry); `service_id` is per-replica.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub service_name: String,
    pub service_id: String,
    pub health_scheme: String,
    pub health_address: String,
    pub health_port: u16,
}

impl ServiceIdentity {
    pub fn new(
        service_name: impl Into<String>,
        service_id: impl Into<String>,
        health_scheme: impl Into<String>,
        health_address: impl Into<String>,
        health_port: u16,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            service_id: service_id.into(),
            health_scheme: health_scheme.into(),
            health_address: health_address.into(),
            health_port,
        }
    }

    /// Random 5-character alphanumeric token, used when `SERVICE_ID` is unset.
    pub fn random_service_id() -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(5)
            .map(char::from)
            .collect()
    }

    /// The URL the coordinator's health check probes.
    pub fn probe_url(&self) -> String {
        format!(
            "{}://{}:{}/",
            self.health_scheme, self.health_address, self.health_port
        )
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
