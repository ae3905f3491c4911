// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: config assembly, startup, shutdown.

use std::path::PathBuf;

use cdcron_adapters::{
    HealthServer, HealthServerError, HttpCoordinatorClient, ReqwestJobClient,
};
use cdcron_core::{CoordinatorEndpoint, ServiceIdentity, SystemClock};
use cdcron_engine::{load_workload, CronDispatcher, LeadershipError, LeadershipManager, WorkloadError};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

use crate::env;

/// Immutable configuration resolved once at startup from the environment
/// (spec §6). Every field has a documented default, so loading never fails.
#[derive(Debug, Clone)]
pub struct Config {
    pub workload_file: PathBuf,
    pub endpoint: CoordinatorEndpoint,
    pub identity: ServiceIdentity,
}

impl Config {
    pub fn load() -> Self {
        let endpoint = CoordinatorEndpoint::new(
            env::consul_scheme(),
            env::consul_hostname(),
            env::consul_port(),
            env::consul_token(),
        );
        let identity = ServiceIdentity::new(
            env::service_name(),
            env::service_id(),
            env::healthcheck_scheme(),
            env::healthcheck_hostname(),
            env::healthcheck_port(),
        );
        Self {
            workload_file: env::workload_file(),
            endpoint,
            identity,
        }
    }
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("health endpoint failed to start: {0}")]
    Health(#[from] HealthServerError),
    #[error("leadership startup failed: {0}")]
    Leadership(#[from] LeadershipError),
    #[error("failed to load workload file: {0}")]
    Workload(#[from] WorkloadError),
    #[error("leadership manager's fatal channel was already taken")]
    FatalChannelUnavailable,
}

/// The fully started daemon: health endpoint, leadership manager, and cron
/// dispatcher, all wired to the concrete `reqwest`-based adapters.
pub struct Daemon {
    health: HealthServer,
    leadership: LeadershipManager<HttpCoordinatorClient, SystemClock>,
    dispatcher: CronDispatcher<ReqwestJobClient>,
}

/// Result of [`startup`]: the running daemon plus the channel on which any
/// Leadership Manager loop reports a fatal condition (spec §4.2). The
/// caller's main loop selects on this channel to decide when to exit.
pub struct StartupResult {
    pub daemon: Daemon,
    pub fatal_rx: mpsc::Receiver<LeadershipError>,
}

/// Runs the startup sequence: health endpoint first (so the coordinator's
/// probe can succeed), then the workload file, then the Leadership Manager
/// (which itself enforces its own strict sub-sequence per spec §4.3), then
/// the Cron Dispatcher gated on the resulting `is_leader` signal.
pub async fn startup(config: &Config) -> Result<StartupResult, LifecycleError> {
    let health = HealthServer::bind(config.identity.health_port).await?;
    info!(addr = %health.local_addr(), "health endpoint listening");

    let tasks = load_workload(&config.workload_file)?;
    info!(tasks = tasks.len(), path = %config.workload_file.display(), "workload loaded");

    let client = HttpCoordinatorClient::new(config.endpoint.clone());
    let mut leadership = LeadershipManager::new(client, SystemClock, config.identity.clone());
    leadership.start().await?;
    let fatal_rx = leadership
        .take_fatal_rx()
        .ok_or(LifecycleError::FatalChannelUnavailable)?;

    let job_client = ReqwestJobClient::new();
    let mut dispatcher = CronDispatcher::new(tasks, job_client, leadership.is_leader_rx());
    dispatcher.start();

    Ok(StartupResult {
        daemon: Daemon {
            health,
            leadership,
            dispatcher,
        },
        fatal_rx,
    })
}

impl Daemon {
    /// Stops the dispatcher, then releases the lock and deregisters (best
    /// effort — see [`LeadershipManager::shutdown`]), then stops the health
    /// endpoint last so the coordinator's own deregistration probe, if any
    /// is in flight, still gets an answer.
    pub async fn shutdown(mut self) {
        self.dispatcher.shutdown();
        self.leadership.shutdown().await;
        self.health.shutdown();
        info!("daemon shutdown complete");
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
