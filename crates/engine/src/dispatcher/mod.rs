// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron Dispatcher: fires each workload task on its own schedule, but only
//! while this replica holds leadership.

mod workload;

pub use workload::{load_workload, ValidatedTask, WorkloadError};

use cdcron_adapters::JobHttpClient;
use cdcron_core::Task;
use chrono::Local;
use cron::Schedule;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{info, warn};

/// Runs the per-task cron loops while `is_leader` is `true`, aborting all of
/// them as a group the moment it flips to `false`. A later `true` edge starts
/// a fresh set, so triggers from one leadership epoch never fire in another.
pub struct CronDispatcher<J: JobHttpClient> {
    tasks: Arc<Vec<ValidatedTask>>,
    job_client: J,
    is_leader_rx: watch::Receiver<bool>,
    supervisor: Option<JoinHandle<()>>,
}

impl<J: JobHttpClient> CronDispatcher<J> {
    pub fn new(tasks: Vec<ValidatedTask>, job_client: J, is_leader_rx: watch::Receiver<bool>) -> Self {
        Self {
            tasks: Arc::new(tasks),
            job_client,
            is_leader_rx,
            supervisor: None,
        }
    }

    /// Starts the supervisor task that watches `is_leader` and starts/stops
    /// the scheduled loops on its edges. Idempotent: calling it again while
    /// already running replaces the previous supervisor.
    pub fn start(&mut self) {
        let tasks = Arc::clone(&self.tasks);
        let job_client = self.job_client.clone();
        let mut is_leader_rx = self.is_leader_rx.clone();

        self.supervisor = Some(tokio::spawn(async move {
            let mut active: Option<JoinSet<()>> = None;
            loop {
                if is_leader_rx.changed().await.is_err() {
                    break;
                }
                let leading = *is_leader_rx.borrow();
                if leading {
                    if active.is_none() {
                        info!(tasks = tasks.len(), "leadership acquired, starting cron dispatcher");
                        let mut set = JoinSet::new();
                        for validated in tasks.iter() {
                            set.spawn(run_task_loop(
                                validated.task.clone(),
                                validated.schedule.clone(),
                                job_client.clone(),
                            ));
                        }
                        active = Some(set);
                    }
                } else if let Some(mut set) = active.take() {
                    info!("leadership lost, stopping cron dispatcher");
                    set.abort_all();
                    while set.join_next().await.is_some() {}
                }
            }
        }));
    }

    /// Stops the supervisor (and with it, any currently-scheduled loops).
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.supervisor.take() {
            handle.abort();
        }
    }
}

/// One task's cron loop: sleep until the next scheduled tick, fire, repeat.
/// No retry — each tick is independent, matching the source behaviour.
async fn run_task_loop(task: Task, schedule: Schedule, job_client: impl JobHttpClient) {
    loop {
        let Some(next) = schedule.upcoming(Local).next() else {
            warn!(url = %task.url, "cron schedule has no further occurrences");
            return;
        };
        let now = Local::now();
        let wait = (next - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        match job_client.fire(&task).await {
            Ok(response) if response.status < 400 => {
                info!(
                    method = %task.method,
                    url = %task.url,
                    status = response.status,
                    "request fired"
                );
            }
            Ok(response) => {
                warn!(
                    method = %task.method,
                    url = %task.url,
                    status = response.status,
                    "request fired"
                );
            }
            Err(e) => {
                warn!(method = %task.method, url = %task.url, error = %e, "request failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
