// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loading and validating the workload file.

use cdcron_core::{HttpMethodKind, Task, Workload};
use cron::Schedule;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("workload file {path} doesn't exist")]
    NotFound { path: String },
    #[error("failed to read workload file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("workload file {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The `cron` crate expects a leading seconds field; workload files may use
/// either the 5-field unix form or the 6-field form that already has one.
fn parse_cron_expression(expr: &str) -> Result<Schedule, cron::error::Error> {
    let with_seconds = match expr.split_whitespace().count() {
        5 => format!("0 {expr}"),
        _ => expr.to_string(),
    };
    Schedule::from_str(&with_seconds)
}

/// A task alongside its validated method and parsed cron schedule. Tasks
/// whose method or cron expression doesn't validate never make it here —
/// they're logged and skipped at load time instead.
pub struct ValidatedTask {
    pub task: Task,
    pub method: HttpMethodKind,
    pub schedule: Schedule,
}

/// Reads and parses the workload file, logging (and skipping, not failing)
/// any task with an unsupported method or malformed cron expression.
pub fn load_workload(path: &Path) -> Result<Vec<ValidatedTask>, WorkloadError> {
    if !path.exists() {
        return Err(WorkloadError::NotFound {
            path: path.display().to_string(),
        });
    }
    let bytes = std::fs::read(path).map_err(|source| WorkloadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let workload = Workload::from_json(&bytes).map_err(|source| WorkloadError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    let mut validated = Vec::with_capacity(workload.tasks.len());
    for task in workload.tasks {
        let method = match HttpMethodKind::from_str(&task.method) {
            Ok(method) => method,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };
        let schedule = match parse_cron_expression(&task.cron) {
            Ok(schedule) => schedule,
            Err(e) => {
                warn!(cron = %task.cron, url = %task.url, "invalid cron expression: {e}");
                continue;
            }
        };
        validated.push(ValidatedTask {
            task,
            method,
            schedule,
        });
    }
    Ok(validated)
}

#[cfg(test)]
#[path = "workload_tests.rs"]
mod tests;
