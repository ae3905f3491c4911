// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate (spec §6).

use cdcron_core::ServiceIdentity;
use std::path::PathBuf;

/// `WORKLOAD_FILE`, falling back to `workload.json` next to the executable.
pub fn workload_file() -> PathBuf {
    if let Ok(path) = std::env::var("WORKLOAD_FILE") {
        return PathBuf::from(path);
    }
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("workload.json")
}

pub fn consul_scheme() -> String {
    std::env::var("CONSUL_SCHEME").unwrap_or_else(|_| "http".to_string())
}

pub fn consul_hostname() -> String {
    std::env::var("CONSUL_HOSTNAME").unwrap_or_else(|_| "localhost".to_string())
}

pub fn consul_port() -> u16 {
    std::env::var("CONSUL_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8500)
}

pub fn consul_token() -> Option<String> {
    std::env::var("CONSUL_TOKEN").ok()
}

pub fn service_name() -> String {
    std::env::var("SERVICE_NAME").unwrap_or_else(|_| "cdcron".to_string())
}

pub fn service_id() -> String {
    std::env::var("SERVICE_ID").unwrap_or_else(|_| ServiceIdentity::random_service_id())
}

pub fn healthcheck_scheme() -> String {
    std::env::var("HEALTHCHECK_SCHEME").unwrap_or_else(|_| "http".to_string())
}

pub fn healthcheck_hostname() -> String {
    std::env::var("HEALTHCHECK_HOSTNAME").unwrap_or_else(|_| "host.docker.internal".to_string())
}

pub fn healthcheck_port() -> u16 {
    std::env::var("HEALTHCHECK_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
