// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! cdcron: distributed cron runner for HTTP workloads.
//!
//! Starts the health endpoint, registers with the coordinator, contends for
//! leadership, and dispatches the workload's scheduled requests for as long
//! as this replica holds the election key.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use cdcron_daemon::{lifecycle, Config, LifecycleError};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before any config loading or coordinator I/O.
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("cdcron {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: cdcron [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    setup_logging();
    info!("app started");

    let config = Config::load();
    let lifecycle::StartupResult {
        daemon,
        mut fatal_rx,
    } = match lifecycle::startup(&config).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "failed to start daemon");
            match e {
                LifecycleError::Workload(_) => eprintln!("{e}"),
                other => eprintln!("error: {other}"),
            }
            std::process::exit(1);
        }
    };

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!(
        service = %config.identity.service_name,
        service_id = %config.identity.service_id,
        "daemon ready"
    );

    let exit_code = tokio::select! {
        _ = sigterm.recv() => {
            info!("received SIGTERM, shutting down");
            0
        }
        _ = sigint.recv() => {
            info!("received SIGINT, shutting down");
            0
        }
        fatal = fatal_rx.recv() => {
            if let Some(e) = fatal {
                error!(error = %e, "fatal leadership error, shutting down");
            }
            1
        }
    };

    daemon.shutdown().await;
    std::process::exit(exit_code);
}

fn print_help() {
    println!("cdcron {}", env!("CARGO_PKG_VERSION"));
    println!("Distributed cron runner for HTTP workloads");
    println!();
    println!("USAGE:");
    println!("    cdcron");
    println!();
    println!("Configuration is read entirely from the environment; see the");
    println!("CONSUL_*, SERVICE_*, HEALTHCHECK_*, and WORKLOAD_FILE variables.");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -V, --version    Print version information");
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}
