//! Test helpers for behavioral specifications.
//!
//! Provides a thin black-box wrapper around the compiled `cdcron` binary.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

const CONTROLLED_VARS: &[&str] = &[
    "WORKLOAD_FILE",
    "CONSUL_SCHEME",
    "CONSUL_HOSTNAME",
    "CONSUL_PORT",
    "CONSUL_TOKEN",
    "SERVICE_NAME",
    "SERVICE_ID",
    "HEALTHCHECK_SCHEME",
    "HEALTHCHECK_HOSTNAME",
    "HEALTHCHECK_PORT",
];

/// Returns the path to the `cdcron` binary, resolving relative to the test
/// binary itself since `cdcron` lives in a different workspace member than
/// this one (so `CARGO_BIN_EXE_cdcron` isn't set for us).
fn binary_path() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let standard = manifest_dir.join("target/debug/cdcron");
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join("cdcron");
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Builder for a `cdcron` invocation with the environment cleared of any
/// leaking `CONSUL_*`/`SERVICE_*`/`HEALTHCHECK_*`/`WORKLOAD_FILE` overrides
/// from the parent process, so each spec starts from documented defaults.
pub struct DaemonCmd {
    cmd: Command,
}

pub fn daemon() -> DaemonCmd {
    let mut cmd = Command::new(binary_path());
    for var in CONTROLLED_VARS {
        cmd.env_remove(var);
    }
    // Ephemeral health port by default so parallel specs never collide.
    cmd.env("HEALTHCHECK_PORT", "0");
    DaemonCmd { cmd }
}

impl DaemonCmd {
    pub fn arg(mut self, arg: &str) -> Self {
        self.cmd.arg(arg);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Runs to completion and returns the captured output. Only suitable for
    /// invocations that are expected to exit on their own (flags, startup
    /// failures) — a daemon that reaches its ready state never returns here.
    pub fn run(mut self) -> RunAssert {
        let output = self.cmd.output().expect("cdcron should spawn");
        RunAssert { output }
    }

    /// Spawns the process, lets it run for `duration`, then kills it and
    /// returns whatever it had written to stdout/stderr by that point.
    /// For specs against a daemon that (by design) never exits on its own.
    pub fn run_killed_after(mut self, duration: Duration) -> RunAssert {
        let mut child = self
            .cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("cdcron should spawn");

        std::thread::sleep(duration);
        let _ = child.kill();
        let status = child.wait().expect("cdcron should be killable");

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        if let Some(mut out) = child.stdout.take() {
            let _ = out.read_to_end(&mut stdout);
        }
        if let Some(mut err) = child.stderr.take() {
            let _ = err.read_to_end(&mut stderr);
        }

        RunAssert {
            output: std::process::Output {
                status,
                stdout,
                stderr,
            },
        }
    }
}

/// Result of a `cdcron` run, for chaining assertions.
pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn succeeded(&self) -> bool {
        self.output.status.success()
    }

    pub fn passes(self) -> Self {
        assert!(
            self.succeeded(),
            "expected cdcron to exit 0, got {:?}\nstdout: {}\nstderr: {}",
            self.output.status.code(),
            self.stdout(),
            self.stderr()
        );
        self
    }

    pub fn fails(self) -> Self {
        assert!(
            !self.succeeded(),
            "expected cdcron to exit non-zero, but it passed\nstdout: {}",
            self.stdout()
        );
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{expected}'\nstdout: {stdout}"
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{expected}'\nstderr: {stderr}"
        );
        self
    }
}

/// Writes a workload JSON array to a fresh temp file and returns the
/// directory (kept alive alongside the path) and the path itself.
pub fn workload_file(tasks_json: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workload.json");
    std::fs::write(&path, tasks_json).unwrap();
    (dir, path)
}
