//! Behavioral specifications for the cdcron binary.
//!
//! These tests are black-box: they invoke the compiled binary and verify
//! stdout, stderr, and exit codes against spec.md §8's concrete scenarios.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// daemon/
#[path = "specs/daemon/help.rs"]
mod daemon_help;
#[path = "specs/daemon/workload.rs"]
mod daemon_workload;
