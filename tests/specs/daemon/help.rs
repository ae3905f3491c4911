//! cdcron help and version specs
//!
//! Verify --help and --version print and exit zero without touching the
//! environment or attempting to start anything.

use crate::prelude::*;

#[test]
fn version_flag_prints_version() {
    daemon()
        .arg("--version")
        .run()
        .passes()
        .stdout_has("cdcron ");
}

#[test]
fn short_version_flag_prints_version() {
    daemon().arg("-V").run().passes().stdout_has("cdcron ");
}

#[test]
fn help_flag_shows_usage() {
    daemon()
        .arg("--help")
        .run()
        .passes()
        .stdout_has("USAGE:")
        .stdout_has("--version");
}

#[test]
fn short_help_flag_shows_usage() {
    daemon().arg("-h").run().passes().stdout_has("USAGE:");
}

#[test]
fn unknown_arg_fails() {
    daemon()
        .arg("--bogus")
        .run()
        .fails()
        .stderr_has("unexpected argument");
}
