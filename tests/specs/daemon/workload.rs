//! Workload file specs
//!
//! Verify the two workload-related scenarios: a missing file is a fatal
//! startup error, and an unsupported method is skipped without affecting
//! the rest of the workload.

use crate::prelude::*;
use std::time::Duration;

#[test]
fn missing_workload_file_exits_non_zero_before_any_registration() {
    daemon()
        .env("WORKLOAD_FILE", "/nope/does-not-exist.json")
        .run()
        .fails()
        .stderr_has("doesn't exist");
}

// No local coordinator is available in this environment, so the daemon
// never acquires leadership and the dispatcher never actually fires a
// request. This spec therefore only checks the load-time behavior: the
// unsupported task is logged and skipped, and the other task is still
// counted into the loaded workload (not dropped along with it). The
// dispatch-while-leader behavior itself is covered by
// `crates/engine/src/dispatcher/mod_tests.rs`.
#[test]
fn unsupported_method_is_skipped_but_other_tasks_are_still_loaded() {
    let (_dir, path) = workload_file(
        r#"[
            {"method": "CONNECT", "url": "http://example.invalid/a", "cron": "* * * * * *"},
            {"method": "GET", "url": "http://example.invalid/b", "cron": "* * * * * *"}
        ]"#,
    );

    daemon()
        .env("WORKLOAD_FILE", &path)
        .run_killed_after(Duration::from_millis(800))
        .stdout_has("Method 'CONNECT' not supported")
        .stdout_has("tasks=1");
}
