// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cdcron-engine: the Leadership Manager and the Cron Dispatcher it gates.

pub mod dispatcher;
pub mod leadership;

pub use dispatcher::{load_workload, CronDispatcher, ValidatedTask, WorkloadError};
pub use leadership::{LeadershipError, LeadershipManager};
