// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for cdcron's external I/O: the coordinator HTTP client, the
//! health endpoint, and the job HTTP client that fires scheduled tasks.

pub mod coordinator;
pub mod dispatch;
pub mod health;

pub use coordinator::{CoordinatorClient, CoordinatorError, HttpCoordinatorClient};
pub use dispatch::{JobHttpClient, JobHttpError, JobResponse, ReqwestJobClient};
pub use health::{HealthServer, HealthServerError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use coordinator::{CoordinatorCall, FakeCoordinatorClient};
#[cfg(any(test, feature = "test-support"))]
pub use dispatch::{FakeJobClient, JobCall};
