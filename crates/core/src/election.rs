// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The election key: a single coordinator key that at most one session may
//! hold at a time.

use crate::session::SessionId;

/// Path of the single coordinator key contended for leadership, and the
/// small JSON object stored at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionKey {
    pub service_name: String,
}

impl ElectionKey {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    /// `service/{service_name}/leader`
    pub fn path(&self) -> String {
        format!("service/{}/leader", self.service_name)
    }
}

/// A snapshot of the election key as read from the coordinator: who (if
/// anyone) holds it, and the key's current `ModifyIndex`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockObservation {
    pub held_by: Option<SessionId>,
    pub modify_index: u64,
}

impl LockObservation {
    pub fn is_held_by(&self, session: &SessionId) -> bool {
        self.held_by.as_ref() == Some(session)
    }
}

#[cfg(test)]
#[path = "election_tests.rs"]
mod tests;
