// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The workload: an ordered sequence of scheduled HTTP tasks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// HTTP method a task may fire. Only these eight verbs are recognized; any
/// other string in a workload file is an unsupported method (logged and
/// skipped, not a parse error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethodKind {
    Get,
    Head,
    Options,
    Trace,
    Put,
    Delete,
    Post,
    Patch,
}

impl HttpMethodKind {
    /// Whether this method's task carries a request body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Put | Self::Post | Self::Patch)
    }
}

impl fmt::Display for HttpMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        };
        write!(f, "{s}")
    }
}

/// Error parsing an HTTP method string from a workload file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Method '{0}' not supported")]
pub struct UnsupportedMethod(pub String);

impl FromStr for HttpMethodKind {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "TRACE" => Ok(Self::Trace),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "POST" => Ok(Self::Post),
            "PATCH" => Ok(Self::Patch),
            other => Err(UnsupportedMethod(other.to_string())),
        }
    }
}

/// One scheduled HTTP request, as read from the workload file.
///
/// `method` is kept as the raw string from the file; parsing/validation into
/// an [`HttpMethodKind`] happens at load time so unsupported methods can be
/// logged and skipped without failing the whole workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub method: String,
    pub url: String,
    pub cron: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// The full workload: an ordered, immutable sequence of [`Task`] records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workload {
    pub tasks: Vec<Task>,
}

impl Workload {
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let tasks: Vec<Task> = serde_json::from_slice(bytes)?;
        Ok(Self { tasks })
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
