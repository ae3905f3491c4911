// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Real coordinator client, over `reqwest`.

use super::{CoordinatorClient, CoordinatorError};
use async_trait::async_trait;
use cdcron_core::{
    CoordinatorEndpoint, ElectionKey, LockObservation, ServiceIdentity, SessionId,
    SESSION_BEHAVIOR, SESSION_LOCK_DELAY, SESSION_TTL,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const TOKEN_HEADER: &str = "X-Consul-Token";

#[derive(Debug, Serialize)]
struct RegisterPayload<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Address")]
    address: &'a str,
    #[serde(rename = "Port")]
    port: u16,
    #[serde(rename = "Check")]
    check: CheckPayload<'a>,
}

#[derive(Debug, Serialize)]
struct CheckPayload<'a> {
    #[serde(rename = "HTTP")]
    http: String,
    #[serde(rename = "Interval")]
    interval: &'a str,
    #[serde(rename = "Timeout")]
    timeout: &'a str,
    #[serde(rename = "DeregisterCriticalServiceAfter")]
    deregister_critical_service_after: &'a str,
}

#[derive(Debug, Serialize)]
struct SessionCreatePayload<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "TTL")]
    ttl: &'a str,
    #[serde(rename = "LockDelay")]
    lock_delay: &'a str,
    #[serde(rename = "Behavior")]
    behavior: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionCreateResponse {
    #[serde(rename = "ID")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct KvEntry {
    #[serde(rename = "Session")]
    session: Option<String>,
    #[serde(rename = "ModifyIndex")]
    modify_index: u64,
}

#[derive(Debug, Serialize)]
struct LockPayload<'a> {
    leader: &'a str,
}

/// The real [`CoordinatorClient`], talking to a Consul-compatible HTTP API.
#[derive(Clone)]
pub struct HttpCoordinatorClient {
    http: reqwest::Client,
    endpoint: CoordinatorEndpoint,
}

impl HttpCoordinatorClient {
    pub fn new(endpoint: CoordinatorEndpoint) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.base_url(), path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = &self.endpoint.token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        builder
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> Result<reqwest::Response, CoordinatorError> {
        builder
            .send()
            .await
            .map_err(|e| CoordinatorError::Transport(format!("{operation}: {e}")))
    }
}

#[async_trait]
impl CoordinatorClient for HttpCoordinatorClient {
    async fn register(&self, identity: &ServiceIdentity) -> Result<(), CoordinatorError> {
        let payload = RegisterPayload {
            id: &identity.service_id,
            name: &identity.service_name,
            address: &identity.health_address,
            port: identity.health_port,
            check: CheckPayload {
                http: identity.probe_url(),
                interval: "5s",
                timeout: "1s",
                deregister_critical_service_after: "30s",
            },
        };
        let response = self
            .send(
                self.request(reqwest::Method::PUT, "/v1/agent/service/register")
                    .json(&payload),
                "register",
            )
            .await?;
        match response.status().as_u16() {
            200 => Ok(()),
            status => Err(CoordinatorError::UnexpectedStatus {
                operation: "register",
                status,
            }),
        }
    }

    async fn deregister(&self, identity: &ServiceIdentity) -> Result<(), CoordinatorError> {
        let path = format!(
            "/v1/agent/service/deregister/{}",
            identity.service_id
        );
        let response = self
            .send(self.request(reqwest::Method::PUT, &path), "deregister")
            .await?;
        match response.status().as_u16() {
            200 | 404 => Ok(()),
            status => Err(CoordinatorError::UnexpectedStatus {
                operation: "deregister",
                status,
            }),
        }
    }

    async fn catalog_lookup(&self, service_name: &str) -> Result<bool, CoordinatorError> {
        let path = format!("/v1/catalog/service/{service_name}");
        let response = self
            .send(self.request(reqwest::Method::GET, &path), "catalog_lookup")
            .await?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(CoordinatorError::UnexpectedStatus {
                operation: "catalog_lookup",
                status,
            });
        }
        let entries: Vec<Value> = response.json().await.map_err(|e| CoordinatorError::Malformed {
            operation: "catalog_lookup",
            detail: e.to_string(),
        })?;
        Ok(!entries.is_empty())
    }

    async fn session_create(&self, service_name: &str) -> Result<SessionId, CoordinatorError> {
        let payload = SessionCreatePayload {
            name: service_name,
            ttl: SESSION_TTL,
            lock_delay: SESSION_LOCK_DELAY,
            behavior: SESSION_BEHAVIOR,
        };
        let response = self
            .send(
                self.request(reqwest::Method::PUT, "/v1/session/create")
                    .json(&payload),
                "session_create",
            )
            .await?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(CoordinatorError::UnexpectedStatus {
                operation: "session_create",
                status,
            });
        }
        let body: SessionCreateResponse =
            response.json().await.map_err(|e| CoordinatorError::Malformed {
                operation: "session_create",
                detail: e.to_string(),
            })?;
        Ok(SessionId::from(body.id))
    }

    async fn session_renew(&self, session: &SessionId) -> Result<(), CoordinatorError> {
        let path = format!("/v1/session/renew/{session}");
        let response = self
            .send(self.request(reqwest::Method::PUT, &path), "session_renew")
            .await?;
        match response.status().as_u16() {
            200 => Ok(()),
            status => Err(CoordinatorError::UnexpectedStatus {
                operation: "session_renew",
                status,
            }),
        }
    }

    async fn lock_acquire(
        &self,
        key: &ElectionKey,
        session: &SessionId,
    ) -> Result<bool, CoordinatorError> {
        let path = format!("/v1/kv/{}?acquire={}", key.path(), session);
        let payload = LockPayload {
            leader: session.as_str(),
        };
        let response = self
            .send(
                self.request(reqwest::Method::PUT, &path).json(&payload),
                "lock_acquire",
            )
            .await?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(CoordinatorError::UnexpectedStatus {
                operation: "lock_acquire",
                status,
            });
        }
        parse_bool_body(response, "lock_acquire").await
    }

    async fn lock_read(&self, key: &ElectionKey) -> Result<Option<LockObservation>, CoordinatorError> {
        let path = format!("/v1/kv/{}", key.path());
        let response = self
            .send(self.request(reqwest::Method::GET, &path), "lock_read")
            .await?;
        match response.status().as_u16() {
            404 => Ok(None),
            200 => {
                let entries: Vec<KvEntry> =
                    response.json().await.map_err(|e| CoordinatorError::Malformed {
                        operation: "lock_read",
                        detail: e.to_string(),
                    })?;
                Ok(entries.into_iter().next().map(|entry| LockObservation {
                    held_by: entry.session.map(SessionId::from),
                    modify_index: entry.modify_index,
                }))
            }
            status => Err(CoordinatorError::UnexpectedStatus {
                operation: "lock_read",
                status,
            }),
        }
    }

    async fn lock_release(
        &self,
        key: &ElectionKey,
        session: &SessionId,
    ) -> Result<bool, CoordinatorError> {
        let path = format!("/v1/kv/{}?release={}", key.path(), session);
        let payload = LockPayload {
            leader: session.as_str(),
        };
        let response = self
            .send(
                self.request(reqwest::Method::PUT, &path).json(&payload),
                "lock_release",
            )
            .await?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(CoordinatorError::UnexpectedStatus {
                operation: "lock_release",
                status,
            });
        }
        parse_bool_body(response, "lock_release").await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;

async fn parse_bool_body(
    response: reqwest::Response,
    operation: &'static str,
) -> Result<bool, CoordinatorError> {
    let text = response
        .text()
        .await
        .map_err(|e| CoordinatorError::Malformed {
            operation,
            detail: e.to_string(),
        })?;
    text.trim()
        .parse::<bool>()
        .map_err(|_| CoordinatorError::Malformed {
            operation,
            detail: format!("expected boolean body, got {text:?}"),
        })
}
