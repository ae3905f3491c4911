// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Health endpoint: a hand-rolled minimal HTTP responder satisfying the
//! coordinator's health probe. Five lines of static response text don't
//! justify pulling in an HTTP server framework.

use std::io;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const RESPONSE_BODY: &str = "Ok";

#[derive(Debug, Error)]
pub enum HealthServerError {
    #[error("failed to bind health endpoint on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// A running health endpoint server. Dropping or calling [`HealthServer::shutdown`]
/// stops the accept loop.
pub struct HealthServer {
    local_addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl HealthServer {
    /// Bind to `0.0.0.0:port` and start answering every request `200 OK`.
    /// Must be called before registration so the coordinator's first probe
    /// succeeds.
    pub async fn bind(port: u16) -> Result<Self, HealthServerError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| HealthServerError::Bind { addr, source })?;
        let local_addr = listener.local_addr().unwrap_or(addr);

        let handle = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, peer)) => {
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(stream).await {
                                debug!(%peer, error = %e, "health probe connection failed");
                            }
                        });
                    }
                    Err(e) => {
                        warn!(error = %e, "health endpoint accept failed");
                    }
                }
            }
        });

        Ok(Self { local_addr, handle })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop the accept loop. The endpoint no longer answers probes afterward.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for HealthServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Read (and discard) a single HTTP request line/headers, then answer
/// `200 OK` regardless of method or path.
async fn handle_connection(stream: TcpStream) -> io::Result<()> {
    let mut reader = BufReader::new(stream);
    drain_request(&mut reader).await?;

    let body = RESPONSE_BODY;
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    reader.into_inner().write_all(response.as_bytes()).await?;
    Ok(())
}

async fn drain_request<R: tokio::io::AsyncRead + Unpin>(reader: &mut BufReader<R>) -> io::Result<()> {
    use tokio::io::AsyncBufReadExt;

    let mut line = String::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 || line == "\r\n" {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
