// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON-RPC transport seam.
//!
//! Everything above this module talks to the node through [`Transport`], so
//! tests can swap in a `MockRpcClient` and the server can hand over a real
//! WebSocket connection.

use crate::error::TransportError;
use futures::{FutureExt, future::BoxFuture};
use serde_json::Value;
use std::sync::Arc;
use subxt_rpcs::client::{ReconnectingRpcClient, RpcClient, RpcParams};

pub trait Transport: Send + Sync {
    /// Issue one JSON-RPC request with positional params.
    fn request<'a>(
        &'a self,
        method: &'a str,
        params: Vec<Value>,
    ) -> BoxFuture<'a, Result<Value, TransportError>>;
}

/// [`Transport`] backed by a `subxt-rpcs` client.
#[derive(Clone)]
pub struct RpcTransport {
    client: Arc<RpcClient>,
}

impl RpcTransport {
    pub fn new(client: Arc<RpcClient>) -> Self {
        Self { client }
    }

    /// Connect to a node.
    ///
    /// `ws://` and `wss://` URLs get a client that reconnects with exponential
    /// backoff when the socket drops; in-flight calls fail and later calls go
    /// over the new connection. `http://` and `https://` URLs get a plain client.
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let client = if is_websocket(url) {
            let reconnecting = ReconnectingRpcClient::builder()
                .build(url)
                .await
                .map_err(|e| connect_error(e.to_string()))?;
            RpcClient::new(reconnecting)
        } else {
            RpcClient::from_insecure_url(url)
                .await
                .map_err(|e| connect_error(e.to_string()))?
        };

        tracing::info!(url, reconnecting = is_websocket(url), "Connected to node");
        Ok(Self::new(Arc::new(client)))
    }
}

fn is_websocket(url: &str) -> bool {
    url.starts_with("ws://") || url.starts_with("wss://")
}

fn connect_error(message: String) -> TransportError {
    TransportError::Rpc {
        method: "connect".to_string(),
        message,
    }
}

impl Transport for RpcTransport {
    fn request<'a>(
        &'a self,
        method: &'a str,
        params: Vec<Value>,
    ) -> BoxFuture<'a, Result<Value, TransportError>> {
        async move {
            let mut rpc_params = RpcParams::new();
            for param in params {
                rpc_params
                    .push(param)
                    .map_err(|e| TransportError::unexpected(method, e.to_string()))?;
            }

            tracing::trace!(method, "Sending RPC request");

            self.client
                .request::<Value>(method, rpc_params)
                .await
                .map_err(|e| TransportError::Rpc {
                    method: method.to_string(),
                    message: e.to_string(),
                })
        }
        .boxed()
    }
}

/// Request a method whose result is a hex string.
///
/// `null`, `""` and `"0x"` all come back as `None`; any non-string result is an error.
pub async fn request_hex_string(
    transport: &dyn Transport,
    method: &str,
    params: Vec<Value>,
) -> Result<Option<String>, TransportError> {
    match transport.request(method, params).await? {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() || s == "0x" => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(TransportError::unexpected(
            method,
            format!("expected a string, got {other}"),
        )),
    }
}
