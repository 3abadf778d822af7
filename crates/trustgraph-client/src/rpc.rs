//! Minimal JSON-RPC 2.0 transport for the chain bridge.
//!
//! The bridge is the deployment's protocol-SDK sidecar: it exposes the
//! standard `eth_*` read surface plus the `multivault_*` write surface, and
//! it holds the signing key. This client only moves envelopes; it never
//! sees key material.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("rpc transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("rpc error {code}: {message}")]
    Protocol {
        code: i64,
        message: String,
        data: Option<Value>,
    },
    #[error("could not decode rpc response: {0}")]
    Decode(String),
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    data: Option<Value>,
}

/// One JSON-RPC endpoint with a process-local request-id counter.
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: Url,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        tracing::debug!(method, id, "rpc call");

        let response: RpcResponse = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(RpcError::Protocol {
                code: err.code,
                message: err.message,
                data: err.data,
            });
        }
        response
            .result
            .ok_or_else(|| RpcError::Decode(format!("{method}: response had no result")))
    }
}

/// Decode an EVM quantity (`"0x..."` hex string, or a bare decimal string /
/// number from lenient bridges) into base units.
pub fn decode_quantity(value: &Value) -> Result<u128, RpcError> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Some(hex_digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                u128::from_str_radix(hex_digits, 16)
                    .map_err(|_| RpcError::Decode(format!("bad hex quantity {s:?}")))
            } else {
                s.parse()
                    .map_err(|_| RpcError::Decode(format!("bad quantity {s:?}")))
            }
        }
        Value::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| RpcError::Decode(format!("bad numeric quantity {n}"))),
        other => Err(RpcError::Decode(format!("expected quantity, got {other}"))),
    }
}

/// Encode base units as an EVM hex quantity.
pub fn encode_quantity(value: u128) -> String {
    format!("0x{value:x}")
}
