// crates/i2pctl-core/src/envelope.rs
//
// JSON-RPC 2.0 request and response envelopes as spoken by I2PControl.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ControlError;
use crate::protocol::{JSONRPC_VERSION, REQUEST_ID, RESULT_ERROR};
use crate::rpc_error::RpcError;

/// Named parameters of a call.
pub type Params = Map<String, Value>;

/// The `result` object of a response.
pub type RpcResult = Map<String, Value>;

/// Request envelope: `{"id":0,"method":...,"params":{...},"jsonrpc":"2.0"}`.
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Always [`REQUEST_ID`].
    pub id: u64,
    /// Remote method name (e.g. "RouterInfo").
    pub method: String,
    /// Named parameters, including the session token once authenticated.
    pub params: Params,
    /// Always "2.0".
    pub jsonrpc: String,
}

impl RpcRequest {
    /// Build an envelope for `method` with the given params.
    pub fn new(method: impl Into<String>, params: Params) -> Self {
        Self {
            id: REQUEST_ID,
            method: method.into(),
            params,
            jsonrpc: JSONRPC_VERSION.to_string(),
        }
    }

    /// Serialize the envelope into a request body.
    pub fn to_body(&self) -> Result<Vec<u8>, ControlError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Response envelope. Only `result` is required by the client; the router
/// reports its own failures (bad token, unknown method) in `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<RpcResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
}

impl RpcResponse {
    /// Parse a response body.
    ///
    /// A body that is not a JSON-RPC response object yields
    /// [`ControlError::Parse`].
    pub fn from_body(body: &str) -> Result<Self, ControlError> {
        serde_json::from_str(body).map_err(|e| ControlError::Parse(e.to_string()))
    }

    /// Whether `result` carries an `error` key or the envelope itself
    /// carries an error.
    pub fn has_error(&self) -> bool {
        let in_result = self
            .result
            .as_ref()
            .is_some_and(|r| r.contains_key(RESULT_ERROR));
        in_result || self.error.is_some()
    }

    /// Typed view of the reported error, preferring the one inside `result`.
    pub fn rpc_error(&self) -> Option<RpcError> {
        self.result
            .as_ref()
            .and_then(|r| r.get(RESULT_ERROR))
            .or(self.error.as_ref())
            .map(RpcError::from_value)
    }

    /// Consume the envelope and return its `result`, empty when absent.
    pub fn into_result(self) -> RpcResult {
        self.result.unwrap_or_default()
    }
}
