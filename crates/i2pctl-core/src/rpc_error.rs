// crates/i2pctl-core/src/rpc_error.rs
//
// Error codes a router reports through I2PControl, and a loose typed view of
// whatever error object a response carries.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Error codes defined by JSON-RPC 2.0 and the I2PControl extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i64)]
pub enum RpcErrorCode {
    // Standard JSON-RPC 2.0 codes
    ParseError = -32700,
    InvalidRequest = -32600,
    MethodNotFound = -32601,
    InvalidParameters = -32602,
    InternalError = -32603,

    // I2PControl codes
    InvalidPassword = -32001,
    NoToken = -32002,
    NonexistentToken = -32003,
    ExpiredToken = -32004,
    UnspecifiedVersion = -32005,
    UnsupportedVersion = -32006,
}

impl RpcErrorCode {
    /// Look up a wire code. Unknown codes return `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -32700 => Some(RpcErrorCode::ParseError),
            -32600 => Some(RpcErrorCode::InvalidRequest),
            -32601 => Some(RpcErrorCode::MethodNotFound),
            -32602 => Some(RpcErrorCode::InvalidParameters),
            -32603 => Some(RpcErrorCode::InternalError),
            -32001 => Some(RpcErrorCode::InvalidPassword),
            -32002 => Some(RpcErrorCode::NoToken),
            -32003 => Some(RpcErrorCode::NonexistentToken),
            -32004 => Some(RpcErrorCode::ExpiredToken),
            -32005 => Some(RpcErrorCode::UnspecifiedVersion),
            -32006 => Some(RpcErrorCode::UnsupportedVersion),
            _ => None,
        }
    }

    /// Numeric wire value.
    pub fn code(&self) -> i64 {
        *self as i64
    }

    /// Message the router sends with this code.
    pub fn message(&self) -> &'static str {
        match self {
            RpcErrorCode::ParseError => "Json parse error.",
            RpcErrorCode::InvalidRequest => "Invalid request.",
            RpcErrorCode::MethodNotFound => "Method not found.",
            RpcErrorCode::InvalidParameters => "Invalid parameters.",
            RpcErrorCode::InternalError => "Internal error.",
            RpcErrorCode::InvalidPassword => "Invalid password.",
            RpcErrorCode::NoToken => "No authentication token given.",
            RpcErrorCode::NonexistentToken => "Nonexistent authentication token given.",
            RpcErrorCode::ExpiredToken => "Expired authentication token given.",
            RpcErrorCode::UnspecifiedVersion => "Version not specified.",
            RpcErrorCode::UnsupportedVersion => "Version not supported.",
        }
    }

    /// Whether re-authenticating could clear this error.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            RpcErrorCode::NoToken | RpcErrorCode::NonexistentToken | RpcErrorCode::ExpiredToken
        )
    }
}

impl fmt::Display for RpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

/// An error object as reported by a router.
///
/// The detail structure is router-defined, so parsing never fails: missing
/// fields fall back to code 0 and an empty message, and non-object errors are
/// kept verbatim as the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                code: map.get("code").and_then(Value::as_i64).unwrap_or(0),
                message: map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            },
            Value::String(s) => Self {
                code: 0,
                message: s.clone(),
            },
            other => Self {
                code: 0,
                message: other.to_string(),
            },
        }
    }

    /// The known code, if this is one of the protocol's codes.
    pub fn error_code(&self) -> Option<RpcErrorCode> {
        RpcErrorCode::from_code(self.code)
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RPC error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}
