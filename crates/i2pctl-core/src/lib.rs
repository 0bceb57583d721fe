// crates/i2pctl-core/src/lib.rs
//
// i2pctl-core: Shared types for the I2PControl JSON-RPC client.
//
// This is the leaf crate of the workspace. It defines the request/response
// envelopes, the protocol's method and parameter names, the router status
// labels, the display-slot document used to render results, and the error
// type shared by the transport and CLI crates.

pub mod document;
pub mod envelope;
pub mod error;
pub mod protocol;
pub mod rpc_error;
pub mod status;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use i2pctl_core::RpcRequest;`

// Envelope types
pub use envelope::{Params, RpcRequest, RpcResponse, RpcResult};

// Error types
pub use error::ControlError;
pub use rpc_error::{RpcError, RpcErrorCode};

// Status formatter
pub use status::{status_to_string, status_value_to_string, NetStatus};

// Rendering surface
pub use document::{to_markup, update_document, Document, SlotDocument};
