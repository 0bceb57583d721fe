// crates/i2pctl-rpc/src/lib.rs
//
// i2pctl-rpc: Authenticated JSON-RPC session for a router's I2PControl
// endpoint.
//
// A Session authenticates once, caches the issued token and attaches it to
// every later call. Calls go over a Transport; the default one POSTs to the
// configured endpoint with reqwest.

pub mod config;
pub mod session;
pub mod transport;

// Re-export the main types for ergonomic access.
pub use config::{AuthPolicy, ClientConfig};
pub use session::{validate_authentication, AuthState, Session, SessionState};
pub use transport::{HttpReply, HttpTransport, Transport};
