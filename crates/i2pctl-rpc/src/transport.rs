// crates/i2pctl-rpc/src/transport.rs
//
// The HTTP seam under a Session: one POST of a JSON body, one reply back.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use i2pctl_core::ControlError;

/// Status and body of a fully received HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether this reply should reach a response handler.
    pub fn is_deliverable(&self) -> bool {
        self.status == 200 && !self.body.is_empty()
    }
}

/// Sends a serialized request envelope to the router.
///
/// Implemented by [`HttpTransport`]; tests substitute in-memory transports.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` with `Content-Type: application/json` and return the reply.
    async fn post_json(&self, body: Vec<u8>) -> Result<HttpReply, ControlError>;
}

/// reqwest-backed transport POSTing to a fixed endpoint.
///
/// No request timeout is configured; the client's own limits apply.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    /// Use a preconfigured client (proxy, TLS roots, ...).
    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, body: Vec<u8>) -> Result<HttpReply, ControlError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ControlError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ControlError::Transport(e.to_string()))?;

        tracing::trace!("{} replied {} ({} bytes)", self.endpoint, status, body.len());
        Ok(HttpReply { status, body })
    }
}
