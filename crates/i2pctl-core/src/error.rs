use thiserror::Error;

/// Client-wide error type for the I2PControl client.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A 200 response carried a body that is not valid JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A request envelope could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The router did not issue a usable token (strict authentication only).
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// `update_document` was given an identifier the document does not have.
    #[error("No element with id '{0}'")]
    MissingElement(String),

    /// Caller-supplied method or params are unusable.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ControlError {
    fn from(e: serde_json::Error) -> Self {
        ControlError::Serialization(e.to_string())
    }
}
