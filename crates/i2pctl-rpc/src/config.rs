// crates/i2pctl-rpc/src/config.rs
//
// Client configuration for talking to a router's I2PControl endpoint.
// Loaded from a TOML file or populated with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use i2pctl_core::protocol::{API_VERSION, DEFAULT_ENDPOINT, DEFAULT_PASSWORD};
use i2pctl_core::ControlError;

/// How `start` treats the router's answer to `Authenticate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthPolicy {
    /// Any response marks the session ready, whatever it contains.
    #[default]
    Permissive,
    /// The response must carry a token and no error.
    Strict,
}

/// Runtime configuration for the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// URL every call is POSTed to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Shared I2PControl password.
    #[serde(default = "default_password")]
    pub password: String,

    /// API version announced in `Authenticate`.
    #[serde(default = "default_api_version")]
    pub api_version: u64,

    /// Authentication policy: "permissive" or "strict".
    #[serde(default)]
    pub auth_policy: AuthPolicy,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

fn default_api_version() -> u64 {
    API_VERSION
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            password: default_password(),
            api_version: default_api_version(),
            auth_policy: AuthPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ControlError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ControlError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ControlError> {
        let config: ClientConfig =
            toml::from_str(contents).map_err(|e| ControlError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// `~/.i2pctl/config.toml`, if a home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".i2pctl").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ControlError> {
        if self.endpoint.trim().is_empty() {
            return Err(ControlError::Config("endpoint must not be empty".to_string()));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ControlError::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        Ok(())
    }
}
