//! Node connection configuration with validation.

use super::errors::ConfigError;
use super::requests::Endpoint;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where and how to reach the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConnection {
    /// Node RPC URL.
    pub node_url: String,
    /// Work server URL. Defaults to the node.
    pub work_url: Option<String>,
    /// HTTP basic auth credentials.
    pub auth: Option<BasicAuth>,
    /// Whole-request timeout. Work generation can take several seconds.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Connect timeout
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl Default for NodeConnection {
    fn default() -> Self {
        Self {
            node_url: "http://127.0.0.1:7076".to_string(),
            work_url: None,
            auth: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl NodeConnection {
    /// Connection to `node_url` with default timeouts.
    pub fn new(node_url: impl Into<String>) -> Self {
        Self {
            node_url: node_url.into(),
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url(&self.node_url)?;
        if let Some(work_url) = &self.work_url {
            check_url(work_url)?;
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("timeout cannot be 0".into()));
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "connect_timeout cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// URL for an endpoint.
    pub fn url_for(&self, endpoint: Endpoint) -> &str {
        match (endpoint, &self.work_url) {
            (Endpoint::Work, Some(work_url)) => work_url,
            _ => &self.node_url,
        }
    }
}

/// HTTP basic auth credentials.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BasicAuth {
    /// User name
    pub username: String,
    /// Password
    pub password: String,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn check_url(url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl(format!(
            "{url:?} must start with http:// or https://"
        )))
    }
}
