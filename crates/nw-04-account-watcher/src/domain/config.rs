//! Watcher and push channel configuration.

use super::errors::ConfigError;
use nw_03_transfers::TransferConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Account watcher settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Receive incoming sends to watched accounts that hold a private key.
    pub auto_receive: bool,
    /// Ping interval while connected.
    #[serde(with = "humantime_serde")]
    pub keepalive_interval: Duration,
    /// Upper bound on concurrent auto-receives.
    pub max_receivers: usize,
    /// Settings for the receivers.
    pub transfer: TransferConfig,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            auto_receive: true,
            keepalive_interval: Duration::from_secs(30),
            max_receivers: 4,
            transfer: TransferConfig::default(),
        }
    }
}

impl WatcherConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keepalive_interval.is_zero() {
            return Err(ConfigError::InvalidKeepalive(
                "keepalive_interval cannot be 0".into(),
            ));
        }
        if self.max_receivers == 0 {
            return Err(ConfigError::InvalidPoolSize(
                "max_receivers must be at least 1".into(),
            ));
        }
        self.transfer.validate()?;
        Ok(())
    }
}

/// WebSocket connection settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// `ws://` or `wss://` URL of the node's WebSocket server.
    pub url: String,
    /// Raw `Authorization` header value, e.g. `Basic dXNlcjpwYXNz`.
    pub authorization: Option<String>,
    /// Inbound event buffer.
    pub event_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:7078".to_string(),
            authorization: None,
            event_buffer: 256,
        }
    }
}

impl ChannelConfig {
    /// Config for `url` with defaults otherwise.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// True for `wss://` URLs.
    pub fn is_secure(&self) -> bool {
        self.url.starts_with("wss://")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Err(ConfigError::InvalidChannel(format!(
                "{} is not a ws:// or wss:// URL",
                self.url
            )));
        }
        if self.event_buffer == 0 {
            return Err(ConfigError::InvalidChannel(
                "event_buffer must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ChannelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelConfig")
            .field("url", &self.url)
            .field(
                "authorization",
                &self.authorization.as_ref().map(|_| "<redacted>"),
            )
            .field("event_buffer", &self.event_buffer)
            .finish()
    }
}
