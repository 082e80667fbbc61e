//! Transfer configuration with validation.

use super::errors::ConfigError;
use nw_01_accounts::decode_address;
use serde::{Deserialize, Serialize};
use shared_types::PublicKey;
use std::time::Duration;

/// Work threshold the node requires for receive and open blocks.
pub const RECEIVE_WORK_DIFFICULTY: &str = "fffffe0000000000";

/// Send and receive flow settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Representative for accounts opened by a receive.
    pub default_representative: Option<String>,
    /// Difficulty for send work. `None` leaves it to the node.
    pub work_difficulty: Option<String>,
    /// Difficulty for receive and open work.
    pub receive_work_difficulty: Option<String>,
    /// Forward `use_peers` on work requests.
    pub use_peers: bool,
    /// Per-request timeout. `None` waits forever.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            default_representative: None,
            work_difficulty: None,
            receive_work_difficulty: Some(RECEIVE_WORK_DIFFICULTY.to_string()),
            use_peers: false,
            request_timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl TransferConfig {
    /// Config with a representative for new accounts.
    pub fn with_default_representative(address: impl Into<String>) -> Self {
        Self {
            default_representative: Some(address.into()),
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.default_representative_key()?;
        for difficulty in [&self.work_difficulty, &self.receive_work_difficulty]
            .into_iter()
            .flatten()
        {
            if difficulty.len() != 16 || !difficulty.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ConfigError::InvalidDifficulty(format!(
                    "{difficulty:?} must be 16 hex digits"
                )));
            }
        }
        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// Decoded default representative.
    pub fn default_representative_key(&self) -> Result<Option<PublicKey>, ConfigError> {
        self.default_representative
            .as_deref()
            .map(|address| {
                decode_address(address)
                    .map_err(|e| ConfigError::InvalidRepresentative(format!("{address}: {e}")))
            })
            .transpose()
    }
}
