//! Watcher error types.

use nw_03_transfers::{ConfigError as TransferConfigError, TransferError};
use thiserror::Error;

/// Watcher configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Keepalive interval is zero.
    #[error("Invalid keepalive interval: {0}")]
    InvalidKeepalive(String),

    /// Pool cannot hold a receiver.
    #[error("Invalid receiver pool size: {0}")]
    InvalidPoolSize(String),

    /// Push channel URL or buffer rejected.
    #[error("Invalid channel config: {0}")]
    InvalidChannel(String),

    /// Nested transfer config rejected.
    #[error(transparent)]
    Transfer(#[from] TransferConfigError),
}

/// Watcher errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatcherError {
    /// Confirmation for neither a watched account nor a watched link.
    #[error("Confirmation for unwatched account {account} (link {link})")]
    UnwatchedAccount {
        /// Block account
        account: String,
        /// Link as account
        link: String,
    },

    /// Inbound frame could not be understood.
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// Account cannot be watched.
    #[error("Invalid account: {0}")]
    InvalidAccount(String),

    /// Push channel is not connected.
    #[error("Push channel not connected")]
    NotConnected,

    /// Push channel failed.
    #[error("Push channel error: {0}")]
    Channel(String),

    /// Configuration rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A receiver could not be created.
    #[error("Receiver error: {0}")]
    Transfer(#[from] TransferError),
}
