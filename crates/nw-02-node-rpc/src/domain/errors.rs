//! # Domain Errors
//!
//! Transport failures, node-reported failures and request-building failures
//! are kept apart so the transfer layer can classify them.

use nw_01_accounts::AccountError;
use shared_types::AmountError;
use thiserror::Error;

/// The request never produced a usable reply body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout.
    #[error("Could not communicate with node: {0}")]
    Connection(String),

    /// Non-success HTTP status.
    #[error("Node returned HTTP status {code}")]
    Status {
        /// HTTP status code
        code: u16,
    },

    /// Request could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// Reply body is not JSON.
    #[error("Reply is not valid JSON: {0}")]
    Body(String),
}

impl TransportError {
    /// Numeric status, 0 when the failure happened below HTTP.
    pub fn status_code(&self) -> u16 {
        match self {
            TransportError::Status { code } => *code,
            _ => 0,
        }
    }
}

/// A JSON reply arrived but is not the expected success shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    /// The node set an `"error"` field.
    #[error("Node error: {0}")]
    Node(String),

    /// Field present but unparseable, or reply not an object.
    #[error("Malformed reply: {0}")]
    Malformed(String),

    /// Required field absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// Invalid arguments to the request builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Threshold or balance failed the amount decode contract.
    #[error("Invalid amount: {0}")]
    Amount(#[from] AmountError),

    /// Address, link or signing failure.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),
}

/// Connection configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// URL missing or not http(s).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Zero timeout.
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}
