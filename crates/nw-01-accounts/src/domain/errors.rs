//! # Domain Errors
//!
//! Error types for accounts, addresses and blocks.

use super::block::BlockSubtype;
use shared_crypto::CryptoError;
use shared_types::NumberError;
use thiserror::Error;

/// Account error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Malformed address, key or block field.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Address payload decoded but the checksum does not match the key.
    #[error("Address checksum mismatch")]
    ChecksumMismatch,

    /// Signing requested on an account built from an address.
    #[error("Account has no private key")]
    NoPrivateKey,

    /// Link does not fit the block subtype.
    #[error("Invalid link for {subtype} block: {reason}")]
    InvalidLink {
        /// Subtype being built
        subtype: BlockSubtype,
        /// What was wrong
        reason: String,
    },

    /// Signature or key rejected by the curve library.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl From<NumberError> for AccountError {
    fn from(err: NumberError) -> Self {
        AccountError::InvalidEncoding(err.to_string())
    }
}
