//! # Domain Errors
//!
//! Every failed transfer carries a message and a numeric code. Codes are
//! grouped by category so callers can branch on the class of failure:
//!
//! | Range | Category | Raised |
//! |-------|----------|--------|
//! | 1xx | Validation | before any request is sent |
//! | 2xx | Protocol | node error or unusable reply |
//! | 3xx | Transport | no reply |
//! | 4xx | State | busy, hash mismatch, stray reply |

use nw_01_accounts::AccountError;
use nw_02_node_rpc::{ReplyError, TransportError};
use serde::{Deserialize, Serialize};
use shared_types::{AmountError, BlockHash};
use std::fmt;
use thiserror::Error;

/// Transfer error codes.
pub mod codes {
    // Validation (1xx)
    /// Acting account cannot sign.
    pub const NO_PRIVATE_KEY: i32 = 101;
    /// Destination or source block not known.
    pub const MISSING_COUNTERPARTY: i32 = 102;
    /// Zero amount, or balance arithmetic out of range.
    pub const INVALID_AMOUNT: i32 = 103;
    /// Invalid transfer configuration.
    pub const INVALID_CONFIG: i32 = 104;
    /// Block could not be built or signed.
    pub const BLOCK_CREATION: i32 = 105;

    // Protocol (2xx)
    /// Node reported an error.
    pub const NODE_ERROR: i32 = 201;
    /// Reply field unparseable.
    pub const MALFORMED_REPLY: i32 = 202;
    /// Reply field absent.
    pub const MISSING_FIELD: i32 = 203;
    /// Account state does not allow the operation.
    pub const UNEXPECTED_ACCOUNT_STATE: i32 = 204;

    // Transport (3xx)
    /// Request failed below the protocol.
    pub const TRANSPORT: i32 = 301;
    /// No reply within the configured timeout.
    pub const TIMEOUT: i32 = 302;

    // State (4xx)
    /// An operation is already in flight.
    pub const BUSY: i32 = 401;
    /// Node hash differs from the local block hash.
    pub const HASH_MISMATCH: i32 = 402;
    /// Reply arrived with nothing in flight.
    pub const NOT_IN_FLIGHT: i32 = 403;
}

/// Failure class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Bad input; nothing was sent.
    Validation,
    /// The node answered, but not with what the flow needs.
    Protocol,
    /// The node did not answer.
    Transport,
    /// The state machine refused or detected an inconsistency.
    State,
}

/// The RPC leg a failure happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// `account_info`
    AccountInfo,
    /// `work_generate`
    WorkGenerate,
    /// `process`
    Process,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::AccountInfo => "account info",
            Stage::WorkGenerate => "work generate",
            Stage::Process => "process",
        })
    }
}

/// Transfer configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Default representative is not a valid address.
    #[error("Invalid default representative: {0}")]
    InvalidRepresentative(String),

    /// Difficulty is not 16 hex digits.
    #[error("Invalid work difficulty: {0}")]
    InvalidDifficulty(String),

    /// Zero timeout.
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}

/// Transfer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Acting account has no private key.
    #[error("Account {account} has no private key")]
    NoPrivateKey {
        /// Acting account address
        account: String,
    },

    /// Destination or source not set.
    #[error("Missing counterparty: {0}")]
    MissingCounterparty(&'static str),

    /// Amount rejected.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Configuration rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Block could not be built.
    #[error("Block creation failed: {0}")]
    Block(#[from] AccountError),

    /// Node set the `error` field.
    #[error("Error on {stage} call: {message}")]
    Node {
        /// Failing leg
        stage: Stage,
        /// Node message
        message: String,
    },

    /// Reply could not be parsed.
    #[error("Malformed {stage} reply: {message}")]
    MalformedReply {
        /// Failing leg
        stage: Stage,
        /// Parse failure
        message: String,
    },

    /// Required reply field absent.
    #[error("Missing field {field} in {stage} reply")]
    MissingField {
        /// Failing leg
        stage: Stage,
        /// Field name
        field: &'static str,
    },

    /// Account cannot perform the operation in its current state.
    #[error("Unexpected account state: {0}")]
    UnexpectedAccountState(String),

    /// Transport failure.
    #[error("Could not communicate with node during {stage}: {source}")]
    Transport {
        /// Failing leg
        stage: Stage,
        /// Underlying failure
        source: TransportError,
    },

    /// No reply in time.
    #[error("Timed out waiting for {stage} reply")]
    Timeout {
        /// Failing leg
        stage: Stage,
    },

    /// Operation already in flight.
    #[error("Already in use, state is {state}")]
    Busy {
        /// Current phase
        state: &'static str,
    },

    /// Node hash differs from the local one.
    #[error("Hash mismatch in {stage}: expected {expected}, node returned {actual}")]
    HashMismatch {
        /// Failing leg
        stage: Stage,
        /// Locally computed
        expected: BlockHash,
        /// Returned by the node
        actual: BlockHash,
    },

    /// Reply delivered while idle.
    #[error("Reply received with no operation in flight")]
    NotInFlight,
}

impl TransferError {
    /// Map a reply parsing failure at `stage`.
    pub fn from_reply(stage: Stage, err: ReplyError) -> Self {
        match err {
            ReplyError::Node(message) => TransferError::Node { stage, message },
            ReplyError::Malformed(message) => TransferError::MalformedReply { stage, message },
            ReplyError::MissingField(field) => TransferError::MissingField { stage, field },
        }
    }

    /// Map a transport failure at `stage`.
    pub fn from_transport(stage: Stage, source: TransportError) -> Self {
        TransferError::Transport { stage, source }
    }

    /// Numeric code.
    pub fn code(&self) -> i32 {
        match self {
            TransferError::NoPrivateKey { .. } => codes::NO_PRIVATE_KEY,
            TransferError::MissingCounterparty(_) => codes::MISSING_COUNTERPARTY,
            TransferError::InvalidAmount(_) => codes::INVALID_AMOUNT,
            TransferError::Config(_) => codes::INVALID_CONFIG,
            TransferError::Block(_) => codes::BLOCK_CREATION,
            TransferError::Node { .. } => codes::NODE_ERROR,
            TransferError::MalformedReply { .. } => codes::MALFORMED_REPLY,
            TransferError::MissingField { .. } => codes::MISSING_FIELD,
            TransferError::UnexpectedAccountState(_) => codes::UNEXPECTED_ACCOUNT_STATE,
            TransferError::Transport { .. } => codes::TRANSPORT,
            TransferError::Timeout { .. } => codes::TIMEOUT,
            TransferError::Busy { .. } => codes::BUSY,
            TransferError::HashMismatch { .. } => codes::HASH_MISMATCH,
            TransferError::NotInFlight => codes::NOT_IN_FLIGHT,
        }
    }

    /// Failure class.
    pub fn category(&self) -> ErrorCategory {
        match self.code() / 100 {
            1 => ErrorCategory::Validation,
            2 => ErrorCategory::Protocol,
            3 => ErrorCategory::Transport,
            _ => ErrorCategory::State,
        }
    }

    /// Leg the failure happened in, for failures after the flow started.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            TransferError::Node { stage, .. }
            | TransferError::MalformedReply { stage, .. }
            | TransferError::MissingField { stage, .. }
            | TransferError::Transport { stage, .. }
            | TransferError::Timeout { stage }
            | TransferError::HashMismatch { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl From<AmountError> for TransferError {
    fn from(err: AmountError) -> Self {
        TransferError::InvalidAmount(err.to_string())
    }
}
