//! # Transfer State
//!
//! ```text
//! Ready ──start──> AwaitingAccountInfo ──> AwaitingWork ──> AwaitingProcess ──> Ready
//!   ^                     │                     │                  │
//!   └──────── any failure or cancel ────────────┴──────────────────┘
//! ```

use nw_01_accounts::{Account, BlockSubtype, StateBlock};
use serde::{Deserialize, Serialize};
use shared_types::{Amount, BlockHash, PublicKey};
use std::fmt;
use uuid::Uuid;

/// What a transfer does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferKind {
    /// Move `amount` to `destination`.
    Send {
        /// Destination account key
        destination: PublicKey,
        /// Amount sent
        amount: Amount,
    },
    /// Pocket the send block `source`.
    Receive {
        /// Hash of the send block
        source: BlockHash,
        /// Amount carried by the send
        amount: Amount,
    },
}

impl TransferKind {
    /// `"send"` or `"receive"`.
    pub fn name(&self) -> &'static str {
        match self {
            TransferKind::Send { .. } => "send",
            TransferKind::Receive { .. } => "receive",
        }
    }

    /// Amount moved.
    pub fn amount(&self) -> Amount {
        match self {
            TransferKind::Send { amount, .. } | TransferKind::Receive { amount, .. } => *amount,
        }
    }
}

/// An operation in flight.
#[derive(Clone, Debug)]
pub struct Operation {
    /// Correlation id for logs and outcomes.
    pub id: Uuid,
    /// Acting account (holds the private key).
    pub account: Account,
    /// What is being done.
    pub kind: TransferKind,
}

/// Machine state. Each waiting state carries the work done so far.
#[derive(Clone, Debug, Default)]
pub enum TransferState {
    /// Idle.
    #[default]
    Ready,
    /// `account_info` sent.
    AwaitingAccountInfo {
        /// Operation
        operation: Operation,
    },
    /// Block signed, `work_generate` sent.
    AwaitingWork {
        /// Operation
        operation: Operation,
        /// Signed block without work
        block: StateBlock,
    },
    /// `process` sent.
    AwaitingProcess {
        /// Operation
        operation: Operation,
        /// Subtype submitted
        subtype: BlockSubtype,
        /// Locally computed hash
        hash: BlockHash,
        /// Balance after the block
        balance: Amount,
    },
}

impl TransferState {
    /// Phase without payload.
    pub fn phase(&self) -> TransferPhase {
        match self {
            TransferState::Ready => TransferPhase::Ready,
            TransferState::AwaitingAccountInfo { .. } => TransferPhase::Account,
            TransferState::AwaitingWork { .. } => TransferPhase::Work,
            TransferState::AwaitingProcess { .. } => TransferPhase::Process,
        }
    }

    /// Operation in flight, if any.
    pub fn operation(&self) -> Option<&Operation> {
        match self {
            TransferState::Ready => None,
            TransferState::AwaitingAccountInfo { operation }
            | TransferState::AwaitingWork { operation, .. }
            | TransferState::AwaitingProcess { operation, .. } => Some(operation),
        }
    }
}

/// Payload-free view of [`TransferState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferPhase {
    /// Idle
    Ready,
    /// Waiting for `account_info`
    Account,
    /// Waiting for `work_generate`
    Work,
    /// Waiting for `process`
    Process,
}

impl TransferPhase {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferPhase::Ready => "ready",
            TransferPhase::Account => "account",
            TransferPhase::Work => "work",
            TransferPhase::Process => "process",
        }
    }
}

impl fmt::Display for TransferPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransferOutcome {
    /// Operation id
    pub id: Uuid,
    /// Acting account address
    pub account: String,
    /// Subtype of the published block
    pub subtype: BlockSubtype,
    /// Hash reported by `process`
    pub hash: BlockHash,
    /// Balance after the block
    pub balance: Amount,
}
