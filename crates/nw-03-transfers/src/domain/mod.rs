//! Domain layer for transfers.

pub mod config;
pub mod errors;
pub mod state;

pub use config::{TransferConfig, RECEIVE_WORK_DIFFICULTY};
pub use errors::{codes, ConfigError, ErrorCategory, Stage, TransferError};
pub use state::{Operation, TransferKind, TransferOutcome, TransferPhase, TransferState};
