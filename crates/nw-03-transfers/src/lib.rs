//! # NW-03 Transfers
//!
//! Send and receive flows over the node RPC.
//!
//! **Subsystem ID:** 3  
//! **Architecture:** Sans-I/O state machine + async drivers
//!
//! ## Flow
//!
//! ```text
//! READY ──> account_info ──> work_generate ──> process ──> READY
//! ```
//!
//! 1. `account_info`: frontier, balance and representative. A receive into an
//!    account the node has never seen opens it with the default representative.
//! 2. The block is built and signed locally, then `work_generate` is asked for
//!    work on the previous hash (or the account key for an open).
//! 3. `process` publishes the block; its hash must match the local one.
//!
//! Any failure returns the machine to `READY` with a coded [`TransferError`].
//! Nothing is retried.
//!
//! ## Module Structure
//!
//! ```text
//! nw-03-transfers/
//! ├── domain/          # TransferState, TransferConfig, TransferError + codes
//! ├── machine.rs       # TransferMachine (pure, single-flight)
//! └── service.rs       # Sender, Receiver (drive the machine over NodeRpc)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod machine;
pub mod service;

// Re-exports
pub use domain::{
    codes, ConfigError, ErrorCategory, Stage, TransferConfig, TransferError, TransferKind,
    TransferOutcome, TransferPhase, TransferState, RECEIVE_WORK_DIFFICULTY,
};
pub use machine::{Step, TransferMachine};
pub use service::{Receiver, Sender};

/// Value of the `subsystem` log field.
pub const SUBSYSTEM: &str = "nw-03-transfers";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
