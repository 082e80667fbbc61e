//! Events into and out of the watcher.

use nw_03_transfers::{TransferError, TransferOutcome};
use serde_json::Value;
use shared_types::BlockHash;

/// What the push channel reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Connection established.
    Connected,
    /// A text frame arrived.
    Frame(String),
    /// Connection closed.
    Closed {
        /// Closed by a close handshake rather than an error.
        was_clean: bool,
    },
}

/// What the watcher reports to its owner.
#[derive(Clone, Debug, PartialEq)]
pub enum WatcherEvent {
    /// A confirmation that was not auto-received, as received.
    ConfirmationReceived(Value),
    /// An auto-receive finished.
    ReceiveCompleted {
        /// Receiving address
        account: String,
        /// Send block that was received
        source: BlockHash,
        /// Outcome; failures carry a message and a code
        result: Result<TransferOutcome, TransferError>,
    },
    /// The push channel closed.
    Disconnected {
        /// Closed by a close handshake rather than an error.
        was_clean: bool,
    },
}
