//! # NW-04 Account Watcher
//!
//! Subscribes to confirmations for a set of accounts over the node's push
//! channel and receives incoming sends automatically.
//!
//! **Subsystem ID:** 4  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Behaviour
//!
//! - Watch list changes become a full `subscribe` on first contact and
//!   `update` frames afterwards. Every (re)connect re-subscribes.
//! - A `ping` is sent every `keepalive_interval` while connected.
//! - A confirmed send whose destination is watched and holds a private key is
//!   queued and handed to a pooled [`Receiver`](nw_03_transfers::Receiver).
//!   Receives for the same account never overlap.
//! - Anything else is forwarded as [`WatcherEvent::ConfirmationReceived`].
//!
//! ## Module Structure
//!
//! ```text
//! nw-04-account-watcher/
//! ├── domain/          # WatchList, PendingReceiveQueue, messages, events, config
//! ├── pool.rs          # ReceiverPool (free list, lazy growth)
//! ├── ports/           # PushChannel, MockPushChannel
//! ├── adapters/        # WsPushChannel (tokio-tungstenite)
//! └── service.rs       # AccountWatcher
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod pool;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::WsPushChannel;
pub use domain::{
    ChannelConfig, ChannelEvent, ConfigError, Confirmation, InboundMessage, OutboundMessage,
    PendingReceive, PendingReceiveQueue, WatchList, WatcherConfig, WatcherError, WatcherEvent,
};
pub use pool::{PooledReceiver, ReceiverPool};
pub use ports::{MockPushChannel, PushChannel};
pub use service::AccountWatcher;

/// Value of the `subsystem` log field.
pub const SUBSYSTEM: &str = "nw-04-account-watcher";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
