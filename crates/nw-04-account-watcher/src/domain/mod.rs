//! Domain layer for the account watcher.

pub mod config;
pub mod errors;
pub mod events;
pub mod messages;
pub mod pending;
pub mod watch_list;

pub use config::{ChannelConfig, WatcherConfig};
pub use errors::{ConfigError, WatcherError};
pub use events::{ChannelEvent, WatcherEvent};
pub use messages::{
    Confirmation, InboundMessage, OutboundMessage, SubscribeOptions, UpdateOptions,
    CONFIRMATION_TOPIC,
};
pub use pending::{PendingReceive, PendingReceiveQueue};
pub use watch_list::{normalize_address, WatchList};
