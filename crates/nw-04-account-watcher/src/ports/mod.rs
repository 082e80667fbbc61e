//! Ports layer for the account watcher.

pub mod outbound;

pub use outbound::{MockPushChannel, PushChannel};
