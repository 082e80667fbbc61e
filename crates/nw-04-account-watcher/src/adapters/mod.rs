//! Adapters layer for the account watcher.

pub mod websocket;

pub use websocket::WsPushChannel;
