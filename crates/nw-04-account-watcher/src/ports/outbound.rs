//! # Outbound Ports
//!
//! The push channel carries subscription frames to the node. Inbound frames
//! and connection changes arrive separately as
//! [`ChannelEvent`](crate::domain::ChannelEvent)s.

use crate::domain::WatcherError;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Confirmation feed connection - outbound port.
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Send one text frame.
    async fn send_text(&self, text: String) -> Result<(), WatcherError>;

    /// True while the connection is open.
    fn is_connected(&self) -> bool;
}

#[async_trait]
impl<T: PushChannel + ?Sized> PushChannel for Arc<T> {
    async fn send_text(&self, text: String) -> Result<(), WatcherError> {
        (**self).send_text(text).await
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// Recording push channel for tests.
#[derive(Clone, Debug, Default)]
pub struct MockPushChannel {
    sent: Arc<Mutex<Vec<String>>>,
    connected: Arc<AtomicBool>,
    failing: Arc<AtomicBool>,
}

impl MockPushChannel {
    /// Disconnected channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connected channel.
    pub fn connected() -> Self {
        let channel = Self::default();
        channel.set_connected(true);
        channel
    }

    /// Open or close the connection.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Make every send fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Frames sent so far.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    /// Frames sent so far, parsed.
    pub fn sent_json(&self) -> Vec<Value> {
        self.sent
            .lock()
            .iter()
            .filter_map(|text| serde_json::from_str(text).ok())
            .collect()
    }

    /// `action` of each frame sent so far.
    pub fn sent_actions(&self) -> Vec<String> {
        self.sent_json()
            .iter()
            .map(|frame| frame["action"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    /// Forget sent frames.
    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

#[async_trait]
impl PushChannel for MockPushChannel {
    async fn send_text(&self, text: String) -> Result<(), WatcherError> {
        if !self.is_connected() {
            return Err(WatcherError::NotConnected);
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(WatcherError::Channel("mock send failure".into()));
        }
        self.sent.lock().push(text);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}
