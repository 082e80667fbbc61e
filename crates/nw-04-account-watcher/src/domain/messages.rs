//! # Push Channel Messages
//!
//! Outbound frames:
//!
//! ```text
//! {"action":"subscribe","topic":"confirmation","options":{"accounts":[...]}}
//! {"action":"update","topic":"confirmation","options":{"accounts_add":[...],"accounts_del":[...]}}
//! {"action":"ping"}
//! ```
//!
//! Inbound frames are either an `ack` (reply to any of the above) or a
//! confirmation carrying `message.{account, amount, hash, block}`.

use super::errors::WatcherError;
use serde::Serialize;
use serde_json::Value;
use shared_types::{Amount, BlockHash};

/// The only topic the watcher subscribes to.
pub const CONFIRMATION_TOPIC: &str = "confirmation";

/// Options for a full subscription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubscribeOptions {
    /// Every watched address.
    pub accounts: Vec<String>,
}

/// Options for an incremental change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UpdateOptions {
    /// Newly watched addresses.
    pub accounts_add: Vec<String>,
    /// No longer watched addresses.
    pub accounts_del: Vec<String>,
}

/// A frame sent to the node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Replace the subscription with a full account list.
    Subscribe {
        /// Always `confirmation`
        topic: &'static str,
        /// Accounts
        options: SubscribeOptions,
    },
    /// Add and remove accounts on an existing subscription.
    Update {
        /// Always `confirmation`
        topic: &'static str,
        /// Changes
        options: UpdateOptions,
    },
    /// Keepalive.
    Ping,
}

impl OutboundMessage {
    /// Full subscription.
    pub fn subscribe(accounts: Vec<String>) -> Self {
        OutboundMessage::Subscribe {
            topic: CONFIRMATION_TOPIC,
            options: SubscribeOptions { accounts },
        }
    }

    /// Incremental change.
    pub fn update(accounts_add: Vec<String>, accounts_del: Vec<String>) -> Self {
        OutboundMessage::Update {
            topic: CONFIRMATION_TOPIC,
            options: UpdateOptions {
                accounts_add,
                accounts_del,
            },
        }
    }

    /// `subscribe`, `update` or `ping`.
    pub fn action(&self) -> &'static str {
        match self {
            OutboundMessage::Subscribe { .. } => "subscribe",
            OutboundMessage::Update { .. } => "update",
            OutboundMessage::Ping => "ping",
        }
    }

    /// JSON text frame.
    pub fn to_text(&self) -> Result<String, WatcherError> {
        serde_json::to_string(self).map_err(|e| WatcherError::MalformedMessage(e.to_string()))
    }
}

/// A confirmed block notification.
///
/// Absent fields read as empty strings, which never match a watched
/// account.
#[derive(Clone, Debug, PartialEq)]
pub struct Confirmation {
    /// Account that published the block.
    pub account: String,
    /// Amount moved, raw decimal.
    pub amount: String,
    /// Block hash.
    pub hash: String,
    /// `send`, `receive`, `open`, `change` or `epoch`.
    pub subtype: String,
    /// Link decoded as an account (the destination of a send).
    pub link_as_account: String,
    /// The whole frame, forwarded untouched when not auto-received.
    pub raw: Value,
}

impl Confirmation {
    /// True for send blocks.
    pub fn is_send(&self) -> bool {
        self.subtype == "send"
    }

    /// Send block hash and amount, validated.
    pub fn receivable(&self) -> Result<(BlockHash, Amount), WatcherError> {
        if self.hash.len() != 64 {
            return Err(WatcherError::MalformedMessage(format!(
                "hash must be 64 hex digits, got {:?}",
                self.hash
            )));
        }
        let hash = BlockHash::decode_hex(&self.hash)
            .map_err(|e| WatcherError::MalformedMessage(format!("hash: {e}")))?;
        let amount = Amount::from_raw_str(&self.amount)
            .map_err(|e| WatcherError::MalformedMessage(format!("amount: {e}")))?;
        Ok((hash, amount))
    }
}

/// A frame received from the node.
#[derive(Clone, Debug, PartialEq)]
pub enum InboundMessage {
    /// Acknowledgement of a subscribe, update or ping.
    Ack(String),
    /// Confirmation notification.
    Confirmation(Confirmation),
}

fn text_at<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

impl InboundMessage {
    /// Parse a text frame.
    pub fn parse(text: &str) -> Result<Self, WatcherError> {
        let raw: Value = serde_json::from_str(text)
            .map_err(|e| WatcherError::MalformedMessage(format!("invalid JSON: {e}")))?;
        if !raw.is_object() {
            return Err(WatcherError::MalformedMessage(format!(
                "expected a JSON object, got {raw}"
            )));
        }

        let ack = text_at(&raw, "ack");
        if !ack.is_empty() {
            return Ok(InboundMessage::Ack(ack.to_string()));
        }

        let message = match raw.get("message") {
            Some(message) if message.is_object() => message,
            _ => {
                return Err(WatcherError::MalformedMessage(
                    "frame has neither ack nor message".into(),
                ))
            }
        };
        let block = message.get("block").unwrap_or(&Value::Null);

        Ok(InboundMessage::Confirmation(Confirmation {
            account: text_at(message, "account").to_string(),
            amount: text_at(message, "amount").to_string(),
            hash: text_at(message, "hash").to_string(),
            subtype: text_at(block, "subtype").to_string(),
            link_as_account: text_at(block, "link_as_account").to_string(),
            raw,
        }))
    }
}
