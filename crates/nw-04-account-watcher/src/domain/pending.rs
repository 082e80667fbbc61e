//! Receives waiting for a free receiver.

use super::watch_list::normalize_address;
use nw_01_accounts::Account;
use shared_types::{Amount, BlockHash};
use std::collections::VecDeque;

/// A confirmed send to a watched account, not yet received.
#[derive(Clone, Debug)]
pub struct PendingReceive {
    /// Receiving account, with its private key.
    pub account: Account,
    /// Hash of the send block.
    pub hash: BlockHash,
    /// Amount sent.
    pub amount: Amount,
}

impl PendingReceive {
    /// Receiving address in `nano_` form.
    pub fn address(&self) -> String {
        normalize_address(self.account.address())
    }
}

/// FIFO of pending receives.
///
/// [`pop_next`](Self::pop_next) skips entries whose account is already being
/// received into, so two receives never race on the same frontier.
#[derive(Debug, Default)]
pub struct PendingReceiveQueue {
    entries: VecDeque<PendingReceive>,
}

impl PendingReceiveQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append. A hash already queued is ignored and `false` returned.
    pub fn push(&mut self, entry: PendingReceive) -> bool {
        if self.contains(&entry.hash) {
            return false;
        }
        self.entries.push_back(entry);
        true
    }

    /// Remove the oldest entry whose address satisfies `is_idle`.
    pub fn pop_next(&mut self, is_idle: impl Fn(&str) -> bool) -> Option<PendingReceive> {
        let position = self
            .entries
            .iter()
            .position(|entry| is_idle(&entry.address()))?;
        self.entries.remove(position)
    }

    /// True if the send block is queued.
    pub fn contains(&self, hash: &BlockHash) -> bool {
        self.entries.iter().any(|entry| entry.hash == *hash)
    }

    /// Drop every entry for `address`. Returns how many were dropped.
    pub fn remove_account(&mut self, address: &str) -> usize {
        let address = normalize_address(address);
        let before = self.entries.len();
        self.entries.retain(|entry| entry.address() != address);
        before - self.entries.len()
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
