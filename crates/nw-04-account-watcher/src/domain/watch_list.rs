//! Watched accounts, keyed by address.

use nw_01_accounts::{Account, ADDRESS_PREFIX, LEGACY_ADDRESS_PREFIX};
use std::collections::HashMap;

/// Addresses compare in their `nano_` form.
pub fn normalize_address(address: &str) -> String {
    match address.strip_prefix(LEGACY_ADDRESS_PREFIX) {
        Some(payload) => format!("{ADDRESS_PREFIX}{payload}"),
        None => address.to_string(),
    }
}

/// Accounts subscribed for confirmations, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct WatchList {
    accounts: HashMap<String, Account>,
    order: Vec<String>,
}

impl WatchList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch `account`. Returns `false` if the address was already watched,
    /// in which case the stored account is replaced (e.g. to add key material).
    pub fn insert(&mut self, account: Account) -> bool {
        let address = normalize_address(account.address());
        if self.accounts.insert(address.clone(), account).is_some() {
            return false;
        }
        self.order.push(address);
        true
    }

    /// Stop watching `address`.
    pub fn remove(&mut self, address: &str) -> Option<Account> {
        let address = normalize_address(address);
        let removed = self.accounts.remove(&address)?;
        self.order.retain(|a| *a != address);
        Some(removed)
    }

    /// Watched account for `address`.
    pub fn get(&self, address: &str) -> Option<&Account> {
        if address.is_empty() {
            return None;
        }
        self.accounts.get(&normalize_address(address))
    }

    /// True if `address` is watched.
    pub fn contains(&self, address: &str) -> bool {
        self.get(address).is_some()
    }

    /// Watched addresses in insertion order.
    pub fn addresses(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Watched accounts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.order.iter().filter_map(|a| self.accounts.get(a))
    }

    /// Number of watched accounts.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing is watched.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
