//! # Domain Module
//!
//! Accounts, state blocks and their errors.

pub mod account;
pub mod block;
pub mod errors;

pub use account::Account;
pub use block::{BlockSubtype, Link, StateBlock, Work, STATE_BLOCK_TYPE_NAME};
pub use errors::AccountError;
