//! # NW-01 Accounts
//!
//! Deterministic accounts and the blocks they sign.
//!
//! **Subsystem ID:** 1  
//! **Architecture:** Domain + algorithms (no I/O)
//!
//! ## Purpose
//!
//! - Derive keypairs from a seed and index: `BLAKE2b-256(seed || index_be32)`
//! - Encode and decode checksummed `nano_` addresses
//! - Hash and sign state blocks
//!
//! ## Module Structure
//!
//! ```text
//! nw-01-accounts/
//! ├── domain/          # Account, StateBlock, BlockSubtype, Link, Work, errors
//! └── algorithms/      # Base32 address codec, block hash preimage
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;

// Re-exports
pub use algorithms::{
    decode_address, encode_address, is_valid_address, state_block_hash, ADDRESS_PREFIX,
    LEGACY_ADDRESS_PREFIX,
};
pub use domain::{Account, AccountError, BlockSubtype, Link, StateBlock, Work};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
