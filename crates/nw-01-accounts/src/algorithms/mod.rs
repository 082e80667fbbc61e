//! # Algorithms Module
//!
//! Address codec and state block hashing.

pub mod address;
pub mod block_hash;

pub use address::{
    decode_address, encode_address, is_valid_address, ADDRESS_PAYLOAD_CHARS, ADDRESS_PREFIX,
    LEGACY_ADDRESS_PREFIX,
};
pub use block_hash::{
    state_block_hash, STATE_BLOCK_PREAMBLE, STATE_BLOCK_PREIMAGE_LEN, STATE_BLOCK_TYPE,
};
