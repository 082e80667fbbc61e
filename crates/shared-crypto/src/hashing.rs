//! # BLAKE2b Hashing
//!
//! Every digest in the protocol is BLAKE2b with an explicit output size:
//!
//! | Output | Use |
//! |--------|-----|
//! | 5 bytes | address checksum |
//! | 32 bytes | key derivation, block hashes |
//! | 64 bytes | Ed25519 internal hash |
//!
//! The output size is part of the BLAKE2b parameter block, so a 32-byte
//! digest is not a truncated 64-byte digest.

use blake2::digest::consts::{U32, U5};
use blake2::{Blake2b, Digest};

/// BLAKE2b with a 32-byte output.
pub type Blake2b256 = Blake2b<U32>;

/// BLAKE2b with a 64-byte output.
pub use blake2::Blake2b512;

type Blake2b40 = Blake2b<U5>;

/// 256-bit digest.
pub type Hash = [u8; 32];

/// Stateful 256-bit BLAKE2b hasher.
#[derive(Clone, Default)]
pub struct Blake2bHasher {
    inner: Blake2b256,
}

impl Blake2bHasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Blake2b256::new(),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        Digest::update(&mut self.inner, data);
        self
    }

    /// Finalize and return hash, resetting the hasher.
    pub fn finalize(&mut self) -> Hash {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.finalize_reset());
        out
    }
}

/// Hash data to 32 bytes (one-shot).
pub fn blake2b_256(data: &[u8]) -> Hash {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Blake2b256::digest(data));
    out
}

/// Hash the concatenation of several inputs to 32 bytes.
pub fn blake2b_256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Blake2bHasher::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize()
}

/// 5-byte digest used for address checksums.
pub fn blake2b_40(data: &[u8]) -> [u8; 5] {
    let mut out = [0u8; 5];
    out.copy_from_slice(&Blake2b40::digest(data));
    out
}
