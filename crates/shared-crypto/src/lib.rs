//! # Shared Crypto - Wallet Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | BLAKE2b (40/256/512-bit) | Checksums, block hashes |
//! | `derivation` | BLAKE2b-256(seed, index) | Deterministic account keys |
//! | `signatures` | Ed25519 over BLAKE2b-512 | Block signing |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency at signing time
//! - **Key material**: `RawKey` and expanded scalars are zeroized on drop
//! - **Seeds**: drawn from the operating system RNG

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod derivation;
pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use derivation::{deterministic_key, generate_seed};
pub use errors::CryptoError;
pub use hashing::{blake2b_256, blake2b_256_many, blake2b_40, Blake2bHasher};
pub use signatures::{derive_public_key, verify, Ed25519KeyPair};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
