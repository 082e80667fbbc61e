//! # Nano Wallet Test Suite
//!
//! Cross-subsystem tests and benchmarks.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── wallet_benchmarks.rs   # Key derivation, hashing, signing, codecs
//! └── src/
//!     └── integration/
//!         ├── ledger.rs          # In-memory node answering the wallet RPC
//!         ├── vectors.rs         # Known-answer checks across crates
//!         └── flows.rs           # Send → confirmation → auto-receive
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p nw-tests
//!
//! # By category
//! cargo test -p nw-tests integration::flows::
//! cargo test -p nw-tests integration::vectors::
//!
//! # Benchmarks
//! cargo bench -p nw-tests
//! ```

pub mod integration;
