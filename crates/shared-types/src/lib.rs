//! # Shared Types Crate
//!
//! Fixed-width integers and balances used by every wallet subsystem.
//!
//! ## Contents
//!
//! | Module | Types |
//! |--------|-------|
//! | `numbers` | `Uint128`, `Uint256`, `Uint512`, `RawKey` and the `BlockHash`/`PublicKey`/`Signature` aliases |
//! | `amount` | `Amount` (raw units, display scaling by 10^30) |
//! | `errors` | `NumberError`, `AmountError` |
//!
//! ## Design Principles
//!
//! - **Fixed width**: values never resize, so hashing preimages are bit-exact.
//! - **Big-endian**: byte order equals numeric order.
//! - **No silent wrap**: balance arithmetic fails on overflow and underflow.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod amount;
pub mod errors;
pub mod numbers;

pub use amount::{
    Amount, DEFAULT_DISPLAY_PLACES, DISPLAY_DECIMALS, GNANO_RATIO, KNANO_RATIO, MNANO_RATIO,
    NANO_RATIO, RAW_RATIO,
};
pub use errors::{AmountError, NumberError};
pub use numbers::{BlockHash, PublicKey, RawKey, Signature, Uint128, Uint256, Uint512};
