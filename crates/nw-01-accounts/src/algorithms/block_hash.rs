//! # State Block Hash
//!
//! BLAKE2b-256 over a fixed 176-byte preimage:
//!
//! | Field | Bytes |
//! |-------|-------|
//! | preamble (`6`, big-endian) | 32 |
//! | account public key | 32 |
//! | previous block hash | 32 |
//! | representative public key | 32 |
//! | balance (raw, big-endian) | 16 |
//! | link | 32 |

use shared_crypto::Blake2bHasher;
use shared_types::{Amount, BlockHash, PublicKey, Uint256};

/// Block type tag for state blocks.
pub const STATE_BLOCK_TYPE: u8 = 6;

/// First 32 bytes of every state block preimage.
pub const STATE_BLOCK_PREAMBLE: [u8; 32] = {
    let mut preamble = [0u8; 32];
    preamble[31] = STATE_BLOCK_TYPE;
    preamble
};

/// Total preimage length.
pub const STATE_BLOCK_PREIMAGE_LEN: usize = 32 * 5 + 16;

/// Hash the fields of a state block.
pub fn state_block_hash(
    account: &PublicKey,
    previous: &BlockHash,
    representative: &PublicKey,
    balance: &Amount,
    link: &Uint256,
) -> BlockHash {
    let mut hasher = Blake2bHasher::new();
    hasher
        .update(&STATE_BLOCK_PREAMBLE)
        .update(account.as_bytes())
        .update(previous.as_bytes())
        .update(representative.as_bytes())
        .update(&balance.to_be_bytes())
        .update(link.as_bytes());
    BlockHash::from_bytes(hasher.finalize())
}
