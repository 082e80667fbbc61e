//! # Deterministic Key Derivation
//!
//! `private_key = BLAKE2b-256(seed || index_be32)`

use crate::hashing::Blake2bHasher;
use crate::CryptoError;
use rand::rngs::OsRng;
use rand::RngCore;
use shared_types::RawKey;
use zeroize::Zeroize;

/// Derive the private key at `index` from a 32-byte seed.
pub fn deterministic_key(seed: &RawKey, index: u32) -> RawKey {
    let mut hasher = Blake2bHasher::new();
    hasher.update(seed.as_bytes()).update(&index.to_be_bytes());
    let mut out = hasher.finalize();
    let key = RawKey::from_bytes(out);
    out.zeroize();
    key
}

/// Generate a fresh random seed from the operating system RNG.
pub fn generate_seed() -> Result<RawKey, CryptoError> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;
    let seed = RawKey::from_bytes(bytes);
    bytes.zeroize();
    Ok(seed)
}
