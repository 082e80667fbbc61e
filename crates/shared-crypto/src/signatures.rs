//! # Ed25519 Signatures over BLAKE2b
//!
//! Standard Ed25519 with BLAKE2b-512 in every place the reference scheme
//! uses SHA-512: secret key expansion, nonce derivation and the challenge.
//!
//! ## Security Properties
//!
//! - Deterministic nonces (no RNG at signing time)
//! - Expanded secret material is zeroized on drop
//! - Signatures are 64 bytes: `R || S`

use crate::hashing::Blake2b512;
use crate::CryptoError;
use blake2::Digest;
use ed25519_dalek::hazmat::{raw_sign, raw_verify, ExpandedSecretKey};
use ed25519_dalek::VerifyingKey;
use shared_types::{PublicKey, RawKey, Signature};
use zeroize::Zeroize;

/// Ed25519 keypair whose secret scalar is expanded with BLAKE2b-512.
pub struct Ed25519KeyPair {
    expanded: ExpandedSecretKey,
    verifying_key: VerifyingKey,
}

impl Ed25519KeyPair {
    /// Expand a 32-byte private key into a signing keypair.
    pub fn from_private_key(private_key: &RawKey) -> Self {
        let mut digest = [0u8; 64];
        digest.copy_from_slice(&Blake2b512::digest(private_key.as_bytes()));
        let expanded = ExpandedSecretKey::from_bytes(&digest);
        digest.zeroize();
        let verifying_key = VerifyingKey::from(&expanded);
        Self {
            expanded,
            verifying_key,
        }
    }

    /// Public key (compressed Edwards point).
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_bytes(self.verifying_key.to_bytes())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let sig = raw_sign::<Blake2b512>(&self.expanded, message, &self.verifying_key);
        Signature::from_bytes(sig.to_bytes())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Derive the public key for a private key.
pub fn derive_public_key(private_key: &RawKey) -> PublicKey {
    Ed25519KeyPair::from_private_key(private_key).public_key()
}

/// Verify a signature against a public key.
pub fn verify(
    public_key: &PublicKey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), CryptoError> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key.as_bytes()).map_err(|_| CryptoError::InvalidPublicKey)?;
    let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());

    raw_verify::<Blake2b512>(&verifying_key, message, &sig)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}
