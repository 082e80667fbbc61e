//! # Address Codec
//!
//! An address is a prefix followed by 60 base32 characters:
//!
//! ```text
//! nano_ | 52 chars: 4 zero bits + 256-bit public key | 8 chars: 40-bit checksum
//! ```
//!
//! The checksum is BLAKE2b-40 of the public key with its bytes reversed.
//! Decoding accepts the legacy `xrb_` prefix as well.

use crate::domain::AccountError;
use shared_crypto::blake2b_40;
use shared_types::PublicKey;

/// Prefix emitted by [`encode_address`].
pub const ADDRESS_PREFIX: &str = "nano_";

/// Legacy prefix accepted by [`decode_address`].
pub const LEGACY_ADDRESS_PREFIX: &str = "xrb_";

/// Encoded characters after the prefix.
pub const ADDRESS_PAYLOAD_CHARS: usize = 60;

const KEY_CHARS: usize = 52;
const CHECKSUM_CHARS: usize = 8;
const CHECKSUM_BYTES: usize = 5;

/// Base32 alphabet. No `0`, `2`, `l` or `v`.
const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

const INVALID: u8 = 0xFF;

const fn build_reverse() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Inverse of [`ALPHABET`]; `INVALID` for characters outside it.
const REVERSE: [u8; 256] = build_reverse();

/// Encode a public key as a `nano_` address.
pub fn encode_address(public_key: &PublicKey) -> String {
    let mut out = String::with_capacity(ADDRESS_PREFIX.len() + ADDRESS_PAYLOAD_CHARS);
    out.push_str(ADDRESS_PREFIX);
    push_base32(public_key.as_bytes(), KEY_CHARS, &mut out);
    push_base32(&checksum(public_key), CHECKSUM_CHARS, &mut out);
    out
}

/// Decode a `nano_` or `xrb_` address into its public key.
pub fn decode_address(text: &str) -> Result<PublicKey, AccountError> {
    let payload = text
        .strip_prefix(ADDRESS_PREFIX)
        .or_else(|| text.strip_prefix(LEGACY_ADDRESS_PREFIX))
        .ok_or_else(|| AccountError::InvalidEncoding(format!("unknown address prefix: {text}")))?;

    if payload.len() != ADDRESS_PAYLOAD_CHARS {
        return Err(AccountError::InvalidEncoding(format!(
            "address payload has {} characters, expected {ADDRESS_PAYLOAD_CHARS}",
            payload.len()
        )));
    }

    let bytes = payload.as_bytes();
    // '1' and '3' are the only leading values that keep the top 4 bits zero.
    if bytes[0] != b'1' && bytes[0] != b'3' {
        return Err(AccountError::InvalidEncoding(format!(
            "address must start with '1' or '3' after the prefix, found {:?}",
            char::from(bytes[0])
        )));
    }

    // 300 bits, of which the leading 4 are padding: 37 bytes of key + checksum
    let mut decoded = [0u8; 32 + CHECKSUM_BYTES];
    let mut bit = 0usize;
    for &c in bytes {
        let value = REVERSE[c as usize];
        if value == INVALID {
            return Err(AccountError::InvalidEncoding(format!(
                "invalid address character {:?}",
                char::from(c)
            )));
        }
        for shift in (0..5).rev() {
            if bit >= 4 && (value >> shift) & 1 == 1 {
                let pos = bit - 4;
                decoded[pos / 8] |= 0x80 >> (pos % 8);
            }
            bit += 1;
        }
    }

    let mut key = [0u8; 32];
    key.copy_from_slice(&decoded[..32]);
    let public_key = PublicKey::from_bytes(key);

    if decoded[32..] != checksum(&public_key) {
        return Err(AccountError::ChecksumMismatch);
    }
    Ok(public_key)
}

/// True when `text` decodes to a valid public key.
pub fn is_valid_address(text: &str) -> bool {
    decode_address(text).is_ok()
}

fn checksum(public_key: &PublicKey) -> [u8; CHECKSUM_BYTES] {
    let mut digest = blake2b_40(public_key.as_bytes());
    digest.reverse();
    digest
}

/// Emit `chars` 5-bit groups of `bytes`, most significant first, with zero
/// padding above the top byte.
fn push_base32(bytes: &[u8], chars: usize, out: &mut String) {
    let pad = chars * 5 - bytes.len() * 8;
    for i in 0..chars {
        let mut value = 0usize;
        for b in 0..5 {
            let pos = i * 5 + b;
            let bit = if pos < pad {
                0
            } else {
                let p = pos - pad;
                (bytes[p / 8] >> (7 - p % 8)) & 1
            };
            value = (value << 1) | bit as usize;
        }
        out.push(char::from(ALPHABET[value]));
    }
}
