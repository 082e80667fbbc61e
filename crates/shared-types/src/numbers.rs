//! # Fixed-Width Integers
//!
//! Byte-array backed 128/256/512-bit unsigned integers. The numeric value is
//! big-endian, so lexicographic byte ordering equals numeric ordering.
//!
//! Word views (`as_u32_words_be`, `as_u64_words_be`) are computed on demand;
//! storage is always the plain byte array.
//!
//! ## Codecs
//!
//! | Codec | Max digits (128/256/512) | Notes |
//! |-------|--------------------------|-------|
//! | hex | 32 / 64 / 128 | case-insensitive in, uppercase out, full width |
//! | decimal | 39 / 78 / 155 | rejects values wider than the type |

use crate::errors::NumberError;
use primitive_types::{U128, U256, U512};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{BitXor, BitXorAssign};
use std::str::FromStr;
use zeroize::Zeroize;

/// Check a numeral before handing it to a codec.
///
/// Rejects empty input, a leading `-`, input longer than `max_digits` and
/// any character outside the radix. Nothing is trimmed, so trailing garbage
/// after a valid numeral is rejected too.
fn validate_numeral(text: &str, max_digits: usize, radix: u32) -> Result<(), NumberError> {
    if text.is_empty() {
        return Err(NumberError::InvalidEncoding("empty input".into()));
    }
    if text.starts_with('-') {
        return Err(NumberError::InvalidEncoding(format!(
            "negative value: {text}"
        )));
    }
    if text.len() > max_digits {
        return Err(NumberError::InvalidEncoding(format!(
            "{} digits exceeds maximum of {max_digits}",
            text.len()
        )));
    }
    if let Some(bad) = text.chars().find(|c| !c.is_digit(radix)) {
        return Err(NumberError::InvalidEncoding(format!(
            "unexpected character {bad:?} for base {radix}"
        )));
    }
    Ok(())
}

macro_rules! fixed_width {
    ($(#[$meta:meta])* $name:ident, $width:expr, $number:ty, $max_dec:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroize)]
        pub struct $name([u8; $width]);

        impl $name {
            /// Width in bytes.
            pub const WIDTH: usize = $width;
            /// Maximum number of hex digits accepted by `decode_hex`.
            pub const MAX_HEX_DIGITS: usize = $width * 2;
            /// Maximum number of decimal digits accepted by `decode_dec`.
            pub const MAX_DEC_DIGITS: usize = $max_dec;

            /// All-zero value.
            pub const fn zero() -> Self {
                Self([0u8; $width])
            }

            /// Wrap big-endian bytes.
            pub const fn from_bytes(bytes: [u8; $width]) -> Self {
                Self(bytes)
            }

            /// Copy from a slice that must be exactly `WIDTH` bytes long.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, NumberError> {
                let array: [u8; $width] =
                    bytes.try_into().map_err(|_| NumberError::InvalidLength {
                        expected: $width,
                        actual: bytes.len(),
                    })?;
                Ok(Self(array))
            }

            /// Build from the numeric value.
            pub fn from_number(number: $number) -> Self {
                let mut bytes = [0u8; $width];
                number.to_big_endian(&mut bytes);
                Self(bytes)
            }

            /// Numeric value.
            pub fn number(&self) -> $number {
                <$number>::from_big_endian(&self.0)
            }

            /// Raw big-endian bytes.
            pub fn as_bytes(&self) -> &[u8; $width] {
                &self.0
            }

            /// Consume into raw bytes.
            pub fn into_bytes(self) -> [u8; $width] {
                self.0
            }

            /// Big-endian 32-bit word view.
            pub fn as_u32_words_be(&self) -> [u32; $width / 4] {
                let mut words = [0u32; $width / 4];
                for (word, chunk) in words.iter_mut().zip(self.0.chunks_exact(4)) {
                    *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                }
                words
            }

            /// Big-endian 64-bit word view.
            pub fn as_u64_words_be(&self) -> [u64; $width / 8] {
                let mut words = [0u64; $width / 8];
                for (word, chunk) in words.iter_mut().zip(self.0.chunks_exact(8)) {
                    let mut buf = [0u8; 8];
                    buf.copy_from_slice(chunk);
                    *word = u64::from_be_bytes(buf);
                }
                words
            }

            /// Decode a hex numeral. Shorter input is left-padded with zeros.
            pub fn decode_hex(text: &str) -> Result<Self, NumberError> {
                validate_numeral(text, Self::MAX_HEX_DIGITS, 16)?;
                let padded = format!("{:0>width$}", text, width = Self::MAX_HEX_DIGITS);
                let mut bytes = [0u8; $width];
                hex::decode_to_slice(padded, &mut bytes)
                    .map_err(|e| NumberError::InvalidEncoding(e.to_string()))?;
                Ok(Self(bytes))
            }

            /// Full-width uppercase hex.
            pub fn encode_hex(&self) -> String {
                hex::encode_upper(self.0)
            }

            /// Decode a base-10 numeral.
            pub fn decode_dec(text: &str) -> Result<Self, NumberError> {
                validate_numeral(text, Self::MAX_DEC_DIGITS, 10)?;
                let number = <$number>::from_dec_str(text).map_err(|_| {
                    NumberError::InvalidEncoding(format!(
                        "{text} exceeds the {}-bit range",
                        $width * 8
                    ))
                })?;
                Ok(Self::from_number(number))
            }

            /// Base-10 numeral without leading zeros.
            pub fn encode_dec(&self) -> String {
                self.number().to_string()
            }

            /// True when every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }

            /// Zero all bytes.
            pub fn clear(&mut self) {
                self.0.zeroize();
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self::from_number(<$number>::from(value))
            }
        }

        impl From<[u8; $width]> for $name {
            fn from(bytes: [u8; $width]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl BitXor for $name {
            type Output = Self;

            fn bitxor(mut self, rhs: Self) -> Self {
                self ^= rhs;
                self
            }
        }

        impl BitXorAssign for $name {
            fn bitxor_assign(&mut self, rhs: Self) {
                for (lhs, rhs) in self.0.iter_mut().zip(rhs.0.iter()) {
                    *lhs ^= rhs;
                }
            }
        }

        impl FromStr for $name {
            type Err = NumberError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::decode_hex(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.encode_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.encode_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.encode_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                Self::decode_hex(&text).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_width!(
    /// 128-bit value. Balances are 128 bit.
    Uint128,
    16,
    U128,
    39
);

fixed_width!(
    /// 256-bit value. Keys and hashes are 256 bit.
    Uint256,
    32,
    U256,
    78
);

fixed_width!(
    /// 512-bit value. Signatures are 512 bit.
    Uint512,
    64,
    U512,
    155
);

impl Uint512 {
    /// Concatenate two 256-bit halves, `upper` first.
    pub fn from_halves(upper: &Uint256, lower: &Uint256) -> Self {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(upper.as_bytes());
        bytes[32..].copy_from_slice(lower.as_bytes());
        Self(bytes)
    }
}

/// Hash of a block.
pub type BlockHash = Uint256;

/// Ed25519 public key; also the account identity.
pub type PublicKey = Uint256;

/// Ed25519 signature.
pub type Signature = Uint512;

/// Secret 256-bit key material (seed or private key).
///
/// Zeroed on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct RawKey(Uint256);

impl RawKey {
    /// Wrap secret bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(Uint256::from_bytes(bytes))
    }

    /// Decode a secret from exactly 64 hex digits.
    pub fn decode_hex(text: &str) -> Result<Self, NumberError> {
        if text.len() != Uint256::MAX_HEX_DIGITS {
            return Err(NumberError::InvalidLength {
                expected: Uint256::MAX_HEX_DIGITS,
                actual: text.len(),
            });
        }
        Ok(Self(Uint256::decode_hex(text)?))
    }

    /// Secret bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Uppercase hex of the secret.
    pub fn encode_hex(&self) -> String {
        self.0.encode_hex()
    }
}

impl Drop for RawKey {
    fn drop(&mut self) {
        self.0.clear();
    }
}

impl fmt::Debug for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawKey(<redacted>)")
    }
}
