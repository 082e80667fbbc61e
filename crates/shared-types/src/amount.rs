//! # Amount
//!
//! 128-bit raw-unit balances and their display form.
//!
//! Display amounts are raw units scaled by 10^30: the decimal point sits
//! 30 digits from the right of the raw numeral.

use crate::errors::AmountError;
use crate::numbers::Uint128;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 10^33 raw.
pub const GNANO_RATIO: u128 = 1_000_000_000_000_000_000_000_000_000_000_000;
/// 10^30 raw, the display unit.
pub const MNANO_RATIO: u128 = 1_000_000_000_000_000_000_000_000_000_000;
/// 10^27 raw.
pub const KNANO_RATIO: u128 = 1_000_000_000_000_000_000_000_000_000;
/// 10^24 raw.
pub const NANO_RATIO: u128 = 1_000_000_000_000_000_000_000_000;
/// Smallest unit.
pub const RAW_RATIO: u128 = 1;

/// Fractional digits in the display form.
pub const DISPLAY_DECIMALS: usize = 30;

/// Longest accepted display numeral, decimal point included.
pub const MAX_DISPLAY_CHARS: usize = 40;

/// Default number of places kept by [`Amount::to_display_truncated`].
pub const DEFAULT_DISPLAY_PLACES: usize = 6;

/// Non-negative balance in raw units.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Uint128);

impl Amount {
    /// Zero balance.
    pub const ZERO: Amount = Amount(Uint128::zero());

    /// From a raw value.
    pub fn from_raw(raw: u128) -> Self {
        Self(Uint128::from_bytes(raw.to_be_bytes()))
    }

    /// Parse a raw-unit base-10 integer of at most 39 digits.
    pub fn from_raw_str(text: &str) -> Result<Self, AmountError> {
        Ok(Self(Uint128::decode_dec(text)?))
    }

    /// Parse a display numeral (`"1.5"`, `"0.000001"`, `"12"`, `".5"`).
    ///
    /// Fractional digits beyond the 30th are truncated.
    pub fn from_display(text: &str) -> Result<Self, AmountError> {
        if text.is_empty() {
            return Err(AmountError::InvalidAmount("empty input".into()));
        }
        if text.len() > MAX_DISPLAY_CHARS {
            return Err(AmountError::InvalidAmount(format!(
                "{} characters exceeds maximum of {MAX_DISPLAY_CHARS}",
                text.len()
            )));
        }
        if text.starts_with('-') {
            return Err(AmountError::InvalidAmount(format!(
                "negative value: {text}"
            )));
        }

        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(AmountError::InvalidAmount(format!("no digits in {text:?}")));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(AmountError::InvalidAmount(format!(
                "not a decimal numeral: {text:?}"
            )));
        }

        let mut digits = String::with_capacity(whole.len() + DISPLAY_DECIMALS);
        digits.push_str(whole);
        digits.extend(fraction.chars().take(DISPLAY_DECIMALS));
        for _ in fraction.len()..DISPLAY_DECIMALS {
            digits.push('0');
        }

        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return Ok(Self::ZERO);
        }
        Self::from_raw_str(significant)
    }

    /// Raw value.
    pub fn raw(&self) -> u128 {
        u128::from_be_bytes(*self.0.as_bytes())
    }

    /// Underlying fixed-width value.
    pub fn as_uint(&self) -> &Uint128 {
        &self.0
    }

    /// Big-endian bytes, as hashed into blocks.
    pub fn to_be_bytes(&self) -> [u8; 16] {
        *self.0.as_bytes()
    }

    /// Raw base-10 numeral.
    pub fn to_raw_string(&self) -> String {
        self.raw().to_string()
    }

    /// Display numeral with exactly 30 fractional digits.
    pub fn to_display(&self) -> String {
        let raw = self.to_raw_string();
        let padded = format!("{:0>width$}", raw, width = DISPLAY_DECIMALS + 1);
        let split = padded.len() - DISPLAY_DECIMALS;
        format!("{}.{}", &padded[..split], &padded[split..])
    }

    /// Display numeral truncated (not rounded) to `places` fractional digits.
    ///
    /// With `places == 0` only the integer part is returned.
    pub fn to_display_truncated(&self, places: usize) -> String {
        let full = self.to_display();
        let (whole, fraction) = full.split_at(full.len() - DISPLAY_DECIMALS - 1);
        if places == 0 {
            return whole.to_string();
        }
        let keep = places.min(DISPLAY_DECIMALS);
        format!("{}.{}", whole, &fraction[1..=keep])
    }

    /// `self + other`, failing instead of wrapping.
    pub fn checked_add(&self, other: &Amount) -> Result<Amount, AmountError> {
        let (lhs, rhs) = (self.raw(), other.raw());
        lhs.checked_add(rhs)
            .map(Amount::from_raw)
            .ok_or(AmountError::AmountOverflow { lhs, rhs })
    }

    /// `self - other`, failing instead of wrapping.
    pub fn checked_sub(&self, other: &Amount) -> Result<Amount, AmountError> {
        let (lhs, rhs) = (self.raw(), other.raw());
        lhs.checked_sub(rhs)
            .map(Amount::from_raw)
            .ok_or(AmountError::AmountUnderflow { lhs, rhs })
    }

    /// True for a zero balance.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u128> for Amount {
    fn from(raw: u128) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw_string())
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({} raw)", self.raw())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_raw_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Amount::from_raw_str(&text).map_err(serde::de::Error::custom)
    }
}
