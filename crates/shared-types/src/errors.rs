//! # Error Types
//!
//! Validation errors shared by every crate that parses numbers or balances.

use thiserror::Error;

/// Errors from the fixed-width integer codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    /// Text is empty, negative, too long, outside the base or out of range.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Byte input of the wrong size.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },
}

/// Errors from balance parsing and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Malformed raw or display numeral.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Sum does not fit in 128 bits.
    #[error("Amount overflow: {lhs} + {rhs} exceeds 128 bits")]
    AmountOverflow {
        /// Left operand (raw)
        lhs: u128,
        /// Right operand (raw)
        rhs: u128,
    },

    /// Difference would be negative.
    #[error("Amount underflow: {lhs} - {rhs} is negative")]
    AmountUnderflow {
        /// Left operand (raw)
        lhs: u128,
        /// Right operand (raw)
        rhs: u128,
    },
}

impl From<NumberError> for AmountError {
    fn from(err: NumberError) -> Self {
        AmountError::InvalidAmount(err.to_string())
    }
}
