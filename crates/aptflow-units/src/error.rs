//! Unit conversion errors

use thiserror::Error;

/// Unit conversion error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// Amount is below zero
    #[error("amount must not be negative: {0}")]
    Negative(String),

    /// Amount is NaN
    #[error("amount is not a number")]
    NotANumber,

    /// Amount has a fractional part where an integer is required
    #[error("amount must be an integer: {0}")]
    NotAnInteger(String),

    /// Text does not parse as a decimal number
    #[error("invalid amount: {0}")]
    InvalidNumber(String),

    /// Result does not fit in 256 bits, or the input is infinite
    #[error("amount overflows 256 bits")]
    Overflow,

    /// 10^decimals does not fit in 256 bits
    #[error("decimals too large: {0} (max 77)")]
    DecimalsTooLarge(u32),
}
