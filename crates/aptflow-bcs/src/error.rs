//! Codec error types

use aptflow_primitives::{AddressError, HexError, PrimitiveError};
use thiserror::Error;

/// Codec error type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Value is negative or wider than the target integer type
    #[error("value {value} out of range for {type_name}")]
    OutOfRange {
        /// Target type name (`u8` .. `u256`)
        type_name: &'static str,
        /// Offending value as written
        value: String,
    },

    /// Value is not an integer (fraction, exponent, garbage)
    #[error("expected an integer, got {0}")]
    NotAnInteger(String),

    /// Malformed hex or address input
    #[error("format error: {0}")]
    Format(#[from] PrimitiveError),

    /// Type tag outside the encodable set
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Type tag string could not be parsed
    #[error("invalid type tag: {0}")]
    InvalidTypeTag(String),

    /// JSON value has the wrong shape for its type tag
    #[error("expected {expected} for {type_tag}, got {found}")]
    ValueMismatch {
        /// Type tag being encoded
        type_tag: String,
        /// Expected value shape
        expected: &'static str,
        /// Value actually supplied
        found: String,
    },

    /// Fixed-width read with fewer bytes than required
    #[error("truncated input: need {expected} bytes, have {available}")]
    Truncated {
        /// Bytes required
        expected: usize,
        /// Bytes available
        available: usize,
    },

    /// Ran out of input while reading a variable-length field
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd {
        /// Offset of the missing byte
        offset: usize,
    },

    /// ULEB128 value does not fit in 64 bits
    #[error("uleb128 value overflows u64")]
    Uleb128Overflow,

    /// ULEB128 value padded with a trailing zero byte
    #[error("non-canonical uleb128 at offset {offset}")]
    NonCanonicalUleb128 {
        /// Offset of the redundant zero byte
        offset: usize,
    },

    /// String payload is not UTF-8
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(String),

    /// Boolean byte other than 0x00 or 0x01
    #[error("invalid bool byte: {0:#04x}")]
    InvalidBool(u8),
}

impl From<AddressError> for CodecError {
    fn from(e: AddressError) -> Self {
        CodecError::Format(PrimitiveError::Address(e))
    }
}

impl From<HexError> for CodecError {
    fn from(e: HexError) -> Self {
        CodecError::Format(PrimitiveError::Hex(e))
    }
}
