//! Hex⇄bytes helpers shared by the codec and the address type

use thiserror::Error;

/// Hex decoding error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HexError {
    /// The string contains a character outside `[0-9a-fA-F]`
    #[error("invalid hex string: {0}")]
    InvalidCharacter(String),
}

/// Strip an optional `0x`/`0X` prefix and surrounding whitespace
pub fn strip_hex_prefix(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex string (prefix optional) into bytes.
///
/// An odd number of nibbles is accepted and read as if a leading `0` were
/// present, so `"0x1"` decodes to `[0x01]`.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, HexError> {
    let digits = strip_hex_prefix(s);
    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{}", digits))
    } else {
        hex::decode(digits)
    };
    decoded.map_err(|e| HexError::InvalidCharacter(e.to_string()))
}

/// Encode bytes as a lowercase `0x`-prefixed hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
