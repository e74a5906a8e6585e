//! Account address type (32 bytes)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::hexutil::strip_hex_prefix;

/// Address parsing error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// More than 64 hex digits after cleaning
    #[error("address too long: expected at most 64 hex characters, got {0}")]
    TooLong(usize),
    /// Invalid byte length
    #[error("invalid address length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
    /// Nothing left after stripping the prefix
    #[error("empty address")]
    Empty,
}

/// 32-byte account address
///
/// Parsed from hex with or without a `0x` prefix; short forms such as `0x1`
/// are left-padded with zero nibbles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    /// Size of address in bytes
    pub const LEN: usize = 32;

    /// Zero address (0x0)
    pub const ZERO: AccountAddress = AccountAddress([0u8; 32]);

    /// Framework address (0x1)
    pub const ONE: AccountAddress = {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        AccountAddress(bytes)
    };

    /// Create address from bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        AccountAddress(bytes)
    }

    /// Create address from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        if slice.len() != Self::LEN {
            return Err(AddressError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(AccountAddress(bytes))
    }

    /// Parse address from hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let padded = pad_hex(s)?;
        let bytes = hex::decode(&padded).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as byte slice
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Addresses `0x0` through `0xf` are reserved for the framework
    pub fn is_special(&self) -> bool {
        self.0[..31].iter().all(|b| *b == 0) && self.0[31] < 0x10
    }

    /// Convert to the full 64-digit hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Hex string with leading zero nibbles removed (`0x1`, `0x0`)
    pub fn to_short_hex(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }

    /// Short form for special addresses, full form otherwise
    pub fn to_standard_string(&self) -> String {
        if self.is_special() {
            self.to_short_hex()
        } else {
            self.to_hex()
        }
    }
}

/// Strip, lowercase and left-pad to 64 hex digits
fn pad_hex(s: &str) -> Result<String, AddressError> {
    let cleaned = strip_hex_prefix(s).to_ascii_lowercase();
    if cleaned.is_empty() {
        return Err(AddressError::Empty);
    }
    if cleaned.len() > 64 {
        return Err(AddressError::TooLong(cleaned.len()));
    }
    if let Some(bad) = cleaned.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(AddressError::InvalidHex(format!(
            "unexpected character '{}' in {}",
            bad, s
        )));
    }
    Ok(format!("{:0>64}", cleaned))
}

/// Normalize an address string to `0x` + 64 lowercase hex digits
pub fn normalize_address(s: &str) -> Result<String, AddressError> {
    pad_hex(s).map(|padded| format!("0x{}", padded))
}

/// Check whether a string parses as an account address
pub fn is_valid_address(s: &str) -> bool {
    pad_hex(s).is_ok()
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_hex())
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for AccountAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 32]> for AccountAddress {
    fn from(bytes: [u8; 32]) -> Self {
        AccountAddress(bytes)
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Serde implementation (behind feature flag)
#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for AccountAddress {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for AccountAddress {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            AccountAddress::from_hex(&s).map_err(de::Error::custom)
        }
    }
}
