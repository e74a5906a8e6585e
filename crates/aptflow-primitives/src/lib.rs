//! # aptflow-primitives
//!
//! Primitive types shared by the Aptflow crates.
//!
//! This crate provides the 32-byte account address, the hex⇄bytes helpers
//! used by the codec, and the fixed constants of the native token.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
mod hexutil;

pub use address::{is_valid_address, normalize_address, AccountAddress, AddressError};
pub use error::PrimitiveError;
pub use hexutil::{bytes_to_hex, hex_to_bytes, strip_hex_prefix, HexError};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Number of fractional digits of the native token
pub const APT_DECIMALS: u32 = 8;

/// Smallest units (octas) per whole native token
pub const OCTAS_PER_APT: u64 = 100_000_000;

/// Fully qualified type of the native coin
pub const APTOS_COIN_TYPE: &str = "0x1::aptos_coin::AptosCoin";

/// Address of the on-chain framework
pub const FRAMEWORK_ADDRESS: AccountAddress = AccountAddress::ONE;

/// Ledger version type
pub type Version = u64;

/// Epoch number type
pub type Epoch = u64;
