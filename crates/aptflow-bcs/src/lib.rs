//! # aptflow-bcs
//!
//! Binary Canonical Serialization (BCS) of Move-typed values.
//!
//! Produces the exact argument bytes the remote execution engine expects
//! and decodes the handful of values read back from responses.
//!
//! ## Encoding Rules
//!
//! - `bool`: one byte, `0x00` or `0x01`
//! - `u8`..`u256`: fixed width, little-endian, range-checked
//! - `address`: 32 bytes, short forms left-padded with zeros
//! - `string`, `vector<T>`: ULEB128 length/count, then the payload
//!
//! ## Example
//!
//! ```rust
//! use aptflow_bcs::{encode_move_arg_str, EntryFunction};
//! use serde_json::json;
//!
//! let to = encode_move_arg_str("address", &json!("0x2")).unwrap();
//! let amount = encode_move_arg_str("u64", &json!("100000000")).unwrap();
//! let call = EntryFunction::from_function_id(
//!     "0x1::aptos_account::transfer",
//!     &[],
//!     vec![to, amount],
//! )
//! .unwrap();
//! assert_eq!(call.function_id(), "0x1::aptos_account::transfer");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod decode;
mod encode;
mod entry_function;
mod error;
mod move_arg;
mod type_tag;

pub use decode::{
    decode_address, decode_bool, decode_bytes, decode_string, decode_u64, decode_u64_lenient,
    decode_uint, decode_uleb128, Decoded,
};
pub use encode::{
    encode_account_address, encode_address, encode_bool, encode_bytes, encode_integer_str,
    encode_string, encode_u128, encode_u16, encode_u256, encode_u32, encode_u64, encode_u8,
    encode_uint, encode_uleb128, encode_vector, parse_integer_text, UintWidth,
};
pub use entry_function::{parse_function_id, EntryFunction, ModuleId};
pub use error::CodecError;
pub use move_arg::{encode_move_arg, encode_move_arg_str};
pub use type_tag::{is_valid_identifier, split_generic, StructTag, TypeTag};

// Re-export primitives used in the public API
pub use aptflow_primitives::{AccountAddress, U256};
