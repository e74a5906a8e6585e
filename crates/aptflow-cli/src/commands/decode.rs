//! Decode commands

use aptflow_bcs::{decode_address, decode_string, decode_u64, decode_u64_lenient, decode_uleb128};
use aptflow_primitives::hex_to_bytes;
use clap::Subcommand;

use crate::{output::Output, CliError};

/// Decode subcommands
#[derive(Debug, Subcommand)]
pub enum DecodeCommand {
    /// ULEB128 length prefix
    Uleb128 {
        /// Hex bytes
        hex: String,
        /// Byte offset to start at
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Little-endian u64
    U64 {
        /// Hex bytes
        hex: String,
        /// Byte offset to start at
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Zero-fill short input instead of failing
        #[arg(long)]
        lenient: bool,
    },
    /// Length-prefixed UTF-8 string
    String {
        /// Hex bytes
        hex: String,
        /// Byte offset to start at
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// 32-byte account address
    Address {
        /// Hex bytes
        hex: String,
        /// Byte offset to start at
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

impl DecodeCommand {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        match self {
            DecodeCommand::Uleb128 { hex, offset } => {
                let bytes = hex_to_bytes(&hex)?;
                let decoded = decode_uleb128(&bytes, offset)?;
                print_decoded(json, &decoded.value.to_string(), decoded.consumed);
            }
            DecodeCommand::U64 {
                hex,
                offset,
                lenient,
            } => {
                let bytes = hex_to_bytes(&hex)?;
                let rest = bytes.get(offset..).unwrap_or_default();
                let value = if lenient {
                    decode_u64_lenient(rest)
                } else {
                    decode_u64(rest)?
                };
                print_decoded(json, &value.to_string(), rest.len().min(8));
            }
            DecodeCommand::String { hex, offset } => {
                let bytes = hex_to_bytes(&hex)?;
                let decoded = decode_string(&bytes, offset)?;
                print_decoded(json, &decoded.value, decoded.consumed);
            }
            DecodeCommand::Address { hex, offset } => {
                let bytes = hex_to_bytes(&hex)?;
                let decoded = decode_address(&bytes, offset)?;
                print_decoded(json, &decoded.value.to_hex(), decoded.consumed);
            }
        }
        Ok(())
    }
}

fn print_decoded(json: bool, value: &str, consumed: usize) {
    Output::new(json)
        .field("value", value)
        .field_u64("consumed", consumed as u64)
        .message(value)
        .print();
}
