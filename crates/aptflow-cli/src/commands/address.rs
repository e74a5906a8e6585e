//! Address commands

use aptflow_primitives::{is_valid_address, AccountAddress};
use clap::Subcommand;

use crate::{output::Output, CliError};

/// Address subcommands
#[derive(Debug, Subcommand)]
pub enum AddressCommand {
    /// Print the full 0x + 64 hex digit form
    Normalize {
        /// Address, with or without 0x, any length up to 64 digits
        address: String,
    },
    /// Check whether an address parses
    Validate {
        /// Address
        address: String,
    },
    /// Print the shortest form (leading zeros dropped)
    Short {
        /// Address
        address: String,
    },
}

impl AddressCommand {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        match self {
            AddressCommand::Normalize { address } => {
                let parsed = AccountAddress::from_hex(&address)?;
                Output::new(json)
                    .field("address", &parsed.to_hex())
                    .field_bool("special", parsed.is_special())
                    .message(&parsed.to_hex())
                    .print();
            }
            AddressCommand::Validate { address } => {
                let valid = is_valid_address(&address);
                Output::new(json)
                    .field("address", &address)
                    .field_bool("valid", valid)
                    .message(if valid { "valid" } else { "invalid" })
                    .print();
            }
            AddressCommand::Short { address } => {
                let short = AccountAddress::from_hex(&address)?.to_short_hex();
                Output::new(json)
                    .field("address", &short)
                    .message(&short)
                    .print();
            }
        }
        Ok(())
    }
}
