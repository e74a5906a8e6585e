//! Type tag commands

use aptflow_bcs::TypeTag;
use aptflow_primitives::bytes_to_hex;
use clap::Subcommand;

use crate::{output::Output, CliError};

/// Type tag subcommands
#[derive(Debug, Subcommand)]
pub enum TypeTagCommand {
    /// Parse a type tag and print its canonical form and BCS encoding
    Parse {
        /// Type tag, e.g. vector<0x1::string::String>
        tag: String,
    },
}

impl TypeTagCommand {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        match self {
            TypeTagCommand::Parse { tag } => {
                let parsed: TypeTag = tag.parse()?;
                let canonical = parsed.to_string();
                let bcs = bytes_to_hex(&parsed.to_bcs());
                Output::new(json)
                    .field("type", &canonical)
                    .field("bcs", &bcs)
                    .field_u64("variant", parsed.variant_index())
                    .message(&format!("{}\nBCS: {}", canonical, bcs))
                    .print();
            }
        }
        Ok(())
    }
}
