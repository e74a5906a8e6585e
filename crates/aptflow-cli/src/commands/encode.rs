//! Encode command

use aptflow_bcs::{encode_move_arg, TypeTag};
use aptflow_primitives::bytes_to_hex;
use clap::Args;

use super::parse_arg_value;
use crate::{output::Output, CliError};

/// Arguments of `encode`
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Move type, e.g. u64, address, vector<u8>, 0x1::string::String
    #[arg(long = "type")]
    pub type_tag: String,
    /// Value as JSON; bare text is read as a string
    #[arg(long, allow_hyphen_values = true)]
    pub value: String,
}

impl EncodeArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let tag: TypeTag = self.type_tag.parse()?;
        let value = parse_arg_value(&tag, &self.value);
        let bytes = encode_move_arg(&tag, &value)?;
        let hex = bytes_to_hex(&bytes);

        Output::new(json)
            .field("type", &tag.to_string())
            .field("bcs", &hex)
            .field_u64("length", bytes.len() as u64)
            .message(&hex)
            .print();
        Ok(())
    }
}
