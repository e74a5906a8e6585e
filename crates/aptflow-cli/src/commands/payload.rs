//! Entry-function payload command

use aptflow_bcs::{encode_move_arg, parse_function_id, EntryFunction, TypeTag};
use aptflow_primitives::bytes_to_hex;
use clap::Args;
use serde_json::json;

use super::parse_arg_value;
use crate::{output::Output, CliError};

/// Arguments of `payload`
#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// Function id, e.g. 0x1::aptos_account::transfer
    #[arg(long)]
    pub function: String,
    /// Generic type argument (repeatable)
    #[arg(long = "type-arg")]
    pub type_args: Vec<String>,
    /// Argument as `type=json` (repeatable, in parameter order)
    #[arg(long = "arg", allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl PayloadArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let call = build_payload(&self.function, &self.type_args, &self.args)?;
        let bcs = bytes_to_hex(&call.to_bcs());
        let type_args: Vec<String> = call.type_args.iter().map(TypeTag::to_string).collect();
        let args: Vec<String> = call.args.iter().map(|a| bytes_to_hex(a)).collect();

        Output::new(json)
            .field("function", &call.function_id())
            .field_value("type_arguments", json!(type_args))
            .field_value("arguments", json!(args))
            .field("bcs", &bcs)
            .message(&bcs)
            .print();
        Ok(())
    }
}

/// Split `type=json` at the first `=`
fn split_arg(raw: &str) -> Result<(&str, &str), CliError> {
    raw.split_once('=')
        .ok_or_else(|| CliError::InvalidInput(format!("expected type=value, got {}", raw)))
}

fn build_payload(
    function: &str,
    type_args: &[String],
    args: &[String],
) -> Result<EntryFunction, CliError> {
    let (module, function) = parse_function_id(function)?;
    let type_args = type_args
        .iter()
        .map(|t| t.parse::<TypeTag>())
        .collect::<Result<Vec<_>, _>>()?;
    let args = args
        .iter()
        .map(|raw| -> Result<Vec<u8>, CliError> {
            let (tag, value) = split_arg(raw)?;
            let tag: TypeTag = tag.trim().parse()?;
            Ok(encode_move_arg(&tag, &parse_arg_value(&tag, value))?)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(EntryFunction::new(module, function, type_args, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aptflow_bcs::{encode_address, encode_u64};

    #[test]
    fn test_split_arg() {
        assert_eq!(split_arg("u64=5").unwrap(), ("u64", "5"));
        assert_eq!(split_arg("string=a=b").unwrap(), ("string", "a=b"));
        assert!(matches!(split_arg("u64"), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_build_transfer_payload() {
        let call = build_payload(
            "0x1::aptos_account::transfer",
            &[],
            &["address=0x2".to_string(), "u64=100000000".to_string()],
        )
        .unwrap();
        assert_eq!(call.function_id(), "0x1::aptos_account::transfer");
        assert_eq!(call.args[0], encode_address("0x2").unwrap());
        assert_eq!(call.args[1], encode_u64(100_000_000));
    }

    #[test]
    fn test_build_payload_numeric_string_arg() {
        let call = build_payload("0x1::m::f", &[], &["string=123".to_string()]).unwrap();
        assert_eq!(call.args[0], vec![3, b'1', b'2', b'3']);
    }

    #[test]
    fn test_build_payload_errors() {
        assert!(matches!(
            build_payload("0x1::coin", &[], &[]),
            Err(CliError::Codec(_))
        ));
        assert!(matches!(
            build_payload("0x1::coin::transfer", &[], &["u8=300".to_string()]),
            Err(CliError::Codec(_))
        ));
    }
}
