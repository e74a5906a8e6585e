//! CLI command implementations

pub mod address;
pub mod decode;
pub mod encode;
pub mod network;
pub mod payload;
pub mod type_tag;
pub mod units;
pub mod watch;

use aptflow_bcs::TypeTag;
use serde_json::Value;

/// Read a command-line value for an argument of type `tag`.
///
/// Strings, addresses and objects take the text verbatim, so `42` and
/// `true` stay strings. Everything else is read as JSON, falling back to a
/// bare string (`--value 0x1` for a `vector<u8>`).
pub(crate) fn parse_arg_value(tag: &TypeTag, raw: &str) -> Value {
    let verbatim = match tag {
        TypeTag::Address => true,
        TypeTag::Struct(s) => s.is_std_string() || s.is_object(),
        _ => false,
    };
    if verbatim {
        return Value::String(raw.to_string());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
