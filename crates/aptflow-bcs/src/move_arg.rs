//! Encoding of user-supplied JSON values as Move entry-function arguments

use aptflow_primitives::hex_to_bytes;
use serde_json::Value;

use crate::encode::{
    encode_address, encode_bool, encode_bytes, encode_string, encode_uint, encode_vector,
    parse_integer_text, UintWidth,
};
use crate::type_tag::TypeTag;
use crate::CodecError;

/// Resolve a type tag string and encode `value` as that type
pub fn encode_move_arg_str(type_tag: &str, value: &Value) -> Result<Vec<u8>, CodecError> {
    let tag: TypeTag = type_tag.parse()?;
    encode_move_arg(&tag, value)
}

/// Encode a JSON value as the given Move type.
///
/// Integers may be JSON numbers or decimal strings. A `vector<u8>` may also
/// be given as a hex string, which is read as raw bytes.
pub fn encode_move_arg(tag: &TypeTag, value: &Value) -> Result<Vec<u8>, CodecError> {
    tracing::debug!(type_tag = %tag, "encoding move argument");

    if let Some(width) = tag.uint_width() {
        let int = integer_from_value(tag, value, width)?;
        return encode_uint(&int, width);
    }

    match tag {
        TypeTag::Bool => match value {
            Value::Bool(b) => Ok(encode_bool(*b)),
            Value::String(s) if s == "true" => Ok(encode_bool(true)),
            Value::String(s) if s == "false" => Ok(encode_bool(false)),
            other => Err(mismatch(tag, "a boolean", other)),
        },
        TypeTag::Address => match value {
            Value::String(s) => encode_address(s),
            other => Err(mismatch(tag, "an address string", other)),
        },
        TypeTag::Vector(inner) => match (inner.as_ref(), value) {
            (TypeTag::U8, Value::String(hex)) => Ok(encode_bytes(&hex_to_bytes(hex)?)),
            (_, Value::Array(items)) => {
                let encoded = items
                    .iter()
                    .map(|item| encode_move_arg(inner, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(encode_vector(&encoded))
            }
            (_, other) => Err(mismatch(tag, "an array", other)),
        },
        TypeTag::Struct(s) if s.is_std_string() => match value {
            Value::String(text) => Ok(encode_string(text)),
            other => Err(mismatch(tag, "a string", other)),
        },
        TypeTag::Struct(s) if s.is_object() => match value {
            Value::String(addr) => encode_address(addr),
            other => Err(mismatch(tag, "an object address", other)),
        },
        _ => Err(CodecError::UnsupportedType(tag.to_string())),
    }
}

fn integer_from_value(
    tag: &TypeTag,
    value: &Value,
    width: UintWidth,
) -> Result<aptflow_primitives::U256, CodecError> {
    match value {
        // Number's Display keeps the literal as written (arbitrary_precision)
        Value::Number(n) => parse_integer_text(&n.to_string(), width),
        Value::String(s) => parse_integer_text(s, width),
        other => Err(mismatch(tag, "an integer", other)),
    }
}

fn mismatch(tag: &TypeTag, expected: &'static str, found: &Value) -> CodecError {
    CodecError::ValueMismatch {
        type_tag: tag.to_string(),
        expected,
        found: found.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==================== Scalars ====================

    #[test]
    fn test_encode_bool_arg() {
        assert_eq!(encode_move_arg_str("bool", &json!(true)).unwrap(), vec![1]);
        assert_eq!(encode_move_arg_str("bool", &json!("false")).unwrap(), vec![0]);
        assert!(matches!(
            encode_move_arg_str("bool", &json!(1)),
            Err(CodecError::ValueMismatch { .. })
        ));
    }

    #[test]
    fn test_encode_integer_args() {
        assert_eq!(encode_move_arg_str("u8", &json!(255)).unwrap(), vec![0xff]);
        assert_eq!(encode_move_arg_str("u16", &json!("258")).unwrap(), vec![0x02, 0x01]);
        assert_eq!(
            encode_move_arg_str("u64", &json!(100000000)).unwrap(),
            100_000_000u64.to_le_bytes().to_vec()
        );
    }

    #[test]
    fn test_encode_integer_range_errors() {
        assert!(matches!(
            encode_move_arg_str("u8", &json!(256)),
            Err(CodecError::OutOfRange { type_name: "u8", .. })
        ));
        assert!(matches!(
            encode_move_arg_str("u64", &json!(-1)),
            Err(CodecError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_encode_integer_type_errors() {
        assert!(matches!(
            encode_move_arg_str("u32", &json!(1.5)),
            Err(CodecError::NotAnInteger(_))
        ));
        assert!(matches!(
            encode_move_arg_str("u32", &json!("ten")),
            Err(CodecError::NotAnInteger(_))
        ));
        assert!(matches!(
            encode_move_arg_str("u32", &json!(null)),
            Err(CodecError::ValueMismatch { .. })
        ));
    }

    #[test]
    fn test_encode_u128_large_json_number() {
        // Larger than u64, exact thanks to arbitrary-precision numbers
        let value: Value = serde_json::from_str("340282366920938463463374607431768211455").unwrap();
        assert_eq!(encode_move_arg_str("u128", &value).unwrap(), vec![0xff; 16]);
    }

    #[test]
    fn test_encode_u256_string() {
        let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert_eq!(encode_move_arg_str("u256", &json!(max)).unwrap(), vec![0xff; 32]);
    }

    #[test]
    fn test_encode_address_arg() {
        let encoded = encode_move_arg_str("address", &json!("0x1")).unwrap();
        assert_eq!(encoded.len(), 32);
        assert_eq!(encoded[31], 1);
    }

    #[test]
    fn test_encode_string_arg() {
        assert_eq!(
            encode_move_arg_str("string", &json!("hi")).unwrap(),
            vec![2, b'h', b'i']
        );
        assert_eq!(
            encode_move_arg_str("0x1::string::String", &json!("")).unwrap(),
            vec![0]
        );
    }

    #[test]
    fn test_encode_object_arg() {
        let encoded =
            encode_move_arg_str("0x1::object::Object<0x1::fungible_asset::Metadata>", &json!("0xa"))
                .unwrap();
        assert_eq!(encoded.len(), 32);
        assert_eq!(encoded[31], 0x0a);
    }

    // ==================== Vectors ====================

    #[test]
    fn test_encode_vector_u8_from_hex() {
        assert_eq!(
            encode_move_arg_str("vector<u8>", &json!("0xdeadbeef")).unwrap(),
            vec![4, 0xde, 0xad, 0xbe, 0xef]
        );
    }

    #[test]
    fn test_encode_vector_u8_hex_is_not_decimal() {
        // "0x10" is one byte 0x10, not the decimal digits 1 and 0
        assert_eq!(
            encode_move_arg_str("vector<u8>", &json!("0x10")).unwrap(),
            vec![1, 0x10]
        );
    }

    #[test]
    fn test_encode_vector_u8_from_array() {
        assert_eq!(
            encode_move_arg_str("vector<u8>", &json!([1, 2, 3])).unwrap(),
            vec![3, 1, 2, 3]
        );
    }

    #[test]
    fn test_encode_vector_u64() {
        let encoded = encode_move_arg_str("vector<u64>", &json!([1, "2"])).unwrap();
        assert_eq!(encoded.len(), 17);
        assert_eq!(encoded[0], 2);
        assert_eq!(encoded[1], 1);
        assert_eq!(encoded[9], 2);
    }

    #[test]
    fn test_encode_nested_vector() {
        let encoded =
            encode_move_arg_str("vector<vector<u8>>", &json!(["0x0102", [3], []])).unwrap();
        assert_eq!(encoded, vec![3, 2, 1, 2, 1, 3, 0]);
    }

    #[test]
    fn test_encode_vector_of_strings() {
        let encoded = encode_move_arg_str("vector<string>", &json!(["a", "bc"])).unwrap();
        assert_eq!(encoded, vec![2, 1, b'a', 2, b'b', b'c']);
    }

    #[test]
    fn test_encode_vector_element_error_propagates() {
        assert!(matches!(
            encode_move_arg_str("vector<u8>", &json!([1, 300])),
            Err(CodecError::OutOfRange { .. })
        ));
        assert!(matches!(
            encode_move_arg_str("vector<u8>", &json!("0xzz")),
            Err(CodecError::Format(_))
        ));
    }

    // ==================== Unsupported ====================

    #[test]
    fn test_encode_unsupported_types() {
        assert!(matches!(
            encode_move_arg_str("signer", &json!("0x1")),
            Err(CodecError::UnsupportedType(_))
        ));
        assert!(matches!(
            encode_move_arg_str("0x1::coin::Coin<0x1::aptos_coin::AptosCoin>", &json!({})),
            Err(CodecError::UnsupportedType(_))
        ));
        assert!(matches!(
            encode_move_arg_str("f64", &json!(1)),
            Err(CodecError::UnsupportedType(_))
        ));
    }
}
