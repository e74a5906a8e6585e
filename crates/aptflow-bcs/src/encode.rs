//! BCS encoding of primitive and composite values
//!
//! - Integers: fixed width, little-endian
//! - Lengths and counts: ULEB128
//! - Strings: ULEB128(byte length) ++ UTF-8 bytes
//! - Vectors: ULEB128(count) ++ concatenated items
//! - Addresses: 32 raw bytes, no prefix

use aptflow_primitives::{AccountAddress, U256};
use bytes::{BufMut, BytesMut};

use crate::CodecError;

/// Fixed widths of the unsigned integer types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UintWidth {
    /// 8 bits
    U8,
    /// 16 bits
    U16,
    /// 32 bits
    U32,
    /// 64 bits
    U64,
    /// 128 bits
    U128,
    /// 256 bits
    U256,
}

impl UintWidth {
    /// All widths, narrowest first
    pub const ALL: [UintWidth; 6] = [
        UintWidth::U8,
        UintWidth::U16,
        UintWidth::U32,
        UintWidth::U64,
        UintWidth::U128,
        UintWidth::U256,
    ];

    /// Encoded size in bytes
    pub fn bytes(self) -> usize {
        match self {
            UintWidth::U8 => 1,
            UintWidth::U16 => 2,
            UintWidth::U32 => 4,
            UintWidth::U64 => 8,
            UintWidth::U128 => 16,
            UintWidth::U256 => 32,
        }
    }

    /// Width in bits
    pub fn bits(self) -> usize {
        self.bytes() * 8
    }

    /// Move type name
    pub fn name(self) -> &'static str {
        match self {
            UintWidth::U8 => "u8",
            UintWidth::U16 => "u16",
            UintWidth::U32 => "u32",
            UintWidth::U64 => "u64",
            UintWidth::U128 => "u128",
            UintWidth::U256 => "u256",
        }
    }

    /// Largest representable value
    pub fn max_value(self) -> U256 {
        match self {
            UintWidth::U256 => U256::MAX,
            other => (U256::one() << other.bits()) - U256::one(),
        }
    }
}

/// Encode a bool as a single byte
pub fn encode_bool(value: bool) -> Vec<u8> {
    vec![u8::from(value)]
}

/// Encode an unsigned integer at the given width.
///
/// Fails with `OutOfRange` if the value needs more bits than the width has.
pub fn encode_uint(value: &U256, width: UintWidth) -> Result<Vec<u8>, CodecError> {
    if value.bits() > width.bits() {
        return Err(CodecError::OutOfRange {
            type_name: width.name(),
            value: value.to_string(),
        });
    }
    let mut buf = BytesMut::with_capacity(width.bytes());
    put_uint(&mut buf, *value, width);
    Ok(buf.to_vec())
}

/// Shift-and-mask one byte at a time, least significant first
fn put_uint(buf: &mut BytesMut, mut value: U256, width: UintWidth) {
    for _ in 0..width.bytes() {
        buf.put_u8((value.low_u64() & 0xff) as u8);
        value = value >> 8usize;
    }
}

fn encode_native(value: U256, width: UintWidth) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(width.bytes());
    put_uint(&mut buf, value, width);
    buf.to_vec()
}

/// Encode a u8
pub fn encode_u8(value: u8) -> Vec<u8> {
    encode_native(U256::from(value), UintWidth::U8)
}

/// Encode a u16
pub fn encode_u16(value: u16) -> Vec<u8> {
    encode_native(U256::from(value), UintWidth::U16)
}

/// Encode a u32
pub fn encode_u32(value: u32) -> Vec<u8> {
    encode_native(U256::from(value), UintWidth::U32)
}

/// Encode a u64
pub fn encode_u64(value: u64) -> Vec<u8> {
    encode_native(U256::from(value), UintWidth::U64)
}

/// Encode a u128
pub fn encode_u128(value: u128) -> Vec<u8> {
    encode_native(U256::from(value), UintWidth::U128)
}

/// Encode a u256
pub fn encode_u256(value: &U256) -> Vec<u8> {
    encode_native(*value, UintWidth::U256)
}

/// Parse a decimal integer literal into a `U256`.
///
/// Negative values report `OutOfRange` against `width`; fractions,
/// exponents and other garbage report `NotAnInteger`. A fractional part made
/// only of zeros (`"5.00"`) is accepted.
pub fn parse_integer_text(text: &str, width: UintWidth) -> Result<U256, CodecError> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits = match unsigned.split_once('.') {
        Some((whole, frac)) if frac.bytes().all(|b| b == b'0') => whole,
        Some(_) => return Err(CodecError::NotAnInteger(text.to_string())),
        None => unsigned,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::NotAnInteger(text.to_string()));
    }

    let out_of_range = || CodecError::OutOfRange {
        type_name: width.name(),
        value: trimmed.to_string(),
    };
    if negative && digits.bytes().any(|b| b != b'0') {
        return Err(out_of_range());
    }
    // Only fails on overflow once the digits are validated
    U256::from_dec_str(digits).map_err(|_| out_of_range())
}

/// Encode a decimal integer literal at the given width
pub fn encode_integer_str(text: &str, width: UintWidth) -> Result<Vec<u8>, CodecError> {
    let value = parse_integer_text(text, width)?;
    encode_uint(&value, width)
}

/// Encode an address string as 32 bytes.
///
/// Accepts an optional `0x` prefix and short forms; fails with a format
/// error on non-hex characters or more than 64 hex digits.
pub fn encode_address(s: &str) -> Result<Vec<u8>, CodecError> {
    let address = AccountAddress::from_hex(s)?;
    Ok(encode_account_address(&address))
}

/// Encode a parsed address as 32 bytes
pub fn encode_account_address(address: &AccountAddress) -> Vec<u8> {
    address.as_bytes().to_vec()
}

/// Encode a value as ULEB128
pub fn encode_uleb128(value: u64) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(10);
    put_uleb128(&mut buf, value);
    buf.to_vec()
}

fn put_uleb128(buf: &mut BytesMut, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.put_u8(byte);
            return;
        }
        buf.put_u8(byte | 0x80);
    }
}

/// Encode a string as ULEB128(UTF-8 byte length) ++ bytes
pub fn encode_string(s: &str) -> Vec<u8> {
    encode_bytes(s.as_bytes())
}

/// Encode a byte vector as ULEB128(length) ++ bytes
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(data.len() + 5);
    put_uleb128(&mut buf, data.len() as u64);
    buf.put_slice(data);
    buf.to_vec()
}

/// Encode a vector of already-encoded items as ULEB128(count) ++ items
pub fn encode_vector<T: AsRef<[u8]>>(items: &[T]) -> Vec<u8> {
    let payload_len: usize = items.iter().map(|item| item.as_ref().len()).sum();
    let mut buf = BytesMut::with_capacity(payload_len + 5);
    put_uleb128(&mut buf, items.len() as u64);
    for item in items {
        buf.put_slice(item.as_ref());
    }
    buf.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Bool ====================

    #[test]
    fn test_encode_bool() {
        assert_eq!(encode_bool(true), vec![0x01]);
        assert_eq!(encode_bool(false), vec![0x00]);
    }

    // ==================== Fixed-width integers ====================

    #[test]
    fn test_encode_small_ints_little_endian() {
        assert_eq!(encode_u8(0xab), vec![0xab]);
        assert_eq!(encode_u16(0x0102), vec![0x02, 0x01]);
        assert_eq!(encode_u32(0x01020304), vec![0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_encode_u64() {
        assert_eq!(
            encode_u64(0x0102030405060708),
            vec![0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
        assert_eq!(encode_u64(u64::MAX), vec![0xff; 8]);
    }

    #[test]
    fn test_encode_u64_above_float_precision() {
        // 2^53 + 1 is not representable as f64
        let value = (1u64 << 53) + 1;
        let encoded = encode_u64(value);
        assert_eq!(encoded, value.to_le_bytes().to_vec());
        assert_eq!(encoded[0], 0x01);
        assert_eq!(encoded[6], 0x20);
    }

    #[test]
    fn test_encode_u128_matches_native() {
        let value = 0x0102030405060708090a0b0c0d0e0f10u128;
        assert_eq!(encode_u128(value), value.to_le_bytes().to_vec());
    }

    #[test]
    fn test_encode_u256() {
        let encoded = encode_u256(&U256::MAX);
        assert_eq!(encoded, vec![0xff; 32]);

        let encoded = encode_u256(&(U256::one() << 255usize));
        assert_eq!(encoded[31], 0x80);
        assert!(encoded[..31].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encode_uint_range_check() {
        assert_eq!(encode_uint(&U256::from(255u64), UintWidth::U8).unwrap(), vec![0xff]);
        assert_eq!(
            encode_uint(&U256::from(256u64), UintWidth::U8),
            Err(CodecError::OutOfRange {
                type_name: "u8",
                value: "256".to_string()
            })
        );
        let too_big = U256::from(u64::MAX) + U256::one();
        assert!(encode_uint(&too_big, UintWidth::U64).is_err());
        assert!(encode_uint(&too_big, UintWidth::U128).is_ok());
    }

    #[test]
    fn test_uint_width_max_value() {
        assert_eq!(UintWidth::U8.max_value(), U256::from(255u64));
        assert_eq!(UintWidth::U64.max_value(), U256::from(u64::MAX));
        assert_eq!(UintWidth::U128.max_value(), U256::from(u128::MAX));
        assert_eq!(UintWidth::U256.max_value(), U256::MAX);
    }

    // ==================== Integer text ====================

    #[test]
    fn test_parse_integer_text() {
        assert_eq!(parse_integer_text("42", UintWidth::U8).unwrap(), U256::from(42u64));
        assert_eq!(parse_integer_text(" 7 ", UintWidth::U8).unwrap(), U256::from(7u64));
        assert_eq!(parse_integer_text("5.00", UintWidth::U8).unwrap(), U256::from(5u64));
        assert_eq!(parse_integer_text("-0", UintWidth::U8).unwrap(), U256::zero());
    }

    #[test]
    fn test_parse_integer_text_negative() {
        assert!(matches!(
            parse_integer_text("-1", UintWidth::U64),
            Err(CodecError::OutOfRange { type_name: "u64", .. })
        ));
    }

    #[test]
    fn test_parse_integer_text_not_integer() {
        for bad in ["1.5", "1e3", "abc", "", "-", "0x10", "1,000"] {
            assert!(
                matches!(parse_integer_text(bad, UintWidth::U64), Err(CodecError::NotAnInteger(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_encode_integer_str_u64_max_and_beyond() {
        assert_eq!(
            encode_integer_str("18446744073709551615", UintWidth::U64).unwrap(),
            vec![0xff; 8]
        );
        assert!(matches!(
            encode_integer_str("18446744073709551616", UintWidth::U64),
            Err(CodecError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_encode_integer_str_beyond_u256() {
        // 2^256
        let two_pow_256 =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(matches!(
            encode_integer_str(two_pow_256, UintWidth::U256),
            Err(CodecError::OutOfRange { type_name: "u256", .. })
        ));
    }

    // ==================== Address ====================

    #[test]
    fn test_encode_address_short() {
        let encoded = encode_address("0x1").unwrap();
        let mut expected = vec![0u8; 31];
        expected.push(0x01);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_encode_address_uppercase_unprefixed() {
        let encoded = encode_address("ABCD").unwrap();
        assert_eq!(encoded.len(), 32);
        assert_eq!(&encoded[30..], &[0xab, 0xcd]);
    }

    #[test]
    fn test_encode_address_errors() {
        assert!(matches!(encode_address("0xxyz"), Err(CodecError::Format(_))));
        let long = "1".repeat(65);
        assert!(matches!(encode_address(&long), Err(CodecError::Format(_))));
    }

    // ==================== ULEB128 ====================

    #[test]
    fn test_encode_uleb128() {
        assert_eq!(encode_uleb128(0), vec![0x00]);
        assert_eq!(encode_uleb128(1), vec![0x01]);
        assert_eq!(encode_uleb128(127), vec![0x7f]);
        assert_eq!(encode_uleb128(128), vec![0x80, 0x01]);
        assert_eq!(encode_uleb128(300), vec![0xac, 0x02]);
        assert_eq!(encode_uleb128(16384), vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn test_encode_uleb128_u64_max() {
        let encoded = encode_uleb128(u64::MAX);
        assert_eq!(encoded.len(), 10);
        assert_eq!(encoded[9], 0x01);
        assert!(encoded[..9].iter().all(|b| *b == 0xff));
    }

    // ==================== Strings and vectors ====================

    #[test]
    fn test_encode_string_empty() {
        assert_eq!(encode_string(""), vec![0x00]);
    }

    #[test]
    fn test_encode_string_ascii() {
        assert_eq!(encode_string("abc"), vec![0x03, b'a', b'b', b'c']);
    }

    #[test]
    fn test_encode_string_multibyte() {
        // "é" is one char, two bytes; "🚀" is one char, four bytes
        let encoded = encode_string("é🚀");
        assert_eq!(encoded[0], 6);
        assert_eq!(encoded.len(), 7);
        assert_eq!(&encoded[1..], "é🚀".as_bytes());
    }

    #[test]
    fn test_encode_string_long_prefix() {
        let s = "a".repeat(200);
        let encoded = encode_string(&s);
        assert_eq!(&encoded[..2], &[0xc8, 0x01]);
        assert_eq!(encoded.len(), 202);
    }

    #[test]
    fn test_encode_vector_concatenates() {
        let items = vec![encode_u16(1), encode_u16(2)];
        assert_eq!(encode_vector(&items), vec![0x02, 0x01, 0x00, 0x02, 0x00]);
    }

    #[test]
    fn test_encode_vector_empty() {
        let items: Vec<Vec<u8>> = vec![];
        assert_eq!(encode_vector(&items), vec![0x00]);
    }

    #[test]
    fn test_encode_vector_does_not_reinterpret_items() {
        let items = vec![vec![0xff, 0xff, 0xff], vec![]];
        assert_eq!(encode_vector(&items), vec![0x02, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_encode_bytes() {
        assert_eq!(encode_bytes(&[0xde, 0xad]), vec![0x02, 0xde, 0xad]);
    }
}
