//! BCS decoding for the values that come back in responses

use aptflow_primitives::{AccountAddress, U256};

use crate::encode::UintWidth;
use crate::CodecError;

/// A decoded value and the number of bytes it occupied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    /// Decoded value
    pub value: T,
    /// Bytes consumed from the input, starting at the read offset
    pub consumed: usize,
}

impl<T> Decoded<T> {
    fn new(value: T, consumed: usize) -> Self {
        Self { value, consumed }
    }
}

/// Decode a ULEB128 value starting at `offset`.
///
/// Only the shortest encoding is accepted: a zero byte may not end a
/// multi-byte value.
pub fn decode_uleb128(bytes: &[u8], offset: usize) -> Result<Decoded<u64>, CodecError> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    let mut pos = offset;

    loop {
        let byte = *bytes
            .get(pos)
            .ok_or(CodecError::UnexpectedEnd { offset: pos })?;
        if byte == 0 && shift > 0 {
            return Err(CodecError::NonCanonicalUleb128 { offset: pos });
        }
        let payload = u64::from(byte & 0x7f);

        if shift >= 64 || (shift == 63 && payload > 1) {
            return Err(CodecError::Uleb128Overflow);
        }
        value |= payload << shift;
        pos += 1;

        if byte & 0x80 == 0 {
            return Ok(Decoded::new(value, pos - offset));
        }
        shift += 7;
    }
}

/// Decode a little-endian unsigned integer of the given width at `offset`
pub fn decode_uint(
    bytes: &[u8],
    offset: usize,
    width: UintWidth,
) -> Result<Decoded<U256>, CodecError> {
    let available = bytes.len().saturating_sub(offset);
    if available < width.bytes() {
        return Err(CodecError::Truncated {
            expected: width.bytes(),
            available,
        });
    }
    let value = accumulate_le(&bytes[offset..offset + width.bytes()]);
    Ok(Decoded::new(value, width.bytes()))
}

fn accumulate_le(bytes: &[u8]) -> U256 {
    bytes
        .iter()
        .enumerate()
        .fold(U256::zero(), |acc, (i, byte)| acc | (U256::from(*byte) << (8 * i)))
}

/// Decode the first 8 bytes as a little-endian u64.
///
/// Fewer than 8 bytes is a `Truncated` error; see [`decode_u64_lenient`] for
/// the zero-filling variant.
pub fn decode_u64(bytes: &[u8]) -> Result<u64, CodecError> {
    let decoded = decode_uint(bytes, 0, UintWidth::U64)?;
    Ok(decoded.value.low_u64())
}

/// Decode a little-endian u64, treating missing high bytes as zero.
///
/// Truncated input still yields a value but is reported through a
/// `truncated input` warning.
pub fn decode_u64_lenient(bytes: &[u8]) -> u64 {
    if bytes.len() < 8 {
        tracing::warn!(
            available = bytes.len(),
            expected = 8,
            "truncated input: zero-filling missing high bytes of u64"
        );
    }
    let take = bytes.len().min(8);
    accumulate_le(&bytes[..take]).low_u64()
}

/// Decode a single bool byte at `offset`
pub fn decode_bool(bytes: &[u8], offset: usize) -> Result<Decoded<bool>, CodecError> {
    match bytes.get(offset) {
        Some(0x00) => Ok(Decoded::new(false, 1)),
        Some(0x01) => Ok(Decoded::new(true, 1)),
        Some(other) => Err(CodecError::InvalidBool(*other)),
        None => Err(CodecError::UnexpectedEnd { offset }),
    }
}

/// Decode a 32-byte address at `offset`
pub fn decode_address(bytes: &[u8], offset: usize) -> Result<Decoded<AccountAddress>, CodecError> {
    let available = bytes.len().saturating_sub(offset);
    if available < AccountAddress::LEN {
        return Err(CodecError::Truncated {
            expected: AccountAddress::LEN,
            available,
        });
    }
    let address = AccountAddress::from_slice(&bytes[offset..offset + AccountAddress::LEN])?;
    Ok(Decoded::new(address, AccountAddress::LEN))
}

/// Decode a ULEB128-length-prefixed byte vector at `offset`
pub fn decode_bytes(bytes: &[u8], offset: usize) -> Result<Decoded<Vec<u8>>, CodecError> {
    let prefix = decode_uleb128(bytes, offset)?;
    let start = offset + prefix.consumed;
    let len = usize::try_from(prefix.value).map_err(|_| CodecError::Uleb128Overflow)?;
    let end = start
        .checked_add(len)
        .filter(|end| *end <= bytes.len())
        .ok_or(CodecError::UnexpectedEnd {
            offset: bytes.len(),
        })?;
    Ok(Decoded::new(bytes[start..end].to_vec(), prefix.consumed + len))
}

/// Decode a ULEB128-length-prefixed UTF-8 string at `offset`.
///
/// `consumed` covers both the length prefix and the payload.
pub fn decode_string(bytes: &[u8], offset: usize) -> Result<Decoded<String>, CodecError> {
    let raw = decode_bytes(bytes, offset)?;
    let value = String::from_utf8(raw.value).map_err(|e| CodecError::InvalidUtf8(e.to_string()))?;
    Ok(Decoded::new(value, raw.consumed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_string, encode_uleb128};

    // ==================== ULEB128 ====================

    #[test]
    fn test_decode_uleb128_zero() {
        assert_eq!(decode_uleb128(&[0x00], 0).unwrap(), Decoded::new(0, 1));
    }

    #[test]
    fn test_decode_uleb128_multi_byte() {
        assert_eq!(decode_uleb128(&[0xac, 0x02], 0).unwrap(), Decoded::new(300, 2));
        assert_eq!(
            decode_uleb128(&[0x80, 0x80, 0x01], 0).unwrap(),
            Decoded::new(16384, 3)
        );
    }

    #[test]
    fn test_decode_uleb128_from_offset() {
        let data = [0xff, 0xff, 0x80, 0x01, 0x42];
        let decoded = decode_uleb128(&data, 2).unwrap();
        assert_eq!(decoded.value, 128);
        assert_eq!(decoded.consumed, 2);
    }

    #[test]
    fn test_decode_uleb128_unterminated() {
        assert_eq!(
            decode_uleb128(&[0x80, 0x80], 0),
            Err(CodecError::UnexpectedEnd { offset: 2 })
        );
        assert_eq!(
            decode_uleb128(&[], 0),
            Err(CodecError::UnexpectedEnd { offset: 0 })
        );
    }

    #[test]
    fn test_decode_uleb128_u64_max() {
        let encoded = encode_uleb128(u64::MAX);
        assert_eq!(decode_uleb128(&encoded, 0).unwrap().value, u64::MAX);
    }

    #[test]
    fn test_decode_uleb128_non_canonical() {
        assert_eq!(
            decode_uleb128(&[0x80, 0x00], 0),
            Err(CodecError::NonCanonicalUleb128 { offset: 1 })
        );
        assert_eq!(
            decode_uleb128(&[0x42, 0x81, 0x80, 0x00], 1),
            Err(CodecError::NonCanonicalUleb128 { offset: 3 })
        );
        // A lone zero byte is the canonical encoding of 0
        assert_eq!(decode_uleb128(&[0x00], 0).unwrap().value, 0);
    }

    #[test]
    fn test_decode_uleb128_overflow() {
        let mut too_big = vec![0xff; 9];
        too_big.push(0x02);
        assert_eq!(decode_uleb128(&too_big, 0), Err(CodecError::Uleb128Overflow));
    }

    // ==================== Fixed-width integers ====================

    #[test]
    fn test_decode_u64() {
        let data = 0x0102030405060708u64.to_le_bytes();
        assert_eq!(decode_u64(&data).unwrap(), 0x0102030405060708);
    }

    #[test]
    fn test_decode_u64_ignores_trailing_bytes() {
        let mut data = 7u64.to_le_bytes().to_vec();
        data.extend([0xff, 0xff]);
        assert_eq!(decode_u64(&data).unwrap(), 7);
    }

    #[test]
    fn test_decode_u64_truncated() {
        assert_eq!(
            decode_u64(&[0x01, 0x02]),
            Err(CodecError::Truncated {
                expected: 8,
                available: 2
            })
        );
    }

    #[test]
    fn test_decode_u64_lenient_zero_fills() {
        assert_eq!(decode_u64_lenient(&[0x01, 0x02]), 0x0201);
        assert_eq!(decode_u64_lenient(&[]), 0);
        assert_eq!(decode_u64_lenient(&u64::MAX.to_le_bytes()), u64::MAX);
    }

    #[test]
    fn test_decode_uint_at_offset() {
        let data = [0xaa, 0x34, 0x12];
        let decoded = decode_uint(&data, 1, UintWidth::U16).unwrap();
        assert_eq!(decoded.value, U256::from(0x1234u64));
        assert_eq!(decoded.consumed, 2);
    }

    #[test]
    fn test_decode_uint_offset_past_end() {
        assert_eq!(
            decode_uint(&[0x01], 5, UintWidth::U8),
            Err(CodecError::Truncated {
                expected: 1,
                available: 0
            })
        );
    }

    // ==================== Bool / address ====================

    #[test]
    fn test_decode_bool() {
        assert!(decode_bool(&[0x01], 0).unwrap().value);
        assert!(!decode_bool(&[0x00], 0).unwrap().value);
        assert_eq!(decode_bool(&[0x02], 0), Err(CodecError::InvalidBool(0x02)));
    }

    #[test]
    fn test_decode_address() {
        let mut data = vec![0u8; 31];
        data.push(0x01);
        assert_eq!(decode_address(&data, 0).unwrap().value, AccountAddress::ONE);
        assert!(decode_address(&data[1..], 0).is_err());
    }

    // ==================== Strings ====================

    #[test]
    fn test_decode_string() {
        let encoded = encode_string("hello");
        let decoded = decode_string(&encoded, 0).unwrap();
        assert_eq!(decoded.value, "hello");
        assert_eq!(decoded.consumed, 6);
    }

    #[test]
    fn test_decode_string_empty() {
        assert_eq!(decode_string(&[0x00], 0).unwrap(), Decoded::new(String::new(), 1));
    }

    #[test]
    fn test_decode_string_sequence() {
        let mut data = encode_string("ab");
        data.extend(encode_string("日本"));
        let first = decode_string(&data, 0).unwrap();
        let second = decode_string(&data, first.consumed).unwrap();
        assert_eq!(first.value, "ab");
        assert_eq!(second.value, "日本");
        assert_eq!(first.consumed + second.consumed, data.len());
    }

    #[test]
    fn test_decode_string_short_payload() {
        assert!(matches!(
            decode_string(&[0x05, b'a'], 0),
            Err(CodecError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn test_decode_string_invalid_utf8() {
        assert!(matches!(
            decode_string(&[0x02, 0xc3, 0x28], 0),
            Err(CodecError::InvalidUtf8(_))
        ));
    }
}
