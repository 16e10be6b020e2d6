//! Unsigned LEB128 varints, used for every length the composite codecs record.
//!
//! A value is split into 7-bit groups, least significant first. Every byte except the
//! last has its high bit set.
//!
//! | Value | Bytes          |
//! | ---   | ---            |
//! | `0`   | `[0x00]`       |
//! | `127` | `[0x7f]`       |
//! | `128` | `[0x80, 0x01]` |
//! | `300` | `[0xac, 0x02]` |
//!
//! Varints are limited to the 53-bit safe integer range (at most
//! [`MAX_VARINT_LEN`] bytes), so lengths survive a trip through an IEEE double on the
//! other side of the wire.

use super::constants::*;
use crate::errors::*;
use num_traits::ToPrimitive;
use smallvec::SmallVec;
use tracing::trace;

/// Stack buffer big enough for any legal varint.
pub type VarintBytes = SmallVec<[u8; MAX_VARINT_LEN]>;

/// Encodes a non-negative integer as a varint.
///
/// Accepts anything convertible with [`ToPrimitive`], so signed and floating point
/// inputs are checked rather than silently cast.
///
/// # Errors
///
/// Returns [`CodecError::InvalidInput`] if `n` is negative, has a fractional part, is
/// not finite, or exceeds [`MAX_SAFE_INTEGER`].
///
/// # Example
///
/// ```
/// use kcodec::encoding::encode_varint;
///
/// assert_eq!(encode_varint(300u32).unwrap().as_slice(), &[0xac, 0x02]);
/// assert!(encode_varint(-1i32).is_err());
/// assert!(encode_varint(1.5f64).is_err());
/// ```
pub fn encode_varint<N: ToPrimitive>(n: N) -> CodecResult<VarintBytes> {
    let v = safe_u64(&n).ok_or_else(|| {
        CodecError::InvalidInput(match n.to_f64() {
            Some(f) => format!("{} is not a safe non-negative integer", f),
            None => "value is not representable as a number".to_string(),
        })
    })?;
    Ok(encode_u64(v))
}

fn safe_u64<N: ToPrimitive>(n: &N) -> Option<u64> {
    let v = n.to_u64()?;
    if v > MAX_SAFE_INTEGER {
        return None;
    }
    // rejects fractional floats, which `to_u64` truncates
    match n.to_f64() {
        Some(f) if f == v as f64 => Some(v),
        _ => None,
    }
}

/// Encodes a value already known to be in range.
pub(crate) fn encode_u64(mut v: u64) -> VarintBytes {
    debug_assert!(v <= MAX_SAFE_INTEGER);
    let mut out = SmallVec::new();
    while v > VARINT_PAYLOAD as u64 {
        out.push((v as u8 & VARINT_PAYLOAD) | VARINT_CONTINUE);
        v >>= VARINT_GROUP_BITS;
    }
    out.push(v as u8);
    out
}

/// The number of bytes `v` occupies as a varint, without encoding it.
pub fn varint_len(v: u64) -> usize {
    let bits = 64 - v.leading_zeros() as usize;
    if bits == 0 {
        1
    } else {
        (bits + VARINT_GROUP_BITS as usize - 1) / VARINT_GROUP_BITS as usize
    }
}

/// Decodes a varint from the front of `bytes`, returning the value and the number of
/// bytes it occupied. Bytes after the terminating byte are ignored.
///
/// # Errors
///
/// * [`CodecError::Truncated`] if `bytes` ends before a byte with a clear high bit.
/// * [`CodecError::Overflow`] if the value needs more than 53 bits.
///
/// # Example
///
/// ```
/// use kcodec::encoding::decode_varint;
///
/// assert_eq!(decode_varint(&[0x80, 0x01, 0xff]).unwrap(), (128, 2));
/// assert!(decode_varint(&[0x80]).is_err());
/// ```
pub fn decode_varint(bytes: &[u8]) -> CodecResult<(u64, usize)> {
    let mut value = 0u64;
    let mut shift = 0u32;
    for (i, &byte) in bytes.iter().enumerate() {
        value |= ((byte & VARINT_PAYLOAD) as u64) << shift;
        if byte & VARINT_CONTINUE == 0 {
            if value > MAX_SAFE_INTEGER {
                return Err(CodecError::Overflow);
            }
            return Ok((value, i + 1));
        }
        shift += VARINT_GROUP_BITS;
        // another group could only land past bit 53
        if shift > VARINT_MAX_SHIFT {
            trace!(len = i + 1, "varint longer than 53 bits");
            return Err(CodecError::Overflow);
        }
    }
    trace!(available = bytes.len(), "varint ran off the end of the buffer");
    Err(CodecError::truncated(bytes.len() + 1, bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(encode_varint(0u8).unwrap().as_slice(), &[0x00]);
        assert_eq!(encode_varint(127u8).unwrap().as_slice(), &[0x7f]);
        assert_eq!(encode_varint(128u8).unwrap().as_slice(), &[0x80, 0x01]);
        assert_eq!(encode_varint(300u16).unwrap().as_slice(), &[0xac, 0x02]);
        assert_eq!(encode_varint(16_384u32).unwrap().as_slice(), &[0x80, 0x80, 0x01]);
    }

    #[test]
    fn max_safe() {
        let enc = encode_varint(MAX_SAFE_INTEGER).unwrap();
        assert_eq!(enc.len(), MAX_VARINT_LEN);
        assert_eq!(enc.as_slice(), &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x0f]);
        assert_eq!(decode_varint(&enc).unwrap(), (MAX_SAFE_INTEGER, MAX_VARINT_LEN));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(encode_varint(-1i64), Err(CodecError::InvalidInput(_))));
        assert!(matches!(encode_varint(0.5f64), Err(CodecError::InvalidInput(_))));
        assert!(matches!(encode_varint(std::f64::NAN), Err(CodecError::InvalidInput(_))));
        assert!(matches!(
            encode_varint(std::f64::INFINITY),
            Err(CodecError::InvalidInput(_))
        ));
        assert!(matches!(
            encode_varint(MAX_SAFE_INTEGER + 1),
            Err(CodecError::InvalidInput(_))
        ));
        // whole floats are fine
        assert_eq!(encode_varint(300.0f64).unwrap().as_slice(), &[0xac, 0x02]);
    }

    #[test]
    fn len_matches_encoding() {
        for &v in &[0, 1, 127, 128, 255, 16_383, 16_384, 1 << 35, MAX_SAFE_INTEGER] {
            let enc = encode_varint(v).unwrap();
            assert_eq!(varint_len(v), enc.len());
            assert_eq!(decode_varint(&enc).unwrap(), (v, enc.len()));
        }
    }

    #[test]
    fn truncated() {
        assert_eq!(decode_varint(&[]), Err(CodecError::truncated(1, 0)));
        assert_eq!(decode_varint(&[0xff, 0xff]), Err(CodecError::truncated(3, 2)));
    }

    #[test]
    fn overflow() {
        // nine groups is past 53 bits no matter what they hold
        assert_eq!(decode_varint(&[0x80; 9]), Err(CodecError::Overflow));
        // eight groups with the top group over the limit
        let too_big = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x10];
        assert_eq!(decode_varint(&too_big), Err(CodecError::Overflow));
        // eight continuation bytes overflow before the input runs out
        assert_eq!(decode_varint(&[0xff; 8]), Err(CodecError::Overflow));
        assert_eq!(decode_varint(&[0x80; 8]), Err(CodecError::Overflow));
        // seven are still just short
        assert_eq!(decode_varint(&[0xff; 7]), Err(CodecError::truncated(8, 7)));
    }
}
