//! Leaf codecs.
//!
//! Integers and floats are fixed-width and little endian. Floats travel as their IEEE
//! 754 bit patterns, so every NaN payload survives. Signed integers are written in
//! two's complement.
//!
//! [`Text`] and [`Raw`] are variable-stride and write no length of their own: whatever
//! composite contains them is responsible for delimiting them.

use super::Codec;
use crate::{
    encoding::{Reader, Serializer, BOOL_FALSE, BOOL_TRUE},
    errors::*,
    float::Float,
    int::Int,
    Stride, Value,
};
use byteorder::{ByteOrder, LittleEndian};
use bytes::Bytes;

/// Writes the low `width` bytes of `n`, little endian.
#[inline]
fn put_le(out: &mut Vec<u8>, n: u64, width: usize) {
    let mut buf = [0u8; 8];
    LittleEndian::write_uint(&mut buf, n, width);
    out.put_slice(&buf[..width]);
}

/// Reads a little-endian integer that must fill `bytes` exactly.
#[inline]
fn get_le(bytes: &[u8], width: usize) -> CodecResult<u64> {
    let mut r = Reader::new(bytes);
    let n = LittleEndian::read_uint(r.read_many(width)?, width);
    r.finish()?;
    Ok(n)
}

macro_rules! le_codec {
    ($(#[$doc:meta])* $name:ident, $label:expr, $width:expr, $outer:ident :: $inner:ident, $bits:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Codec for $name {
            fn stride(&self) -> Stride { Stride::Fixed($width) }

            fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
                match value {
                    Value::$outer($outer::$inner(n)) => {
                        put_le(out, *n as $bits as u64, $width);
                        Ok(())
                    }
                    other => Err(CodecError::mismatch($label, other.type_name())),
                }
            }

            fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
                let bits = get_le(bytes, $width)? as $bits;
                Ok(Value::$outer($outer::$inner(bits as _)))
            }
        }
    };
}

le_codec!(
    /// Unsigned 8-bit integer.
    U8, "u8", 1, Int::U8, u8
);
le_codec!(
    /// Unsigned 16-bit integer.
    U16, "u16", 2, Int::U16, u16
);
le_codec!(
    /// Unsigned 32-bit integer.
    U32, "u32", 4, Int::U32, u32
);
le_codec!(
    /// Unsigned 64-bit integer.
    U64, "u64", 8, Int::U64, u64
);
le_codec!(
    /// Signed 8-bit integer.
    I8, "i8", 1, Int::I8, u8
);
le_codec!(
    /// Signed 16-bit integer.
    I16, "i16", 2, Int::I16, u16
);
le_codec!(
    /// Signed 32-bit integer.
    I32, "i32", 4, Int::I32, u32
);
le_codec!(
    /// Signed 64-bit integer.
    I64, "i64", 8, Int::I64, u64
);
le_codec!(
    /// Half-precision float.
    F16, "f16", 2, Float::Half, u16
);
le_codec!(
    /// Single-precision float.
    F32, "f32", 4, Float::Single, u32
);
le_codec!(
    /// Double-precision float.
    F64, "f64", 8, Float::Double, u64
);

/// A boolean in one byte. Any nonzero byte decodes as `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bool;

impl Codec for Bool {
    fn stride(&self) -> Stride { Stride::Fixed(1) }

    fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
        match value {
            Value::Bool(b) => {
                out.put_u8(if *b { BOOL_TRUE } else { BOOL_FALSE });
                Ok(())
            }
            other => Err(CodecError::mismatch("bool", other.type_name())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
        Ok(Value::Bool(get_le(bytes, 1)? != 0))
    }
}

/// UTF-8 text, with no length of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Text;

impl Codec for Text {
    fn stride(&self) -> Stride { Stride::Variable }

    fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
        match value {
            Value::Text(s) => {
                out.put_slice(s.as_bytes());
                Ok(())
            }
            other => Err(CodecError::mismatch("text", other.type_name())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
        Ok(Value::Text(String::from_utf8(bytes.to_vec())?))
    }
}

/// Raw bytes, passed through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Raw;

impl Codec for Raw {
    fn stride(&self) -> Stride { Stride::Variable }

    fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
        match value {
            Value::Bytes(b) => {
                out.put_slice(b);
                Ok(())
            }
            other => Err(CodecError::mismatch("bytes", other.type_name())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Value> { Ok(Value::Bytes(Bytes::from(bytes))) }
}

/// Exactly `n` raw bytes: a digest, a key, an address.
///
/// # Example
///
/// ```
/// use kcodec::prelude::*;
///
/// let digest = FixedBytes::new(4);
/// assert_eq!(digest.stride(), Stride::Fixed(4));
///
/// let ok = Value::Bytes(Bytes::from(vec![1, 2, 3, 4]));
/// assert_eq!(digest.encode(&ok).unwrap(), vec![1, 2, 3, 4]);
///
/// let short = Value::Bytes(Bytes::from(vec![1, 2, 3]));
/// assert_eq!(
///     digest.encode(&short),
///     Err(CodecError::SizeMismatch { expected: 4, actual: 3 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedBytes(usize);

impl FixedBytes {
    /// A codec for byte strings of exactly `len` bytes.
    pub fn new(len: usize) -> Self { FixedBytes(len) }

    /// The required length.
    pub fn len(&self) -> usize { self.0 }

    /// Is the required length zero?
    pub fn is_empty(&self) -> bool { self.0 == 0 }

    fn check(&self, actual: usize) -> CodecResult<()> {
        if actual == self.0 {
            Ok(())
        } else {
            Err(CodecError::SizeMismatch {
                expected: self.0,
                actual,
            })
        }
    }
}

impl Codec for FixedBytes {
    fn stride(&self) -> Stride { Stride::Fixed(self.0) }

    fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
        match value {
            Value::Bytes(b) => {
                self.check(b.len())?;
                out.put_slice(b);
                Ok(())
            }
            other => Err(CodecError::mismatch("bytes", other.type_name())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
        self.check(bytes.len())?;
        Ok(Value::Bytes(Bytes::from(bytes)))
    }
}
