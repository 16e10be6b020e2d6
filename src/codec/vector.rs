//! Homogeneous runs of values whose count is never written.

use super::{Codec, CodecRef};
use crate::{
    encoding::{Reader, SerializerExt},
    errors::*,
    Stride, Value,
};

/// The element width when elements can be laid back to back, `None` when each needs a
/// length prefix.
///
/// Zero-width elements are prefixed too, since a count could not be recovered from
/// zero bytes.
#[inline]
fn element_width(stride: Stride) -> Option<usize> {
    match stride {
        Stride::Fixed(n) if n > 0 => Some(n),
        _ => None,
    }
}

/// Writes a run of elements: raw if they have a nonzero fixed width, each behind a
/// varint length otherwise.
pub(crate) fn encode_run<T, I, F>(stride: Stride, items: I, out: &mut Vec<u8>, mut enc: F) -> CodecResult<()>
where
    I: ExactSizeIterator<Item = T>,
    F: FnMut(T, &mut Vec<u8>) -> CodecResult<()>,
{
    match element_width(stride) {
        Some(n) => {
            out.reserve(items.len() * n);
            for item in items {
                enc(item, out)?;
            }
        }
        None => {
            let mut scratch = Vec::new();
            for item in items {
                scratch.clear();
                enc(item, &mut scratch)?;
                out.put_prefixed(&scratch)?;
            }
        }
    }
    Ok(())
}

/// Reads a run written by [`encode_run`], consuming all of `bytes`.
///
/// # Errors
///
/// With a fixed width, a trailing partial element fails with
/// [`CodecError::Truncated`]. With prefixes, so does a length running past the end.
pub(crate) fn decode_run<T, F>(stride: Stride, bytes: &[u8], mut dec: F) -> CodecResult<Vec<T>>
where
    F: FnMut(&[u8]) -> CodecResult<T>,
{
    let mut reader = Reader::new(bytes);
    let width = element_width(stride);
    let mut out = Vec::with_capacity(width.map_or(0, |n| bytes.len() / n));
    while !reader.is_empty() {
        let span = match width {
            Some(n) => reader.read_many(n)?,
            None => reader.read_prefixed()?,
        };
        out.push(dec(span)?);
    }
    Ok(out)
}

/// Zero or more values of one codec.
///
/// The number of elements is never written, so a vector must be handed exactly its own
/// bytes when decoding. Nested inside a tuple or struct that is taken care of, since a
/// vector always reports [`Stride::Variable`] and so is always length-prefixed.
///
/// # Example
///
/// ```
/// use kcodec::prelude::*;
///
/// let shorts = Vector::new(codec(U16));
/// let v = Value::Seq(vec![1u16.into(), 513u16.into()]);
/// assert_eq!(shorts.encode(&v).unwrap(), vec![0x01, 0x00, 0x01, 0x02]);
///
/// let words = Vector::new(codec(Text));
/// let v = Value::Seq(vec!["a".into(), "bc".into()]);
/// assert_eq!(words.encode(&v).unwrap(), vec![0x01, b'a', 0x02, b'b', b'c']);
/// ```
#[derive(Debug, Clone)]
pub struct Vector {
    child: CodecRef,
}

impl Vector {
    /// Creates a vector of `child` values.
    pub fn new(child: CodecRef) -> Self { Vector { child } }

    /// The element codec.
    pub fn child(&self) -> &CodecRef { &self.child }
}

impl Codec for Vector {
    fn stride(&self) -> Stride { Stride::Variable }

    fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
        match value {
            Value::Seq(items) => encode_run(self.child.stride(), items.iter(), out, |item, buf| {
                self.child.encode_into(item, buf)
            }),
            other => Err(CodecError::mismatch("seq", other.type_name())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
        let items = decode_run(self.child.stride(), bytes, |span| self.child.decode(span))?;
        Ok(Value::Seq(items))
    }
}
