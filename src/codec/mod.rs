//! # Codecs
//!
//! The [`Codec`] trait and every codec the crate ships: fixed-width leaves in
//! [`primitive`], and the composites [`Tuple`], [`Struct`], [`Vector`], [`Optional`],
//! [`Enum`], and [`Mapping`].
//!
//! Composites hold their children as [`CodecRef`]s, so any type implementing [`Codec`]
//! can be nested, and one child can be shared by several parents.
//!
//! # Example
//!
//! ```
//! use kcodec::prelude::*;
//!
//! let name = codec(Text);
//! let pair = Tuple::new(vec![codec(U8), name.clone()]);
//! let names = Vector::new(name);
//!
//! assert_eq!(pair.encode(&Value::Tuple(vec![7u8.into(), "hi".into()])).unwrap(), vec![0x07, 0x02, b'h', b'i']);
//! assert_eq!(names.stride(), Stride::Variable);
//! ```

use crate::{errors::*, rep::ValueRep, Stride, Value};
use std::{fmt::Debug, sync::Arc};

pub mod enumeration;
pub mod mapping;
pub mod option;
pub mod primitive;
pub mod structure;
pub mod tuple;
pub mod vector;

pub use enumeration::Enum;
pub use mapping::Mapping;
pub use option::Optional;
pub use primitive::*;
pub use structure::Struct;
pub use tuple::Tuple;
pub use vector::Vector;

/// Describes how one kind of value is laid out in bytes.
///
/// Implementations must be pure: the same value always encodes to the same bytes, and
/// `decode(encode(v)) == v` for every `v` the codec accepts. A codec reporting
/// [`Stride::Fixed(n)`](Stride::Fixed) must always produce exactly `n` bytes.
pub trait Codec: Debug + Send + Sync {
    /// The encoded size of this codec's values.
    fn stride(&self) -> Stride;

    /// Appends the encoding of `value` to `out`.
    ///
    /// # Errors
    ///
    /// Fails if `value` is not in this codec's domain. Whatever was appended to `out`
    /// before the failure should be discarded.
    fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()>;

    /// Decodes a value from exactly `bytes`.
    ///
    /// # Errors
    ///
    /// Fails if `bytes` is not exactly one well-formed encoding.
    fn decode(&self, bytes: &[u8]) -> CodecResult<Value>;

    /// Encodes `value` into a fresh buffer.
    fn encode(&self, value: &Value) -> CodecResult<Vec<u8>> {
        let mut out = Vec::with_capacity(self.stride().fixed().unwrap_or(0));
        self.encode_into(value, &mut out)?;
        Ok(out)
    }
}

/// A shared handle to a codec, as held by composite codecs.
pub type CodecRef = Arc<dyn Codec>;

/// Wraps a codec so it can be used as a child of a composite.
pub fn codec<C: Codec + 'static>(c: C) -> CodecRef { Arc::new(c) }

impl<C: Codec + ?Sized> Codec for Arc<C> {
    fn stride(&self) -> Stride { (**self).stride() }

    fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
        (**self).encode_into(value, out)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Value> { (**self).decode(bytes) }
}

/// Typed encoding and decoding through [`ValueRep`].
pub trait CodecExt: Codec {
    /// Encodes any [`ValueRep`] type.
    fn encode_rep<T: ValueRep>(&self, t: &T) -> CodecResult<Vec<u8>> {
        self.encode(&t.to_value())
    }

    /// Decodes into any [`ValueRep`] type.
    fn decode_rep<T: ValueRep>(&self, bytes: &[u8]) -> CodecResult<T> {
        T::from_value(self.decode(bytes)?)
    }
}

impl<C: Codec + ?Sized> CodecExt for C {}

/// Writes one child of a composite: raw if its stride is fixed, behind a varint
/// length otherwise.
pub(crate) fn encode_child(child: &dyn Codec, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
    use crate::encoding::SerializerExt;
    match child.stride() {
        Stride::Fixed(_n) => {
            let start = out.len();
            child.encode_into(value, out)?;
            debug_assert_eq!(out.len() - start, _n, "{:?} broke its fixed stride", child);
            Ok(())
        }
        Stride::Variable => {
            let body = child.encode(value)?;
            out.put_prefixed(&body)
        }
    }
}

/// Reads the span of one child written by [`encode_child`].
pub(crate) fn child_span<'a>(
    child: &dyn Codec,
    reader: &mut crate::encoding::Reader<'a>,
) -> CodecResult<&'a [u8]> {
    match child.stride() {
        Stride::Fixed(n) => reader.read_many(n),
        Stride::Variable => reader.read_prefixed(),
    }
}
