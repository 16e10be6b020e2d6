//! # kcodec
//!
//! kcodec is a composable binary serialization layer. A handful of leaf codecs
//! (integers, floats, booleans, text, raw bytes) combine with a handful of composite
//! codecs (tuples, structs, vectors, options, enums, mappings) into a codec graph that
//! pins down the exact byte layout of arbitrarily nested data.
//!
//! There is no schema on the wire and no type tags: producer and consumer must build
//! the same codec graph.
//!
//! # Usage
//!
//! Build a codec graph once, then encode and decode [`Value`]s with it. Codecs are
//! immutable and [`Send`] + [`Sync`], so one graph can be shared between threads.
//!
//! ```
//! use kcodec::prelude::*;
//!
//! let user = Struct::new(vec![
//!     ("id", codec(U32)),
//!     ("name", codec(Text)),
//!     ("email", codec(Optional::new(codec(Text)))),
//! ])
//! .unwrap();
//!
//! let alice = Value::record(vec![
//!     ("id", Value::from(7u32)),
//!     ("name", Value::from("alice")),
//!     ("email", Value::none()),
//! ]);
//!
//! let bytes = user.encode(&alice).unwrap();
//! assert_eq!(bytes, vec![7, 0, 0, 0, 5, b'a', b'l', b'i', b'c', b'e', 1, 0]);
//! assert_eq!(user.decode(&bytes).unwrap(), alice);
//! ```
//!
//! Plain Rust types convert to and from [`Value`] through [`ValueRep`], and
//! [`CodecExt`](codec::CodecExt) uses that to skip the intermediate step:
//!
//! ```
//! use kcodec::prelude::*;
//!
//! let pairs = Mapping::new(codec(Text), codec(U16));
//!
//! let mut m = VecMap::new();
//! m.insert("x".to_string(), 1u16);
//! m.insert("y".to_string(), 2u16);
//!
//! let bytes = pairs.encode_rep(&m).unwrap();
//! let back: VecMap<String, u16> = pairs.decode_rep(&bytes).unwrap();
//! assert_eq!(back, m);
//! ```
//!
//! # Strides
//!
//! Every codec declares a [`Stride`]: either a fixed byte count or variable. Composite
//! codecs use it to decide, child by child, whether a length prefix is needed. Fixed
//! children are written raw; variable children are preceded by their length as a
//! varint (unsigned LEB128, see [`encoding::varint`]).
//!
//! A decoder must be handed exactly the bytes of its value. Composites carve out the
//! span of each child, but nothing records the length of a top-level message: frame
//! standalone messages with [`encoding::encode_framed`].
//!
//! # Specification
//!
//! This section describes the wire format.
//!
//! ## Leaves
//!
//! | Codec                            | Stride    | Layout                          |
//! | ---                              | ---       | ---                             |
//! | `U8` `I8`                        | 1         | one byte                        |
//! | `U16` `I16` `F16`                | 2         | little endian                   |
//! | `U32` `I32` `F32`                | 4         | little endian                   |
//! | `U64` `I64` `F64`                | 8         | little endian                   |
//! | `Bool`                           | 1         | `0x00` or `0x01`; any nonzero byte decodes as `true` |
//! | `Text`                           | variable  | UTF-8, no length                |
//! | `Raw`                            | variable  | the bytes, no length            |
//! | `FixedBytes(n)`                  | n         | exactly `n` bytes               |
//!
//! ## Tuples and structs
//!
//! Children are concatenated in declaration order. A fixed-stride child is written
//! raw; a variable-stride child is written as `varint(len) ++ bytes`, including the
//! last child. The stride is the sum of the children's strides if they are all fixed,
//! and variable otherwise.
//!
//! A struct is a tuple whose children have names. Field order is part of the wire
//! format: the same fields declared in a different order are incompatible.
//!
//! ## Vectors
//!
//! The element count is never written.
//!
//! * Fixed-stride elements are concatenated; the count is `len / stride`. A trailing
//!   partial element is an error.
//! * Variable-stride (or zero-width) elements are each written as
//!   `varint(len) ++ bytes`, until the buffer is exhausted.
//!
//! ## Options
//!
//! `0x00` for absent, or `0x01` followed by the child's encoding. Any nonzero flag
//! decodes as present.
//!
//! ## Enums
//!
//! One byte holding the variant's index, followed by the variant's encoding. Indices
//! come from sorting the variant names bytewise, so they do not depend on declaration
//! order. At most 256 variants.
//!
//! ## Mappings
//!
//! Encoded exactly as a vector of `(key, value)` tuples, in iteration order. Entries
//! are neither sorted nor deduplicated.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces
)]

pub mod codec;
pub mod encoding;
pub mod errors;
pub mod float;
pub mod int;
pub mod prelude;
pub mod rep;
pub mod stride;
mod util;
pub mod vecmap;

use bytes::Bytes;
use float::Float;
use half::f16;
use int::Int;
use rep::ValueRep;
use std::convert::TryFrom;
use vecmap::VecMap;

pub use errors::{CodecError, CodecResult};
pub use stride::Stride;

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// A dynamically typed value, the input to encoding and the output of decoding.
///
/// # Example
///
/// ```
/// use kcodec::prelude::*;
///
/// let v = Value::Tuple(vec![Value::from(7u8), Value::from("hi")]);
///
/// let n = match &v {
///     Value::Tuple(items) => items.len(),
///     _ => panic!(),
/// };
///
/// assert_eq!(n, 2);
/// ```
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Fixed-width integer.
    Int(Int),
    /// Float, stored as its bit pattern.
    ///
    /// ```
    /// use kcodec::prelude::*;
    ///
    /// let f = Value::Float(Float::Single(1f32.to_bits()));
    /// assert_eq!(f, Value::from(1f32));
    /// ```
    Float(Float),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Bytes(Bytes),
    /// Positional, heterogeneous elements.
    Tuple(Vec<Value>),
    /// Named fields.
    Struct(VecMap<String, Value>),
    /// Homogeneous elements.
    Seq(Vec<Value>),
    /// A value that may be absent.
    Opt(Option<Box<Value>>),
    /// A tagged union: variant name and payload.
    Variant(String, Box<Value>),
    /// Key-value entries in wire order. Duplicate keys are kept.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// The empty tuple, used as the payload of variants that carry nothing.
    pub fn unit() -> Value { Value::Tuple(Vec::new()) }

    /// An absent optional value.
    pub fn none() -> Value { Value::Opt(None) }

    /// A present optional value.
    pub fn some<V: Into<Value>>(v: V) -> Value { Value::Opt(Some(Box::new(v.into()))) }

    /// An enum variant.
    ///
    /// ```
    /// use kcodec::prelude::*;
    ///
    /// let v = Value::variant("Circle", 3u8);
    /// assert_eq!(v, Value::Variant("Circle".to_string(), Box::new(Value::from(3u8))));
    /// ```
    pub fn variant<S: Into<String>, V: Into<Value>>(name: S, v: V) -> Value {
        Value::Variant(name.into(), Box::new(v.into()))
    }

    /// A struct value from `(name, value)` pairs.
    pub fn record<I, S>(fields: I) -> Value
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Value::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// A short description of the value's kind, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(i) => i.type_name(),
            Value::Float(f) => f.type_name(),
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Tuple(_) => "tuple",
            Value::Struct(_) => "struct",
            Value::Seq(_) => "seq",
            Value::Opt(_) => "option",
            Value::Variant(..) => "variant",
            Value::Map(_) => "map",
        }
    }

    /// Converts into any [`ValueRep`] type.
    ///
    /// # Example
    ///
    /// ```
    /// use kcodec::prelude::*;
    ///
    /// let v = Value::from(vec![Value::from(1u8), Value::from(2u8)]);
    /// let numbers: Vec<u8> = v.into_rep().unwrap();
    /// assert_eq!(numbers, vec![1, 2]);
    /// ```
    pub fn into_rep<T: ValueRep>(self) -> CodecResult<T> { T::from_value(self) }

    /// Borrows the elements of a [`Value::Tuple`] or [`Value::Seq`].
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(v) | Value::Seq(v) => Some(v),
            _ => None,
        }
    }

    /// Borrows the fields of a [`Value::Struct`].
    pub fn as_fields(&self) -> Option<&VecMap<String, Value>> {
        match self {
            Value::Struct(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up a field of a [`Value::Struct`].
    pub fn field(&self, name: &str) -> Option<&Value> { self.as_fields()?.get(name) }
}

// Integers
compose_from!(Value, Int, i8);
compose_from!(Value, Int, i16);
compose_from!(Value, Int, i32);
compose_from!(Value, Int, i64);
compose_from!(Value, Int, u8);
compose_from!(Value, Int, u16);
compose_from!(Value, Int, u32);
compose_from!(Value, Int, u64);

// Floats
compose_from!(Value, Float, f16);
compose_from!(Value, Float, f32);
compose_from!(Value, Float, f64);

from_fn!(Value, bool, Value::Bool);
from_fn!(Value, Int, Value::Int);
from_fn!(Value, Float, Value::Float);
from_fn!(Value, String, Value::Text);
from_fn!(Value, &str, |s: &str| Value::Text(s.to_string()));
from_fn!(Value, Bytes, Value::Bytes);
from_fn!(Value, Vec<Value>, Value::Seq);
from_fn!(Value, VecMap<String, Value>, Value::Struct);
from_fn!(Value, Option<Value>, |o: Option<Value>| Value::Opt(o.map(Box::new)));

try_from_variant!(bool, Value::Bool);
try_from_variant!(String, Value::Text);
try_from_variant!(Bytes, Value::Bytes);
try_from_variant!(VecMap<String, Value>, Value::Struct);

impl TryFrom<Value> for Int {
    type Error = Value;

    fn try_from(v: Value) -> Result<Int, Value> {
        match v {
            Value::Int(i) => Ok(i),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for Float {
    type Error = Value;

    fn try_from(v: Value) -> Result<Float, Value> {
        match v {
            Value::Float(f) => Ok(f),
            other => Err(other),
        }
    }
}
