use super::{Codec, CodecRef, Tuple};
use crate::{errors::*, vecmap::VecMap, Stride, Value};

/// A tuple whose positions have names.
///
/// The wire format is exactly that of a [`Tuple`] over the field codecs, in
/// declaration order. Names never reach the wire, so declaration order is part of the
/// format: two structs with the same fields in a different order are incompatible.
///
/// Encoding looks each declared field up by name, so the value's own field order does
/// not matter, but it must carry exactly the declared fields. Decoding returns the fields
/// in declaration order, which compares equal to the encoded value since struct
/// equality ignores field order.
///
/// # Example
///
/// ```
/// use kcodec::prelude::*;
///
/// let ab = Struct::new(vec![("a", codec(U8)), ("b", codec(U8))]).unwrap();
/// let ba = Struct::new(vec![("b", codec(U8)), ("a", codec(U8))]).unwrap();
///
/// let v = Value::record(vec![("a", Value::from(1u8)), ("b", Value::from(2u8))]);
///
/// assert_eq!(ab.encode(&v).unwrap(), vec![1, 2]);
/// assert_eq!(ba.encode(&v).unwrap(), vec![2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Struct {
    names: Vec<String>,
    tuple: Tuple,
}

impl Struct {
    /// Creates a struct codec from `(name, codec)` pairs in wire order.
    ///
    /// # Errors
    ///
    /// Fails with [`CodecError::Schema`] if a name appears twice.
    pub fn new<I, S>(fields: I) -> CodecResult<Self>
    where
        I: IntoIterator<Item = (S, CodecRef)>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        let mut children = Vec::new();
        for (name, child) in fields {
            let name = name.into();
            if names.contains(&name) {
                return Err(CodecError::Schema(format!("duplicate field `{}`", name)));
            }
            names.push(name);
            children.push(child);
        }
        Ok(Struct {
            names,
            tuple: Tuple::new(children),
        })
    }

    /// Field names in wire order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> { self.names.iter().map(String::as_str) }

    /// `(name, codec)` pairs in wire order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &CodecRef)> {
        self.field_names().zip(self.tuple.children())
    }

    /// The underlying positional codec.
    pub fn as_tuple(&self) -> &Tuple { &self.tuple }
}

impl Codec for Struct {
    fn stride(&self) -> Stride { self.tuple.stride() }

    fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
        let fields = match value {
            Value::Struct(fields) => fields,
            other => return Err(CodecError::mismatch("struct", other.type_name())),
        };
        let projected = self
            .names
            .iter()
            .map(|name| {
                fields
                    .get(name.as_str())
                    .ok_or_else(|| CodecError::MissingField(name.clone()))
            })
            .collect::<CodecResult<Vec<&Value>>>()?;
        // every declared name matched, so anything beyond that is undeclared
        if fields.len() != self.names.len() {
            return Err(CodecError::ArityMismatch {
                expected: self.names.len(),
                found: fields.len(),
            });
        }
        self.tuple.encode_fields(projected, out)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
        let values = self.tuple.decode_fields(bytes)?;
        let mut fields = VecMap::with_capacity(values.len());
        for (name, value) in self.names.iter().zip(values) {
            fields.insert(name.clone(), value);
        }
        Ok(Value::Struct(fields))
    }
}
