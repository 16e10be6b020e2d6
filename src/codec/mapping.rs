use super::{
    vector::{decode_run, encode_run},
    Codec, CodecRef, Tuple,
};
use crate::{errors::*, Stride, Value};
use std::convert::TryFrom;

/// Key-value entries.
///
/// On the wire a mapping is exactly a [`Vector`](super::Vector) of `(key, value)`
/// [`Tuple`]s, in the order the entries are given. Nothing is sorted and nothing is
/// deduplicated: decoding hands back every entry, repeats included, and it is up to the
/// reader whether a later key overrides an earlier one.
///
/// # Example
///
/// ```
/// use kcodec::prelude::*;
///
/// let c = Mapping::new(codec(Text), codec(U8));
/// let m = Value::Map(vec![("a".into(), 1u8.into()), ("b".into(), 2u8.into())]);
///
/// assert_eq!(
///     c.encode(&m).unwrap(),
///     vec![0x03, 0x01, b'a', 0x01, 0x03, 0x01, b'b', 0x02]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Mapping {
    entry: Tuple,
}

impl Mapping {
    /// Creates a mapping from `key` values to `value` values.
    pub fn new(key: CodecRef, value: CodecRef) -> Self {
        Mapping {
            entry: Tuple::new(vec![key, value]),
        }
    }

    /// The key codec.
    pub fn key(&self) -> &CodecRef { &self.entry.children()[0] }

    /// The value codec.
    pub fn value(&self) -> &CodecRef { &self.entry.children()[1] }
}

impl Codec for Mapping {
    fn stride(&self) -> Stride { Stride::Variable }

    fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
        match value {
            Value::Map(entries) => {
                encode_run(self.entry.stride(), entries.iter(), out, |(k, v), buf| {
                    self.entry.encode_fields([k, v], buf)
                })
            }
            other => Err(CodecError::mismatch("map", other.type_name())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
        let entries = decode_run(self.entry.stride(), bytes, |span| {
            let fields = self.entry.decode_fields(span)?;
            let found = fields.len();
            let [k, v] = <[Value; 2]>::try_from(fields)
                .map_err(|_| CodecError::ArityMismatch { expected: 2, found })?;
            Ok((k, v))
        })?;
        Ok(Value::Map(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::*;

    fn entry(k: &str, v: u16) -> (Value, Value) { (k.into(), v.into()) }

    #[test]
    fn order_is_preserved() {
        let c = Mapping::new(codec(Text), codec(U16));
        let fwd = Value::Map(vec![entry("x", 1), entry("y", 2)]);
        let rev = Value::Map(vec![entry("y", 2), entry("x", 1)]);

        let fwd_bytes = c.encode(&fwd).unwrap();
        assert_ne!(fwd_bytes, c.encode(&rev).unwrap());
        assert_eq!(c.decode(&fwd_bytes).unwrap(), fwd);
    }

    #[test]
    fn duplicates_survive() {
        let c = Mapping::new(codec(Text), codec(U16));
        let m = Value::Map(vec![entry("k", 1), entry("k", 2)]);
        let bytes = c.encode(&m).unwrap();
        assert_eq!(c.decode(&bytes).unwrap(), m);
    }

    #[test]
    fn fixed_entries_are_packed() {
        let c = Mapping::new(codec(U8), codec(U16));
        let m = Value::Map(vec![(1u8.into(), 0x0203u16.into()), (4u8.into(), 5u16.into())]);
        let bytes = c.encode(&m).unwrap();
        assert_eq!(bytes, vec![1, 0x03, 0x02, 4, 5, 0]);
        assert_eq!(c.decode(&bytes).unwrap(), m);
        assert_eq!(c.decode(&bytes[..5]), Err(CodecError::truncated(3, 2)));
    }

    #[test]
    fn same_bytes_as_a_vector_of_pairs() {
        let map = Mapping::new(codec(Text), codec(U8));
        let vec = Vector::new(codec(Tuple::new(vec![codec(Text), codec(U8)])));

        let m = Value::Map(vec![("a".into(), 1u8.into()), ("bc".into(), 2u8.into())]);
        let s = Value::Seq(vec![
            Value::Tuple(vec!["a".into(), 1u8.into()]),
            Value::Tuple(vec!["bc".into(), 2u8.into()]),
        ]);
        assert_eq!(map.encode(&m).unwrap(), vec.encode(&s).unwrap());
    }

    #[test]
    fn empty_and_wrong_kind() {
        let c = Mapping::new(codec(Text), codec(Text));
        assert_eq!(c.encode(&Value::Map(vec![])).unwrap(), Vec::<u8>::new());
        assert_eq!(c.decode(&[]).unwrap(), Value::Map(vec![]));
        assert_eq!(
            c.encode(&Value::Seq(vec![])),
            Err(CodecError::mismatch("map", "seq"))
        );
        assert_eq!(c.key().stride(), Stride::Variable);
        assert_eq!(c.value().stride(), Stride::Variable);
    }
}
