//! Fixed-arity, heterogeneous sequences: the composition primitive every other
//! composite builds on.

use super::{child_span, encode_child, Codec, CodecRef};
use crate::{encoding::Reader, errors::*, Stride, Value};

/// An ordered list of child codecs, one per position.
///
/// Children are written in order with no outer framing. A fixed-stride child is written
/// raw; a variable-stride child is preceded by its length as a varint, wherever it sits,
/// so a tuple can always be split back into its children.
///
/// # Example
///
/// ```
/// use kcodec::prelude::*;
///
/// let c = Tuple::new(vec![codec(U8), codec(Text)]);
/// let v = Value::Tuple(vec![7u8.into(), "hi".into()]);
///
/// // the string is prefixed even though it is last
/// assert_eq!(c.encode(&v).unwrap(), vec![0x07, 0x02, 0x68, 0x69]);
/// ```
#[derive(Debug, Clone)]
pub struct Tuple {
    children: Vec<CodecRef>,
    stride: Stride,
}

impl Tuple {
    /// Creates a tuple codec from its children, in wire order.
    pub fn new<I: IntoIterator<Item = CodecRef>>(children: I) -> Self {
        let children: Vec<CodecRef> = children.into_iter().collect();
        let stride = children.iter().map(|c| c.stride()).sum();
        Tuple { children, stride }
    }

    /// The number of positions.
    pub fn arity(&self) -> usize { self.children.len() }

    /// The child codecs, in wire order.
    pub fn children(&self) -> &[CodecRef] { &self.children }

    /// Encodes one value per child. The caller guarantees there are exactly
    /// [`arity`](Tuple::arity) of them.
    pub(crate) fn encode_fields<'v, I>(&self, fields: I, out: &mut Vec<u8>) -> CodecResult<()>
    where
        I: IntoIterator<Item = &'v Value>,
    {
        for (child, field) in self.children.iter().zip(fields) {
            encode_child(&**child, field, out)?;
        }
        Ok(())
    }

    /// Splits `bytes` into one value per child.
    pub(crate) fn decode_fields(&self, bytes: &[u8]) -> CodecResult<Vec<Value>> {
        let mut reader = Reader::new(bytes);
        let mut fields = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let span = child_span(&**child, &mut reader)?;
            fields.push(child.decode(span)?);
        }
        reader.finish()?;
        Ok(fields)
    }
}

impl Codec for Tuple {
    fn stride(&self) -> Stride { self.stride }

    fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
        match value {
            Value::Tuple(items) => {
                if items.len() != self.arity() {
                    return Err(CodecError::ArityMismatch {
                        expected: self.arity(),
                        found: items.len(),
                    });
                }
                self.encode_fields(items, out)
            }
            other => Err(CodecError::mismatch("tuple", other.type_name())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
        Ok(Value::Tuple(self.decode_fields(bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::*;

    fn tup(items: Vec<Value>) -> Value { Value::Tuple(items) }

    #[test]
    fn stride_is_sum_when_fixed() {
        assert_eq!(
            Tuple::new(vec![codec(U8), codec(U32), codec(Bool)]).stride(),
            Stride::Fixed(6)
        );
        assert_eq!(
            Tuple::new(vec![codec(U8), codec(Text)]).stride(),
            Stride::Variable
        );
        assert_eq!(Tuple::new(vec![]).stride(), Stride::Fixed(0));
    }

    #[test]
    fn fixed_children_are_raw() {
        let c = Tuple::new(vec![codec(U8), codec(U16)]);
        let v = tup(vec![1u8.into(), 0x0203u16.into()]);
        let bytes = c.encode(&v).unwrap();
        assert_eq!(bytes, vec![0x01, 0x03, 0x02]);
        assert_eq!(c.decode(&bytes).unwrap(), v);
    }

    #[test]
    fn every_variable_child_is_prefixed() {
        let c = Tuple::new(vec![codec(Text), codec(U8), codec(Text)]);
        let v = tup(vec!["ab".into(), 9u8.into(), "".into()]);
        let bytes = c.encode(&v).unwrap();
        assert_eq!(bytes, vec![0x02, b'a', b'b', 0x09, 0x00]);
        assert_eq!(c.decode(&bytes).unwrap(), v);
    }

    #[test]
    fn nested_tuples() {
        let inner = codec(Tuple::new(vec![codec(U8), codec(Text)]));
        let outer = Tuple::new(vec![inner.clone(), inner]);
        let half = tup(vec![7u8.into(), "hi".into()]);
        let v = tup(vec![half.clone(), half]);
        let bytes = outer.encode(&v).unwrap();
        assert_eq!(
            bytes,
            vec![0x04, 0x07, 0x02, b'h', b'i', 0x04, 0x07, 0x02, b'h', b'i']
        );
        assert_eq!(outer.decode(&bytes).unwrap(), v);
    }

    #[test]
    fn empty_tuple() {
        let c = Tuple::new(vec![]);
        assert_eq!(c.encode(&Value::unit()).unwrap(), Vec::<u8>::new());
        assert_eq!(c.decode(&[]).unwrap(), Value::unit());
        assert_eq!(c.decode(&[0]), Err(CodecError::TrailingBytes(1)));
    }

    #[test]
    fn arity_and_kind_are_checked() {
        let c = Tuple::new(vec![codec(U8), codec(U8)]);
        assert_eq!(
            c.encode(&tup(vec![1u8.into()])),
            Err(CodecError::ArityMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            c.encode(&Value::Seq(vec![])),
            Err(CodecError::mismatch("tuple", "seq"))
        );
    }

    #[test]
    fn truncated_input() {
        let c = Tuple::new(vec![codec(U8), codec(Text)]);
        assert_eq!(c.decode(&[0x07, 0x05, b'h']), Err(CodecError::truncated(5, 1)));
        assert_eq!(c.decode(&[0x07]), Err(CodecError::truncated(1, 0)));
    }
}
