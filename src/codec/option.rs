use super::{Codec, CodecRef};
use crate::{
    encoding::{Reader, Serializer, OPT_NONE, OPT_SOME},
    errors::*,
    Stride, Value,
};

/// A value that may be absent.
///
/// One flag byte, `0x00` for absent and `0x01` for present, followed by the child's
/// encoding when present. The child is not length-prefixed: it owns the rest of the
/// span. When decoding, any nonzero flag counts as present.
///
/// # Example
///
/// ```
/// use kcodec::prelude::*;
///
/// let c = Optional::new(codec(U8));
/// assert_eq!(c.encode(&Value::none()).unwrap(), vec![0x00]);
/// assert_eq!(c.encode(&Value::some(7u8)).unwrap(), vec![0x01, 0x07]);
/// ```
#[derive(Debug, Clone)]
pub struct Optional {
    child: CodecRef,
}

impl Optional {
    /// Creates an optional `child`.
    pub fn new(child: CodecRef) -> Self { Optional { child } }

    /// The codec of the present value.
    pub fn child(&self) -> &CodecRef { &self.child }
}

impl Codec for Optional {
    fn stride(&self) -> Stride { Stride::Variable }

    fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
        match value {
            Value::Opt(None) => {
                out.put_u8(OPT_NONE);
                Ok(())
            }
            Value::Opt(Some(inner)) => {
                out.put_u8(OPT_SOME);
                self.child.encode_into(inner, out)
            }
            other => Err(CodecError::mismatch("option", other.type_name())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
        let mut reader = Reader::new(bytes);
        if reader.take_byte()? == OPT_NONE {
            reader.finish()?;
            return Ok(Value::Opt(None));
        }
        let inner = self.child.decode(reader.read_rest())?;
        Ok(Value::Opt(Some(Box::new(inner))))
    }
}
