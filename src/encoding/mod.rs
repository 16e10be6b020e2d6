//! # Byte-level machinery
//!
//! Varints, the output [`Serializer`] trait, the input [`Reader`] cursor, and helpers
//! for framing whole messages.
//!
//! Codecs never record their own top-level length: a decoder must be handed exactly
//! the bytes of one message. When a message travels on its own (over a socket, into a
//! log file), frame it with [`encode_framed`] and read it back with [`decode_framed`]
//! or [`Frames`].
//!
//! # Example
//!
//! ```
//! use kcodec::prelude::*;
//!
//! let point = codec(Tuple::new(vec![codec(U8), codec(Text)]));
//! let msg = Value::Tuple(vec![Value::from(7u8), Value::from("hi")]);
//!
//! let mut wire = Vec::new();
//! encode_framed(&*point, &msg, &mut wire).unwrap();
//! encode_framed(&*point, &msg, &mut wire).unwrap();
//!
//! // one varint length in front of each message
//! assert_eq!(wire[..5], [0x04, 0x07, 0x02, b'h', b'i']);
//!
//! let decoded: Vec<Value> = Frames::new(&*point, &wire).collect::<Result<_, _>>().unwrap();
//! assert_eq!(decoded, vec![msg.clone(), msg]);
//! ```

use crate::{codec::Codec, errors::*, Value};

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
pub mod varint;
pub use varint::*;
mod constants;
pub(crate) use constants::*;
pub use constants::{MAX_SAFE_INTEGER, MAX_VARINT_LEN};

/// Encodes `value` with `codec` and appends it to `out` behind a varint length.
///
/// # Arguments
///
/// * `codec` - The codec describing the message.
/// * `value` - The message.
/// * `out` - Where the framed bytes are appended.
pub fn encode_framed<S: Serializer + ?Sized>(
    codec: &dyn Codec,
    value: &Value,
    out: &mut S,
) -> CodecResult<()> {
    let body = codec.encode(value)?;
    out.put_prefixed(&body)
}

/// Decodes one framed message from the front of `bytes`, returning it together with
/// the number of bytes the frame occupied.
///
/// # Errors
///
/// Fails with [`CodecError::Truncated`] if the frame is incomplete, or with whatever
/// error `codec` reports for the message body.
pub fn decode_framed(codec: &dyn Codec, bytes: &[u8]) -> CodecResult<(Value, usize)> {
    let mut reader = Reader::new(bytes);
    let body = reader.read_prefixed()?;
    let value = codec.decode(body)?;
    Ok((value, bytes.len() - reader.remaining()))
}

/// An iterator over back-to-back framed messages.
///
/// Iteration stops after the buffer is exhausted or after the first error.
#[derive(Debug)]
pub struct Frames<'a, 'c> {
    codec: &'c dyn Codec,
    reader: Reader<'a>,
    failed: bool,
}

impl<'a, 'c> Frames<'a, 'c> {
    /// Creates an iterator over the frames in `bytes`.
    pub fn new(codec: &'c dyn Codec, bytes: &'a [u8]) -> Self {
        Frames {
            codec,
            reader: Reader::new(bytes),
            failed: false,
        }
    }
}

impl<'a, 'c> Iterator for Frames<'a, 'c> {
    type Item = CodecResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        let res = self
            .reader
            .read_prefixed()
            .and_then(|body| self.codec.decode(body));
        self.failed = res.is_err();
        Some(res)
    }
}
