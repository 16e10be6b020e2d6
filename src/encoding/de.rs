use super::varint::decode_varint;
use crate::errors::*;
use std::convert::TryFrom;
use tracing::trace;

/// A cursor over a borrowed input buffer.
///
/// Every read either returns a sub-slice of the original buffer and advances past it,
/// or fails with [`CodecError::Truncated`] and leaves the cursor where it was.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    /// Creates a reader positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self { Reader { bytes } }

    /// Bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize { self.bytes.len() }

    /// Has everything been consumed?
    #[inline]
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    /// Looks at the next byte without consuming it.
    #[inline]
    pub fn peek_byte(&self) -> CodecResult<u8> {
        self.bytes
            .first()
            .copied()
            .ok_or_else(|| CodecError::truncated(1, 0))
    }

    /// Consumes one byte.
    #[inline]
    pub fn take_byte(&mut self) -> CodecResult<u8> {
        let byte = self.peek_byte()?;
        self.bytes = &self.bytes[1..];
        Ok(byte)
    }

    /// Consumes exactly `len` bytes.
    #[inline]
    pub fn read_many(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if self.bytes.len() >= len {
            let (head, tail) = self.bytes.split_at(len);
            self.bytes = tail;
            Ok(head)
        } else {
            trace!(needed = len, available = self.bytes.len(), "short read");
            Err(CodecError::truncated(len, self.bytes.len()))
        }
    }

    /// Consumes a varint.
    #[inline]
    pub fn read_varint(&mut self) -> CodecResult<u64> {
        let (value, used) = decode_varint(self.bytes)?;
        self.bytes = &self.bytes[used..];
        Ok(value)
    }

    /// Consumes a varint length and then that many bytes.
    #[inline]
    pub fn read_prefixed(&mut self) -> CodecResult<&'a [u8]> {
        let start = *self;
        let len = self.read_varint()?;
        let len = match usize::try_from(len) {
            Ok(len) => len,
            Err(_) => {
                *self = start;
                return Err(CodecError::truncated(usize::MAX, start.remaining()));
            }
        };
        match self.read_many(len) {
            Ok(bs) => Ok(bs),
            Err(e) => {
                *self = start;
                Err(e)
            }
        }
    }

    /// Consumes whatever is left.
    #[inline]
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = self.bytes;
        self.bytes = &[];
        rest
    }

    /// Succeeds only if the input has been fully consumed.
    #[inline]
    pub fn finish(self) -> CodecResult<()> {
        if self.bytes.is_empty() {
            Ok(())
        } else {
            Err(CodecError::TrailingBytes(self.bytes.len()))
        }
    }
}
