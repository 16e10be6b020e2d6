use super::varint::*;
use crate::errors::*;
use bytes::BytesMut;

/// A sink that encoded bytes are appended to.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// Return the output value.
    fn finalize(self) -> Self::Out
    where
        Self: Sized;
}

/// Convenience methods for [`Serializer`].
pub trait SerializerExt: Serializer {
    /// Add a varint to the output value.
    ///
    /// # Arguments
    ///
    /// * `n: u64` - The value to be added.
    ///
    /// # Errors
    ///
    /// Fails with [`CodecError::InvalidInput`] if `n` is outside the safe integer range.
    fn put_varint(&mut self, n: u64) -> CodecResult<()>;

    /// Add `bytes` preceded by its length as a varint.
    ///
    /// # Arguments
    ///
    /// * `bytes: &[u8]` - The value to be added.
    fn put_prefixed(&mut self, bytes: &[u8]) -> CodecResult<()>;
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self }
}

impl Serializer for BytesMut {
    type Out = bytes::Bytes;

    fn put_u8(&mut self, u: u8) { self.extend_from_slice(&[u]) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self.freeze() }
}

impl<S: Serializer + ?Sized> SerializerExt for S {
    #[inline]
    fn put_varint(&mut self, n: u64) -> CodecResult<()> {
        let digs = encode_varint(n)?;
        self.put_slice(&digs);
        Ok(())
    }

    #[inline]
    fn put_prefixed(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.put_varint(bytes.len() as u64)?;
        self.put_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed() {
        let mut out = Vec::new();
        out.put_prefixed(b"hi").unwrap();
        out.put_prefixed(&[]).unwrap();
        assert_eq!(out, vec![0x02, b'h', b'i', 0x00]);
    }

    #[test]
    fn bytes_mut_sink() {
        let mut out = BytesMut::new();
        out.put_u8(7);
        out.put_prefixed(&[1; 200]).unwrap();
        let frozen = out.finalize();
        assert_eq!(frozen.len(), 1 + 2 + 200);
        assert_eq!(&frozen[..3], &[7, 0xc8, 0x01]);
    }
}
