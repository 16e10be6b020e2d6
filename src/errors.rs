use failure::Fail;

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
/// An error encountered while encoding or decoding.
///
/// Errors are never recovered from inside a codec: the first failure aborts the whole
/// call and is returned to the caller unchanged.
pub enum CodecError {
    /// A varint was asked to encode a negative, fractional, non-finite, or too-large
    /// number.
    #[fail(display = "invalid varint input: {}", _0)]
    InvalidInput(String),

    /// A decoded varint does not fit in 53 bits.
    #[fail(display = "varint overflowed 53 bits")]
    Overflow,

    /// The input ended before a read could complete.
    #[fail(display = "tried to read {} bytes from buffer of size {}", needed, available)]
    Truncated {
        /// Bytes the read required.
        needed: usize,
        /// Bytes that were left.
        available: usize,
    },

    /// An enum tag name that was never registered, or an index byte past the last
    /// variant.
    #[fail(display = "invalid enum variant: {}", _0)]
    InvalidVariant(String),

    /// A fixed-length byte codec was handed the wrong number of bytes.
    #[fail(display = "expected exactly {} bytes, got {}", expected, actual)]
    SizeMismatch {
        /// The codec's fixed length.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// Bytes were left over after a codec consumed its span.
    #[fail(display = "{} trailing bytes after decoding", _0)]
    TrailingBytes(usize),

    /// A value of the wrong kind was handed to a codec.
    #[fail(display = "expected a {} value, found {}", expected, found)]
    TypeMismatch {
        /// What the codec accepts.
        expected: &'static str,
        /// What it was given.
        found: &'static str,
    },

    /// A tuple value had the wrong number of elements.
    #[fail(display = "expected {} elements, found {}", expected, found)]
    ArityMismatch {
        /// The codec's arity.
        expected: usize,
        /// The value's length.
        found: usize,
    },

    /// A struct value lacked a declared field.
    #[fail(display = "missing field `{}`", _0)]
    MissingField(String),

    /// A text codec decoded bytes that are not UTF-8.
    #[fail(display = "invalid utf-8 in text")]
    InvalidUtf8,

    /// A composite codec was constructed from an inconsistent description.
    #[fail(display = "invalid schema: {}", _0)]
    Schema(String),
}

impl CodecError {
    /// Creates a [`CodecError::Truncated`].
    pub fn truncated(needed: usize, available: usize) -> Self {
        CodecError::Truncated { needed, available }
    }

    /// Creates a [`CodecError::TypeMismatch`].
    pub fn mismatch(expected: &'static str, found: &'static str) -> Self {
        CodecError::TypeMismatch { expected, found }
    }
}

impl From<std::string::FromUtf8Error> for CodecError {
    fn from(_: std::string::FromUtf8Error) -> Self { CodecError::InvalidUtf8 }
}

/// Result alias used throughout the crate.
pub type CodecResult<T> = Result<T, CodecError>;
