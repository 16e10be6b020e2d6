pub use crate::{
    codec::*,
    encoding::{
        decode_framed, decode_varint, encode_framed, encode_varint, varint_len, Frames,
        Reader, Serializer, SerializerExt, MAX_SAFE_INTEGER,
    },
    errors::{CodecError, CodecResult},
    float::Float,
    int::Int,
    rep::*,
    stride::Stride,
    vecmap::VecMap,
    Value,
};
pub use bytes::Bytes;
pub use half::f16;
pub use std::convert::TryFrom;
