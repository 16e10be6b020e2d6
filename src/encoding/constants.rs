/// Low seven bits of a varint byte, 0x7f
pub(crate) const VARINT_PAYLOAD: u8 = 0b0111_1111;
/// Varint continuation bit, 0x80
pub(crate) const VARINT_CONTINUE: u8 = 0b1000_0000;
/// Bits of payload carried by one varint byte.
pub(crate) const VARINT_GROUP_BITS: u32 = 7;
/// Varints carry at most 53 bits of payload, so the last legal shift is 49.
pub(crate) const VARINT_MAX_SHIFT: u32 = 49;
/// Largest varint that fits the 53-bit safe integer range, `2^53 - 1`.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;
/// Longest encoding of a safe integer, `ceil(53 / 7)`.
pub const MAX_VARINT_LEN: usize = 8;

/// Option flag for an absent value.
pub(crate) const OPT_NONE: u8 = 0x00;
/// Option flag for a present value.
pub(crate) const OPT_SOME: u8 = 0x01;

/// `false` on the wire.
pub(crate) const BOOL_FALSE: u8 = 0x00;
/// `true` on the wire.
pub(crate) const BOOL_TRUE: u8 = 0x01;

/// Enum indices are a single byte.
pub(crate) const MAX_VARIANTS: usize = 256;
