//! Fixed-width integers as carried by [`Value::Int`](crate::Value::Int).

use crate::{from_fn, try_from_variant};
use std::fmt;

/// An integer together with its wire width and signedness.
///
/// Integer codecs only accept the variant matching their width, so a
/// [`U16`](crate::codec::U16) codec rejects an `Int::I32` even if the number would fit.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
pub enum Int {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

use Int::*;

from_fn!(Int, i8, I8);
from_fn!(Int, i16, I16);
from_fn!(Int, i32, I32);
from_fn!(Int, i64, I64);
from_fn!(Int, u8, U8);
from_fn!(Int, u16, U16);
from_fn!(Int, u32, U32);
from_fn!(Int, u64, U64);

try_from_variant!(i8, Int::I8);
try_from_variant!(i16, Int::I16);
try_from_variant!(i32, Int::I32);
try_from_variant!(i64, Int::I64);
try_from_variant!(u8, Int::U8);
try_from_variant!(u16, Int::U16);
try_from_variant!(u32, Int::U32);
try_from_variant!(u64, Int::U64);

impl Int {
    /// The Rust name of the width, e.g. `"u16"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            I8(_) => "i8",
            I16(_) => "i16",
            I32(_) => "i32",
            I64(_) => "i64",
            U8(_) => "u8",
            U16(_) => "u16",
            U32(_) => "u32",
            U64(_) => "u64",
        }
    }

    /// Widens to an `i128`, which holds every variant exactly.
    pub fn to_i128(self) -> i128 {
        match self {
            I8(i) => i as i128,
            I16(i) => i as i128,
            I32(i) => i as i128,
            I64(i) => i as i128,
            U8(u) => u as i128,
            U16(u) => u as i128,
            U32(u) => u as i128,
            U64(u) => u as i128,
        }
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.to_i128(), self.type_name())
    }
}
