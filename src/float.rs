use crate::from_fn;
use half::f16;
use std::{convert::TryFrom, fmt};

/// A float stored as its IEEE 754 bit pattern, so that values compare, order, and hash
/// by representation and NaN payloads survive a round trip.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
pub enum Float {
    Half(u16),
    Single(u32),
    Double(u64),
}

use Float::*;

from_fn!(Float, f16, |f: f16| Half(f.to_bits()));
from_fn!(Float, f32, |f: f32| Single(f.to_bits()));
from_fn!(Float, f64, |f: f64| Double(f.to_bits()));

impl TryFrom<Float> for f16 {
    type Error = Float;

    fn try_from(f: Float) -> Result<Self, Float> {
        match f {
            Half(n) => Ok(f16::from_bits(n)),
            _ => Err(f),
        }
    }
}

impl TryFrom<Float> for f32 {
    type Error = Float;

    fn try_from(f: Float) -> Result<Self, Float> {
        match f {
            Single(n) => Ok(f32::from_bits(n)),
            _ => Err(f),
        }
    }
}

impl TryFrom<Float> for f64 {
    type Error = Float;

    fn try_from(f: Float) -> Result<Self, Float> {
        match f {
            Double(n) => Ok(f64::from_bits(n)),
            _ => Err(f),
        }
    }
}

impl Float {
    /// The Rust name of the width, e.g. `"f32"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Half(_) => "f16",
            Single(_) => "f32",
            Double(_) => "f64",
        }
    }

    /// The value as an `f64`; exact for every variant.
    pub fn to_f64(self) -> f64 {
        match self {
            Half(n) => f16::from_bits(n).to_f64(),
            Single(n) => f32::from_bits(n) as f64,
            Double(n) => f64::from_bits(n),
        }
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.to_f64(), self.type_name())
    }
}
