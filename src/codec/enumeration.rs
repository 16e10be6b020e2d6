//! Tagged unions.
//!
//! Variant indices come from the sorted variant names, not from declaration order, so
//! two enums built from the same variants in any order share a wire format. Adding a
//! variant can renumber the ones that sort after it.

use super::{Codec, CodecRef};
use crate::{
    encoding::{Reader, Serializer, MAX_VARIANTS},
    errors::*,
    Stride, Value,
};
use tracing::trace;

/// One of several named variants, each with its own codec.
///
/// Written as a single index byte followed by the variant's encoding, which owns the
/// rest of the span.
///
/// # Example
///
/// ```
/// use kcodec::prelude::*;
///
/// let shape = Enum::new(vec![
///     ("Square", codec(U8)),
///     ("Circle", codec(U8)),
/// ])
/// .unwrap();
///
/// // "Circle" sorts first
/// assert_eq!(shape.index_of("Circle"), Some(0));
/// assert_eq!(shape.encode(&Value::variant("Square", 4u8)).unwrap(), vec![1, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Enum {
    variants: Vec<(String, CodecRef)>,
}

impl Enum {
    /// Creates an enum codec from `(name, codec)` pairs in any order.
    ///
    /// # Errors
    ///
    /// Fails with [`CodecError::Schema`] on a repeated name or more than 256 variants.
    pub fn new<I, S>(variants: I) -> CodecResult<Self>
    where
        I: IntoIterator<Item = (S, CodecRef)>,
        S: Into<String>,
    {
        let mut variants: Vec<(String, CodecRef)> =
            variants.into_iter().map(|(n, c)| (n.into(), c)).collect();
        if variants.len() > MAX_VARIANTS {
            return Err(CodecError::Schema(format!(
                "{} variants, at most {} fit an index byte",
                variants.len(),
                MAX_VARIANTS
            )));
        }

        variants.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(w) = variants.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(CodecError::Schema(format!("duplicate variant `{}`", w[0].0)));
        }

        for (ix, (name, _)) in variants.iter().enumerate() {
            trace!(index = ix, variant = name.as_str(), "enum variant");
        }
        Ok(Enum { variants })
    }

    /// The index byte of the variant called `name`.
    pub fn index_of(&self, name: &str) -> Option<u8> {
        self.variants
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .ok()
            .map(|ix| ix as u8)
    }

    /// Variant names, in index order.
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|(n, _)| n.as_str())
    }

    /// The number of variants.
    pub fn len(&self) -> usize { self.variants.len() }

    /// Does this enum have no variants? Such an enum can encode nothing.
    pub fn is_empty(&self) -> bool { self.variants.is_empty() }
}

impl Codec for Enum {
    fn stride(&self) -> Stride { Stride::Variable }

    fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
        let (name, payload) = match value {
            Value::Variant(name, payload) => (name, payload),
            other => return Err(CodecError::mismatch("variant", other.type_name())),
        };
        let ix = self
            .index_of(name)
            .ok_or_else(|| CodecError::InvalidVariant(format!("unknown tag `{}`", name)))?;
        out.put_u8(ix);
        self.variants[ix as usize].1.encode_into(payload, out)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
        let mut reader = Reader::new(bytes);
        let ix = reader.take_byte()? as usize;
        let (name, child) = match self.variants.get(ix) {
            Some(v) => v,
            None => {
                trace!(index = ix, variants = self.variants.len(), "enum index out of range");
                return Err(CodecError::InvalidVariant(format!(
                    "index {} out of range for {} variants",
                    ix,
                    self.variants.len()
                )));
            }
        };
        let payload = child.decode(reader.read_rest())?;
        Ok(Value::Variant(name.clone(), Box::new(payload)))
    }
}
