//! Conversions between Rust types and [`Value`].
//!
//! Codecs only ever see [`Value`]s. [`ValueRep`] lets ordinary Rust data stand in for
//! them: integers and floats map to the variant of the same width, strings to text,
//! [`Vec`]s to sequences, tuples to tuples, and the map types to [`Value::Map`].

use crate::{errors::*, float::Float, int::Int, vecmap::VecMap, Value};
use bytes::Bytes;
use half::f16;
use std::{
    collections::{BTreeMap, HashMap},
    convert::TryFrom,
    hash::{BuildHasher, Hash},
    net::{Ipv4Addr, SocketAddrV4},
};

/// A value representable as a [`Value`].
pub trait ValueRep: Clone + Sized {
    /// Converts to a [`Value`].
    ///
    /// # Example
    ///
    /// ```
    /// use kcodec::prelude::*;
    ///
    /// assert_eq!(1u8.to_value(), Value::Int(Int::U8(1)));
    /// ```
    fn to_value(&self) -> Value { self.clone().into_value() }

    /// Consumes `self`, converting it to a [`Value`].
    fn into_value(self) -> Value { self.to_value() }

    /// Converts back from a [`Value`].
    ///
    /// # Errors
    ///
    /// Fails with [`CodecError::TypeMismatch`] or [`CodecError::ArityMismatch`] if the
    /// value has the wrong shape.
    ///
    /// # Example
    ///
    /// ```
    /// use kcodec::prelude::*;
    ///
    /// let v = "foo".to_string().into_value();
    /// assert_eq!(String::from_value(v).unwrap(), "foo");
    /// assert!(u8::from_value(Value::from(true)).is_err());
    /// ```
    fn from_value(v: Value) -> CodecResult<Self>;
}

macro_rules! number_rep {
    ($t:ty, $outer:ident, $label:expr) => {
        impl ValueRep for $t {
            fn into_value(self) -> Value { self.into() }

            fn from_value(v: Value) -> CodecResult<Self> {
                let found = v.type_name();
                $outer::try_from(v)
                    .ok()
                    .and_then(|n| <$t>::try_from(n).ok())
                    .ok_or_else(|| CodecError::mismatch($label, found))
            }
        }
    };
}

number_rep!(u8, Int, "u8");
number_rep!(u16, Int, "u16");
number_rep!(u32, Int, "u32");
number_rep!(u64, Int, "u64");
number_rep!(i8, Int, "i8");
number_rep!(i16, Int, "i16");
number_rep!(i32, Int, "i32");
number_rep!(i64, Int, "i64");
number_rep!(f16, Float, "f16");
number_rep!(f32, Float, "f32");
number_rep!(f64, Float, "f64");

macro_rules! variant_rep {
    ($t:ty, $label:expr) => {
        impl ValueRep for $t {
            fn into_value(self) -> Value { self.into() }

            fn from_value(v: Value) -> CodecResult<Self> {
                let found = v.type_name();
                <$t>::try_from(v).map_err(|_| CodecError::mismatch($label, found))
            }
        }
    };
}

variant_rep!(bool, "bool");
variant_rep!(Int, "integer");
variant_rep!(Float, "float");
variant_rep!(Bytes, "bytes");
variant_rep!(String, "text");

impl ValueRep for Value {
    fn into_value(self) -> Value { self }

    fn from_value(v: Value) -> CodecResult<Self> { Ok(v) }
}

impl<T: ValueRep> ValueRep for Vec<T> {
    fn into_value(self) -> Value { Value::Seq(self.into_iter().map(T::into_value).collect()) }

    fn to_value(&self) -> Value { Value::Seq(self.iter().map(T::to_value).collect()) }

    fn from_value(v: Value) -> CodecResult<Self> {
        match v {
            Value::Seq(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(CodecError::mismatch("seq", other.type_name())),
        }
    }
}

impl<T: ValueRep> ValueRep for Option<T> {
    fn into_value(self) -> Value { Value::Opt(self.map(|x| Box::new(x.into_value()))) }

    fn to_value(&self) -> Value { Value::Opt(self.as_ref().map(|x| Box::new(x.to_value()))) }

    fn from_value(v: Value) -> CodecResult<Self> {
        match v {
            Value::Opt(None) => Ok(None),
            Value::Opt(Some(x)) => Ok(Some(T::from_value(*x)?)),
            other => Err(CodecError::mismatch("option", other.type_name())),
        }
    }
}

/// Unwraps a [`Value::Tuple`] of exactly `arity` elements.
fn tuple_items(v: Value, arity: usize) -> CodecResult<std::vec::IntoIter<Value>> {
    match v {
        Value::Tuple(items) if items.len() == arity => Ok(items.into_iter()),
        Value::Tuple(items) => Err(CodecError::ArityMismatch {
            expected: arity,
            found: items.len(),
        }),
        other => Err(CodecError::mismatch("tuple", other.type_name())),
    }
}

impl ValueRep for () {
    fn into_value(self) -> Value { Value::unit() }

    fn from_value(v: Value) -> CodecResult<()> {
        tuple_items(v, 0)?;
        Ok(())
    }
}

macro_rules! tuple_rep {
    ($arity:expr; $($t:ident . $ix:tt),+) => {
        impl<$($t: ValueRep),+> ValueRep for ($($t,)+) {
            fn into_value(self) -> Value { Value::Tuple(vec![$(self.$ix.into_value()),+]) }

            fn to_value(&self) -> Value { Value::Tuple(vec![$(self.$ix.to_value()),+]) }

            fn from_value(v: Value) -> CodecResult<Self> {
                let mut items = tuple_items(v, $arity)?;
                Ok(($(
                    $t::from_value(items.next().ok_or(CodecError::ArityMismatch {
                        expected: $arity,
                        found: $ix,
                    })?)?,
                )+))
            }
        }
    };
}

tuple_rep!(1; A.0);
tuple_rep!(2; A.0, B.1);
tuple_rep!(3; A.0, B.1, C.2);
tuple_rep!(4; A.0, B.1, C.2, D.3);

/// Unwraps the entries of a [`Value::Map`], converting keys and values.
fn map_entries<K: ValueRep, V: ValueRep>(
    v: Value,
) -> CodecResult<impl Iterator<Item = CodecResult<(K, V)>>> {
    match v {
        Value::Map(entries) => Ok(entries
            .into_iter()
            .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))),
        other => Err(CodecError::mismatch("map", other.type_name())),
    }
}

impl<K: ValueRep + Eq, V: ValueRep> ValueRep for VecMap<K, V> {
    fn into_value(self) -> Value {
        Value::Map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }

    /// Later duplicates overwrite earlier ones but keep the earlier position.
    fn from_value(v: Value) -> CodecResult<Self> { map_entries(v)?.collect() }
}

impl<K: ValueRep + Ord, V: ValueRep> ValueRep for BTreeMap<K, V> {
    fn into_value(self) -> Value {
        Value::Map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }

    fn from_value(v: Value) -> CodecResult<Self> { map_entries(v)?.collect() }
}

/// Entries are written in the map's iteration order, which for a [`HashMap`] is
/// unspecified. Use a [`BTreeMap`] or [`VecMap`] when the bytes must be reproducible.
impl<K, V, S> ValueRep for HashMap<K, V, S>
where
    K: ValueRep + Eq + Hash,
    V: ValueRep,
    S: BuildHasher + Default + Clone,
{
    fn into_value(self) -> Value {
        Value::Map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }

    fn from_value(v: Value) -> CodecResult<Self> { map_entries(v)?.collect() }
}

/// Four raw bytes, suitable for a `FixedBytes(4)` codec.
impl ValueRep for Ipv4Addr {
    fn into_value(self) -> Value { Value::Bytes(Bytes::from(&self.octets()[..])) }

    fn from_value(v: Value) -> CodecResult<Self> {
        let bs = Bytes::from_value(v)?;
        if bs.len() != 4 {
            return Err(CodecError::SizeMismatch {
                expected: 4,
                actual: bs.len(),
            });
        }
        Ok(Ipv4Addr::new(bs[0], bs[1], bs[2], bs[3]))
    }
}

/// An `(address, port)` tuple.
impl ValueRep for SocketAddrV4 {
    fn into_value(self) -> Value { (*self.ip(), self.port()).into_value() }

    fn from_value(v: Value) -> CodecResult<Self> {
        let (ip, port) = ValueRep::from_value(v)?;
        Ok(SocketAddrV4::new(ip, port))
    }
}

/// Builds a [`Value::Struct`] from named fields, for hand-written [`ValueRep`] impls.
///
/// # Example
///
/// ```
/// use kcodec::prelude::*;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Point {
///     x: i16,
///     y: i16,
/// }
///
/// impl ValueRep for Point {
///     fn to_value(&self) -> Value {
///         struct_to_value(vec![("x", self.x.to_value()), ("y", self.y.to_value())])
///     }
///
///     fn from_value(v: Value) -> CodecResult<Point> {
///         let mut fields = struct_from_value(v, &["x", "y"])?.into_iter();
///         Ok(Point {
///             x: ValueRep::from_value(fields.next().unwrap_or_else(Value::unit))?,
///             y: ValueRep::from_value(fields.next().unwrap_or_else(Value::unit))?,
///         })
///     }
/// }
///
/// let c = Struct::new(vec![("x", codec(I16)), ("y", codec(I16))]).unwrap();
/// let p = Point { x: -1, y: 2 };
/// let bytes = c.encode_rep(&p).unwrap();
/// assert_eq!(bytes, vec![0xff, 0xff, 0x02, 0x00]);
/// assert_eq!(c.decode_rep::<Point>(&bytes).unwrap(), p);
/// ```
pub fn struct_to_value(fields: Vec<(&str, Value)>) -> Value { Value::record(fields) }

/// Takes the named fields out of a [`Value::Struct`], in the order given.
///
/// # Errors
///
/// Fails with [`CodecError::MissingField`] if any name is absent.
pub fn struct_from_value(v: Value, names: &[&str]) -> CodecResult<Vec<Value>> {
    let mut fields = match v {
        Value::Struct(fields) => fields,
        other => return Err(CodecError::mismatch("struct", other.type_name())),
    };
    names
        .iter()
        .map(|name| {
            fields
                .remove(*name)
                .ok_or_else(|| CodecError::MissingField(name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<T: ValueRep + PartialEq + std::fmt::Debug>(t: T) {
        assert_eq!(T::from_value(t.to_value()).unwrap(), t);
        assert_eq!(T::from_value(t.clone().into_value()).unwrap(), t);
    }

    #[test]
    fn scalars() {
        round_trip(7u8);
        round_trip(-7i64);
        round_trip(u64::max_value());
        round_trip(1.5f32);
        round_trip(f16::from_f32(0.5));
        round_trip(true);
        round_trip("hello".to_string());
        round_trip(Bytes::from_static(b"\x00\x01"));
    }

    #[test]
    fn widths_do_not_mix() {
        assert_eq!(
            u16::from_value(Value::from(1u8)),
            Err(CodecError::mismatch("u16", "u8"))
        );
        assert_eq!(
            f64::from_value(Value::from(1f32)),
            Err(CodecError::mismatch("f64", "f32"))
        );
    }

    #[test]
    fn containers() {
        round_trip(vec![1u32, 2, 3]);
        round_trip(Some("x".to_string()));
        round_trip(None::<u8>);
        round_trip(Some(None::<bool>));
        round_trip(());
        round_trip((1u8,));
        round_trip((1u8, "a".to_string()));
        round_trip((1u8, 2i8, 3u16, vec![true]));
    }

    #[test]
    fn tuple_arity() {
        let v = Value::Tuple(vec![1u8.into()]);
        assert_eq!(
            <(u8, u8)>::from_value(v),
            Err(CodecError::ArityMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn maps_keep_or_collapse_duplicates() {
        let v = Value::Map(vec![
            ("k".into(), 1u8.into()),
            ("j".into(), 2u8.into()),
            ("k".into(), 3u8.into()),
        ]);

        let vm = VecMap::<String, u8>::from_value(v.clone()).unwrap();
        assert_eq!(vm.len(), 2);
        assert_eq!(vm.get("k"), Some(&3));
        assert_eq!(vm.keys().next().map(String::as_str), Some("k"));

        let bt = BTreeMap::<String, u8>::from_value(v.clone()).unwrap();
        assert_eq!(bt.get("k"), Some(&3));

        let hm: HashMap<String, u8> = ValueRep::from_value(v).unwrap();
        assert_eq!(hm.get("j"), Some(&2));

        let mut bt = BTreeMap::new();
        bt.insert(2u8, "b".to_string());
        bt.insert(1u8, "a".to_string());
        round_trip(bt);
    }

    #[test]
    fn addresses() {
        let addr = SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 8080);
        round_trip(addr);
        assert_eq!(
            Ipv4Addr::from_value(Value::Bytes(Bytes::from_static(&[1, 2, 3]))),
            Err(CodecError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn struct_helpers() {
        let v = struct_to_value(vec![("a", 1u8.into()), ("b", 2u8.into())]);
        assert_eq!(
            struct_from_value(v.clone(), &["b", "a"]).unwrap(),
            vec![Value::from(2u8), Value::from(1u8)]
        );
        assert_eq!(
            struct_from_value(v, &["c"]),
            Err(CodecError::MissingField("c".to_string()))
        );
    }
}
