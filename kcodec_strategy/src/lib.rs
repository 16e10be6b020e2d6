use kcodec::prelude::*;
use proptest::{prelude::*, strategy::Union};

/// A codec graph as plain data, so proptest can generate and shrink it.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F16,
    F32,
    F64,
    Bool,
    Text,
    Raw,
    FixedBytes(usize),
    Tuple(Vec<Schema>),
    Struct(Vec<(String, Schema)>),
    Vector(Box<Schema>),
    Optional(Box<Schema>),
    Enum(Vec<(String, Schema)>),
    Mapping(Box<Schema>, Box<Schema>),
}

impl Schema {
    /// Builds the codec graph this schema describes.
    pub fn build(&self) -> CodecResult<CodecRef> {
        Ok(match self {
            Schema::U8 => codec(U8),
            Schema::U16 => codec(U16),
            Schema::U32 => codec(U32),
            Schema::U64 => codec(U64),
            Schema::I8 => codec(I8),
            Schema::I16 => codec(I16),
            Schema::I32 => codec(I32),
            Schema::I64 => codec(I64),
            Schema::F16 => codec(F16),
            Schema::F32 => codec(F32),
            Schema::F64 => codec(F64),
            Schema::Bool => codec(Bool),
            Schema::Text => codec(Text),
            Schema::Raw => codec(Raw),
            Schema::FixedBytes(n) => codec(FixedBytes::new(*n)),
            Schema::Tuple(children) => codec(Tuple::new(
                children.iter().map(Schema::build).collect::<CodecResult<Vec<_>>>()?,
            )),
            Schema::Struct(fields) => codec(Struct::new(build_named(fields)?)?),
            Schema::Vector(child) => codec(Vector::new(child.build()?)),
            Schema::Optional(child) => codec(Optional::new(child.build()?)),
            Schema::Enum(variants) => codec(Enum::new(build_named(variants)?)?),
            Schema::Mapping(k, v) => codec(Mapping::new(k.build()?, v.build()?)),
        })
    }
}

fn build_named(named: &[(String, Schema)]) -> CodecResult<Vec<(String, CodecRef)>> {
    named
        .iter()
        .map(|(name, s)| Ok((name.clone(), s.build()?)))
        .collect()
}

/// arbitrary schema for use with proptest
pub fn arb_schema() -> impl Strategy<Value = Schema> {
    let leaf = prop_oneof![
        // integers
        Just(Schema::U8),
        Just(Schema::U16),
        Just(Schema::U32),
        Just(Schema::U64),
        Just(Schema::I8),
        Just(Schema::I16),
        Just(Schema::I32),
        Just(Schema::I64),
        // floats
        Just(Schema::F16),
        Just(Schema::F32),
        Just(Schema::F64),
        // misc
        Just(Schema::Bool),
        Just(Schema::Text),
        Just(Schema::Raw),
        (0..6usize).prop_map(Schema::FixedBytes),
    ];
    leaf.prop_recursive(
        4,  // max depth
        24, // max nodes
        4,  // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Schema::Tuple),
                prop::collection::vec(inner.clone(), 0..4).prop_map(|fields| {
                    Schema::Struct(
                        fields
                            .into_iter()
                            .enumerate()
                            .map(|(i, s)| (format!("f{}", i), s))
                            .collect(),
                    )
                }),
                inner.clone().prop_map(|s| Schema::Vector(Box::new(s))),
                inner.clone().prop_map(|s| Schema::Optional(Box::new(s))),
                prop::collection::btree_map("[a-zA-Z]{1,6}", inner.clone(), 1..4)
                    .prop_map(|m| Schema::Enum(m.into_iter().collect())),
                (inner.clone(), inner)
                    .prop_map(|(k, v)| Schema::Mapping(Box::new(k), Box::new(v))),
            ]
        },
    )
}

/// arbitrary bytes for use with proptest
pub fn arb_bytes(len: impl Into<prop::collection::SizeRange>) -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), len).prop_map(Bytes::from)
}

/// One value from each strategy, in order.
fn all_of<I>(strategies: I) -> BoxedStrategy<Vec<Value>>
where
    I: IntoIterator<Item = BoxedStrategy<Value>>,
{
    strategies
        .into_iter()
        .fold(Just(Vec::new()).boxed(), |acc, s| {
            (acc, s)
                .prop_map(|(mut vals, v)| {
                    vals.push(v);
                    vals
                })
                .boxed()
        })
}

/// arbitrary value accepted by the codec `schema` describes
pub fn arb_value(schema: &Schema) -> BoxedStrategy<Value> {
    match schema {
        Schema::U8 => any::<u8>().prop_map(Value::from).boxed(),
        Schema::U16 => any::<u16>().prop_map(Value::from).boxed(),
        Schema::U32 => any::<u32>().prop_map(Value::from).boxed(),
        Schema::U64 => any::<u64>().prop_map(Value::from).boxed(),
        Schema::I8 => any::<i8>().prop_map(Value::from).boxed(),
        Schema::I16 => any::<i16>().prop_map(Value::from).boxed(),
        Schema::I32 => any::<i32>().prop_map(Value::from).boxed(),
        Schema::I64 => any::<i64>().prop_map(Value::from).boxed(),
        // floats as raw bit patterns, NaN payloads included
        Schema::F16 => any::<u16>().prop_map(|b| Value::Float(Float::Half(b))).boxed(),
        Schema::F32 => any::<u32>().prop_map(|b| Value::Float(Float::Single(b))).boxed(),
        Schema::F64 => any::<u64>().prop_map(|b| Value::Float(Float::Double(b))).boxed(),
        Schema::Bool => any::<bool>().prop_map(Value::from).boxed(),
        Schema::Text => any::<String>().prop_map(Value::from).boxed(),
        Schema::Raw => arb_bytes(0..16).prop_map(Value::Bytes).boxed(),
        Schema::FixedBytes(n) => arb_bytes(*n).prop_map(Value::Bytes).boxed(),
        Schema::Tuple(children) => all_of(children.iter().map(arb_value))
            .prop_map(Value::Tuple)
            .boxed(),
        Schema::Struct(fields) => {
            let names: Vec<String> = fields.iter().map(|(n, _)| n.clone()).collect();
            all_of(fields.iter().map(|(_, s)| arb_value(s)))
                .prop_map(move |vals| Value::record(names.clone().into_iter().zip(vals)))
                .boxed()
        }
        Schema::Vector(child) => prop::collection::vec(arb_value(child), 0..5)
            .prop_map(Value::Seq)
            .boxed(),
        Schema::Optional(child) => prop::option::of(arb_value(child))
            .prop_map(|o| Value::Opt(o.map(Box::new)))
            .boxed(),
        Schema::Enum(variants) => {
            let options: Vec<BoxedStrategy<Value>> = variants
                .iter()
                .map(|(name, s)| {
                    let name = name.clone();
                    arb_value(s)
                        .prop_map(move |v| Value::variant(name.clone(), v))
                        .boxed()
                })
                .collect();
            Union::new(options).boxed()
        }
        Schema::Mapping(k, v) => prop::collection::vec((arb_value(k), arb_value(v)), 0..5)
            .prop_map(Value::Map)
            .boxed(),
    }
}

/// arbitrary schema together with a value it accepts
pub fn arb_schema_and_value() -> impl Strategy<Value = (Schema, Value)> {
    arb_schema().prop_flat_map(|s| {
        let v = arb_value(&s);
        (Just(s), v)
    })
}

/// arbitrary integer in the varint domain
pub fn arb_varint() -> impl Strategy<Value = u64> { 0..=MAX_SAFE_INTEGER }
