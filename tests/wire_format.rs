use kcodec::prelude::*;
use std::collections::BTreeMap;

#[test]
fn varint_boundaries() {
    assert_eq!(encode_varint(127u32).unwrap().len(), 1);
    assert_eq!(encode_varint(128u32).unwrap().as_slice(), &[0x80, 0x01]);
    assert_eq!(encode_varint(300u32).unwrap().as_slice(), &[0xac, 0x02]);
    for &n in &[0u64, 1, 127, 128, 300, 16_383, 16_384, MAX_SAFE_INTEGER] {
        let enc = encode_varint(n).unwrap();
        assert_eq!(decode_varint(&enc).unwrap(), (n, enc.len()));
    }
}

#[test]
fn struct_field_order_matters() {
    let ab = Struct::new(vec![("a", codec(U8)), ("b", codec(U8))]).unwrap();
    let ba = Struct::new(vec![("b", codec(U8)), ("a", codec(U8))]).unwrap();
    let v = Value::record(vec![("a", Value::from(1u8)), ("b", Value::from(2u8))]);
    assert_eq!(ab.encode(&v).unwrap(), vec![1, 2]);
    assert_eq!(ba.encode(&v).unwrap(), vec![2, 1]);
}

#[test]
fn enum_indices_ignore_declaration_order() {
    let orders = vec![vec!["B", "A"], vec!["A", "B"]];
    for order in orders {
        let e = Enum::new(order.into_iter().map(|n| (n, codec(U8)))).unwrap();
        assert_eq!(e.encode(&Value::variant("A", 0u8)).unwrap(), vec![0, 0]);
        assert_eq!(e.encode(&Value::variant("B", 0u8)).unwrap(), vec![1, 0]);
        assert_eq!(e.decode(&[1, 9]).unwrap(), Value::variant("B", 9u8));
    }
}

#[test]
fn vector_modes() {
    let shorts = Vector::new(codec(U16));
    assert_eq!(
        shorts.encode_rep(&vec![1u16, 513]).unwrap(),
        vec![0x01, 0x00, 0x01, 0x02]
    );

    let strs = Vector::new(codec(Text));
    assert_eq!(
        strs.encode_rep(&vec!["a".to_string(), "bc".to_string()])
            .unwrap(),
        vec![0x01, b'a', 0x02, b'b', b'c']
    );
}

#[test]
fn tuple_prefixes_its_last_child() {
    let t = Tuple::new(vec![codec(U8), codec(Text)]);
    assert_eq!(
        t.encode_rep(&(7u8, "hi".to_string())).unwrap(),
        vec![0x07, 0x02, 0x68, 0x69]
    );
}

#[test]
fn options() {
    let o = Optional::new(codec(U8));
    assert_eq!(o.encode_rep(&None::<u8>).unwrap(), vec![0x00]);
    assert_eq!(o.encode_rep(&Some(7u8)).unwrap(), vec![0x01, 0x07]);
}

#[test]
fn mapping_preserves_order() {
    let m = Mapping::new(codec(Text), codec(U32));

    let mut ordered = BTreeMap::new();
    ordered.insert("alpha".to_string(), 1u32);
    ordered.insert("beta".to_string(), 2u32);
    ordered.insert("gamma".to_string(), 3u32);

    let bytes = m.encode_rep(&ordered).unwrap();
    let entries = match m.decode(&bytes).unwrap() {
        Value::Map(entries) => entries,
        other => panic!("expected a map, got {:?}", other),
    };
    let keys: Vec<Value> = entries.into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        vec![Value::from("alpha"), Value::from("beta"), Value::from("gamma")]
    );
    assert_eq!(m.decode_rep::<BTreeMap<String, u32>>(&bytes).unwrap(), ordered);
}

#[test]
fn mapping_is_a_vector_of_pairs() {
    let m = Mapping::new(codec(U8), codec(Text));
    let v = Vector::new(codec(Tuple::new(vec![codec(U8), codec(Text)])));
    let pairs = vec![(1u8, "x".to_string()), (2u8, "yz".to_string())];

    let as_map: VecMap<u8, String> = pairs.iter().cloned().collect();
    assert_eq!(m.encode_rep(&as_map).unwrap(), v.encode_rep(&pairs).unwrap());
}

#[test]
fn composite_user_record() {
    let shape = codec(
        Enum::new(vec![
            ("Circle", codec(F32)),
            ("Rect", codec(Tuple::new(vec![codec(F32), codec(F32)]))),
            ("Dot", codec(Tuple::new(vec![]))),
        ])
        .unwrap(),
    );
    let drawing = Struct::new(vec![
        ("id", codec(FixedBytes::new(4))),
        ("title", codec(Optional::new(codec(Text)))),
        ("shapes", codec(Vector::new(shape))),
        ("tags", codec(Mapping::new(codec(Text), codec(Bool)))),
    ])
    .unwrap();

    let v = Value::record(vec![
        ("id", Value::Bytes(Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]))),
        ("title", Value::some("sketch")),
        (
            "shapes",
            Value::Seq(vec![
                Value::variant("Dot", Value::unit()),
                Value::variant("Circle", 1.5f32),
                Value::variant("Rect", Value::Tuple(vec![2f32.into(), 3f32.into()])),
            ]),
        ),
        (
            "tags",
            Value::Map(vec![("draft".into(), true.into()), ("draft".into(), false.into())]),
        ),
    ]);

    let bytes = drawing.encode(&v).unwrap();
    assert_eq!(&bytes[..4], &[0xde, 0xad, 0xbe, 0xef]);
    // title: varint(7), present flag, "sketch"
    assert_eq!(&bytes[4..12], &[7, 1, b's', b'k', b'e', b't', b'c', b'h']);
    assert_eq!(drawing.decode(&bytes).unwrap(), v);
}
