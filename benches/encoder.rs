use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kcodec::prelude::*;

const N_BIG_ARR: usize = 2000;
const N_ARR: usize = 10;
const N_MAP: usize = 10;

fn big_arr() -> (Vector, Value) {
    let v: Vec<Value> = (0..N_BIG_ARR).map(|i| Value::from(i as u64)).collect();
    (Vector::new(codec(U64)), Value::Seq(v))
}

fn big_k() -> (Vector, Value) {
    let inner = codec(Vector::new(codec(I64)));
    let row = codec(Mapping::new(codec(Text), inner));
    let c = Vector::new(row);

    let v0: Vec<Value> = (0..N_ARR).map(|i| Value::from(i as i64)).collect();
    let m: Vec<(Value, Value)> = (0..N_MAP)
        .map(|i| (Value::from(format!("key-{}", i)), Value::Seq(v0.clone())))
        .collect();
    let v: Vec<Value> = std::iter::repeat(Value::Map(m)).take(N_ARR).collect();
    (c, Value::Seq(v))
}

fn bench_enc(c: &mut Criterion) {
    let (graph, big_k) = big_k();
    let enc_len = graph.encode(&big_k).unwrap().len();
    c.bench_function(
        &format!("Encoding a nested value, output size of {} bytes", enc_len),
        move |b| b.iter(|| graph.encode(black_box(&big_k)).unwrap()),
    );
}

fn bench_enc_single_alloc(c: &mut Criterion) {
    let (graph, big_k) = big_k();
    let enc_len = graph.encode(&big_k).unwrap().len();
    c.bench_function(
        &format!(
            "Encoding a nested value, output size of {} bytes, buffer preallocated",
            enc_len
        ),
        move |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(enc_len * 2);
                graph.encode_into(black_box(&big_k), &mut out).unwrap();
                out
            })
        },
    );
}

fn bench_dec(c: &mut Criterion) {
    let (graph, big_k) = big_k();
    let enc = graph.encode(&big_k).unwrap();
    c.bench_function(
        &format!("Decoding a nested value, input size of {} bytes", enc.len()),
        move |b| b.iter(|| graph.decode(black_box(&enc)).unwrap()),
    );
}

fn bench_enc_flat(c: &mut Criterion) {
    let (graph, big_arr) = big_arr();
    let enc_len = graph.encode(&big_arr).unwrap().len();
    c.bench_function(
        &format!("Encoding a flat vector, output size of {} bytes", enc_len),
        move |b| b.iter(|| graph.encode(black_box(&big_arr)).unwrap()),
    );
}

fn bench_dec_flat(c: &mut Criterion) {
    let (graph, big_arr) = big_arr();
    let enc = graph.encode(&big_arr).unwrap();
    c.bench_function(
        &format!("Decoding a flat vector of length {}", N_BIG_ARR),
        move |b| b.iter(|| graph.decode(black_box(&enc)).unwrap()),
    );
}

fn bench_varint(c: &mut Criterion) {
    c.bench_function("Encoding and decoding 1000 varints", |b| {
        b.iter(|| {
            for n in (0..1000u64).map(|i| i * 9_007_199_254) {
                let enc = encode_varint(black_box(n)).unwrap();
                black_box(decode_varint(&enc).unwrap());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_enc,
    bench_enc_single_alloc,
    bench_dec,
    bench_enc_flat,
    bench_dec_flat,
    bench_varint
);
criterion_main!(benches);
