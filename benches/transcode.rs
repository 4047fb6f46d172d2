use criterion::{Criterion, criterion_group, criterion_main};
use hex2text::{EncodingType, convert, count, hex};
use std::hint::black_box;

fn sample_text() -> String {
    "Grüße aus Tōkyō ☺ 😀 ".repeat(200)
}

pub fn hex_codec(c: &mut Criterion) {
    let bytes = sample_text().into_bytes();
    let dump = hex::encode(&bytes);

    c.bench_function("hex::encode", |b| b.iter(|| hex::encode(black_box(&bytes))));
    c.bench_function("hex::decode", |b| b.iter(|| hex::decode(black_box(&dump)).unwrap()));
}

pub fn pipeline(c: &mut Criterion) {
    let text = sample_text();
    let utf16 = convert(&text, EncodingType::UTF16LE, EncodingType::Hex).output;

    c.bench_function("convert UTF-8 -> Hex", |b| {
        b.iter(|| convert(black_box(&text), EncodingType::UTF8, EncodingType::Hex))
    });
    c.bench_function("convert Hex -> UTF-16LE", |b| {
        b.iter(|| convert(black_box(&utf16), EncodingType::Hex, EncodingType::UTF16LE))
    });
    c.bench_function("count Hex/UTF-16LE", |b| {
        b.iter(|| count(black_box(&utf16), EncodingType::Hex, EncodingType::UTF16LE))
    });
}

criterion_group!(benches, hex_codec, pipeline);
criterion_main!(benches);
