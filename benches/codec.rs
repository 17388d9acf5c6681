use criterion::{black_box, criterion_group, criterion_main, Criterion};
use huffpack::{decode, encode, HuffmanTree};

fn sample_text(len: usize) -> Vec<u8> {
    b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor \
      incididunt ut labore et dolore magna aliqua. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn tree_building(c: &mut Criterion) {
    let input = sample_text(64 * 1024);

    c.bench_function("huffman tree", |b| {
        b.iter(|| HuffmanTree::from_bytes(black_box(&input)))
    });
}

fn encoding(c: &mut Criterion) {
    let input = sample_text(64 * 1024);

    c.bench_function("huffman encode", |b| b.iter(|| encode(black_box(&input))));
}

fn decoding(c: &mut Criterion) {
    let input = sample_text(64 * 1024);
    let (table, stream) = encode(&input).unwrap();

    c.bench_function("huffman decode", |b| {
        b.iter(|| decode(black_box(&table), black_box(&stream)))
    });
}

criterion_group!(benches, tree_building, encoding, decoding);
criterion_main!(benches);
