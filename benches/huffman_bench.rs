use canonical_huffman::{Archive, HuffmanDecoder, HuffmanEncoder, HuffmanTree};
use criterion::{criterion_group, criterion_main, Criterion};

fn sample_input() -> Vec<u8> {
    // 16 symbols, each about half as frequent as the one before.
    (0..64 * 1024u32)
        .map(|i| (i.wrapping_mul(2654435761) >> 16).trailing_zeros().min(15) as u8)
        .collect()
}

fn bench_huffman_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_codec");
    let input = sample_input();

    group.bench_function("build", |b| {
        b.iter(|| HuffmanTree::from_symbols(input.iter().copied()).unwrap())
    });

    let tree = HuffmanTree::from_symbols(input.iter().copied()).unwrap();
    let encoder = HuffmanEncoder::from_tree(&tree);

    group.bench_function("encode", |b| b.iter(|| encoder.encode(&input).unwrap()));

    let bits = encoder.encode(&input).unwrap();
    let decoder = HuffmanDecoder::new(&tree);

    group.bench_function("decode", |b| b.iter(|| decoder.decode(&bits).unwrap()));
}

fn bench_archive(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_archive");
    let input = sample_input();

    group.bench_function("compress", |b| {
        b.iter(|| Archive::compress(&input).unwrap().to_bytes().unwrap())
    });

    let bytes = Archive::compress(&input).unwrap().to_bytes().unwrap();

    group.bench_function("decompress", |b| {
        b.iter(|| {
            Archive::<u8>::from_bytes(&bytes)
                .unwrap()
                .decompress()
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_huffman_codec, bench_archive);
criterion_main!(benches);
