#![no_main]
use canonical_huffman::{Archive, HuffmanDecoder, HuffmanEncoder, HuffmanTree};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u8>, u8)| {
    let (input, alphabet) = data;
    if input.is_empty() {
        return;
    }

    // Fold into a smaller alphabet so deep and single-leaf trees both show up.
    let alphabet = alphabet.max(1);
    let input: Vec<u8> = input.iter().map(|b| b % alphabet).collect();

    let tree = HuffmanTree::from_symbols(input.iter().copied()).unwrap();
    let bits = HuffmanEncoder::from_tree(&tree).encode(&input).unwrap();
    let decoded = HuffmanDecoder::new(&tree).decode(&bits).unwrap();
    assert_eq!(input, decoded);

    let bytes = Archive::compress(&input).unwrap().to_bytes().unwrap();
    let restored = Archive::<u8>::from_bytes(&bytes)
        .unwrap()
        .decompress()
        .unwrap();
    assert_eq!(input, restored);
});
