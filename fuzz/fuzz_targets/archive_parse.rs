#![no_main]
use canonical_huffman::{Archive, SymbolKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must be rejected or decoded, never panic.
    match SymbolKind::detect(data) {
        Ok(SymbolKind::Byte) => {
            if let Ok(archive) = Archive::<u8>::from_bytes(data) {
                let _ = archive.decompress();
            }
        }
        Ok(SymbolKind::Char) => {
            if let Ok(archive) = Archive::<char>::from_bytes(data) {
                let _ = archive.decompress();
            }
        }
        Err(_) => {}
    }
});
