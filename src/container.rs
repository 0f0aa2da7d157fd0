//! Self-describing container for compressed data.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! magic            4 bytes   b"HUF1"
//! symbol kind      u8        1 = byte, 2 = char
//! distinct count   u32
//! per symbol:      symbol    1 byte, or u32 Unicode scalar value
//!                  frequency u64
//! symbol count     u64
//! bit count        u64
//! body             ceil(bit count / 8) bytes, MSB-first
//! ```
//!
//! Frequencies are stored in first-occurrence order, so rebuilding the tree
//! on the decoding side reproduces the same tie-breaks and the same codes.

use std::io::{self, Read, Write};

use bitvec::prelude::*;

use crate::code::Bits;
use crate::codec::{HuffmanDecoder, HuffmanEncoder};
use crate::error::{Error, Result};
use crate::frequency::{FrequencyTable, Symbol};
use crate::report::SizeReport;
use crate::tree::HuffmanTree;

/// Leading bytes of every container.
pub const MAGIC: [u8; 4] = *b"HUF1";

/// The symbol type a container holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Raw bytes.
    Byte,
    /// Unicode scalar values.
    Char,
}

impl SymbolKind {
    fn tag(self) -> u8 {
        match self {
            SymbolKind::Byte => 1,
            SymbolKind::Char => 2,
        }
    }

    fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(SymbolKind::Byte),
            2 => Ok(SymbolKind::Char),
            _ => Err(Error::MalformedContainer("unknown symbol kind")),
        }
    }

    /// Read the symbol kind from the start of a serialized container.
    ///
    /// # Errors
    /// Returns `Error::MalformedContainer` if the magic or kind is invalid.
    pub fn detect(header: &[u8]) -> Result<Self> {
        match header {
            [m0, m1, m2, m3, tag, ..] if [*m0, *m1, *m2, *m3] == MAGIC => Self::from_tag(*tag),
            _ => Err(Error::MalformedContainer("missing magic")),
        }
    }
}

/// A symbol type with a fixed binary representation.
pub trait WireSymbol: Symbol + Sized {
    /// Kind tag written to the header.
    const KIND: SymbolKind;

    /// Serialize one symbol.
    fn write_symbol<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    /// Deserialize one symbol.
    fn read_symbol<R: Read>(reader: &mut R) -> Result<Self>;
}

impl WireSymbol for u8 {
    const KIND: SymbolKind = SymbolKind::Byte;

    fn write_symbol<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&[*self])
    }

    fn read_symbol<R: Read>(reader: &mut R) -> Result<Self> {
        let [byte] = read_array::<1, R>(reader)?;
        Ok(byte)
    }
}

impl WireSymbol for char {
    const KIND: SymbolKind = SymbolKind::Char;

    fn write_symbol<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&u32::from(*self).to_le_bytes())
    }

    fn read_symbol<R: Read>(reader: &mut R) -> Result<Self> {
        let scalar = u32::from_le_bytes(read_array(reader)?);
        char::from_u32(scalar).ok_or(Error::MalformedContainer("invalid unicode scalar value"))
    }
}

fn read_array<const N: usize, R: Read>(reader: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::MalformedContainer("unexpected end of data"),
        _ => Error::Io(e),
    })?;
    Ok(buf)
}

fn read_u64<R: Read>(reader: &mut R) -> Result<u64> {
    Ok(u64::from_le_bytes(read_array(reader)?))
}

/// Compressed data together with what is needed to decode it.
#[derive(Debug, Clone)]
pub struct Archive<S> {
    frequencies: FrequencyTable<S>,
    symbol_count: u64,
    bits: Bits,
}

impl<S: Symbol> Archive<S> {
    /// Run the whole pipeline on `symbols`: count, build, encode.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `symbols` is empty.
    pub fn compress(symbols: &[S]) -> Result<Self> {
        let frequencies = FrequencyTable::analyze(symbols.iter().cloned())?;
        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        let bits = HuffmanEncoder::from_tree(&tree).encode(symbols)?;
        Ok(Self {
            frequencies,
            symbol_count: symbols.len() as u64,
            bits,
        })
    }

    /// Rebuild the tree and decode the body.
    ///
    /// # Errors
    /// Returns the decoder's errors, or `Error::MalformedContainer` if the
    /// decoded length disagrees with the recorded symbol count.
    pub fn decompress(&self) -> Result<Vec<S>> {
        let tree = HuffmanTree::from_frequencies(&self.frequencies)?;
        // One symbol past the recorded count is enough to know the body is bad.
        let limit = usize::try_from(self.symbol_count)
            .unwrap_or(usize::MAX)
            .saturating_add(1);
        let symbols = HuffmanDecoder::new(&tree)
            .decode_at_most(&self.bits, limit)?
            .into_complete()?;
        if symbols.len() as u64 != self.symbol_count {
            return Err(Error::MalformedContainer(
                "symbol count does not match the bit stream",
            ));
        }
        Ok(symbols)
    }

    /// The frequency table the code was built from.
    pub fn frequencies(&self) -> &FrequencyTable<S> {
        &self.frequencies
    }

    /// Number of symbols in the original input.
    pub fn symbol_count(&self) -> u64 {
        self.symbol_count
    }

    /// The encoded body.
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Size comparison against an original of `original_bits`.
    pub fn report(&self, original_bits: u64) -> SizeReport {
        SizeReport::new(original_bits, self.bits.len() as u64)
    }
}

impl<S: WireSymbol> Archive<S> {
    /// Serialize to `writer`.
    ///
    /// # Errors
    /// Returns `Error::Io` on write failure.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let distinct = u32::try_from(self.frequencies.len())
            .map_err(|_| Error::MalformedContainer("too many distinct symbols"))?;

        writer.write_all(&MAGIC)?;
        writer.write_all(&[S::KIND.tag()])?;
        writer.write_all(&distinct.to_le_bytes())?;
        for (symbol, count) in self.frequencies.iter() {
            symbol.write_symbol(writer)?;
            writer.write_all(&count.to_le_bytes())?;
        }
        writer.write_all(&self.symbol_count.to_le_bytes())?;
        writer.write_all(&(self.bits.len() as u64).to_le_bytes())?;
        let mut body = self.bits.clone();
        body.set_uninitialized(false);
        writer.write_all(body.as_raw_slice())?;
        Ok(())
    }

    /// Serialize into a fresh buffer.
    ///
    /// # Errors
    /// See [`Archive::write_to`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Deserialize from `reader`, validating the header.
    ///
    /// # Errors
    /// Returns `Error::MalformedContainer` for inconsistent data,
    /// `Error::WeightOverflow` if the frequencies do not fit a `u64` sum and
    /// `Error::Io` for read failures.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let header: [u8; 5] = read_array(reader)?;
        if SymbolKind::detect(&header)? != S::KIND {
            return Err(Error::MalformedContainer("symbol kind mismatch"));
        }

        let distinct = u32::from_le_bytes(read_array(reader)?);
        if distinct == 0 {
            return Err(Error::MalformedContainer("no symbols"));
        }
        let mut frequencies = FrequencyTable::new();
        for _ in 0..distinct {
            let symbol = S::read_symbol(reader)?;
            let count = read_u64(reader)?;
            if count == 0 {
                return Err(Error::MalformedContainer("zero frequency"));
            }
            if frequencies.contains(&symbol) {
                return Err(Error::MalformedContainer("duplicate symbol"));
            }
            frequencies.add(symbol, count)?;
        }

        let symbol_count = read_u64(reader)?;
        if frequencies.total()? != symbol_count {
            return Err(Error::MalformedContainer(
                "frequencies do not sum to the symbol count",
            ));
        }

        let bit_count = read_u64(reader)?;
        let byte_count = bit_count.div_ceil(8);
        let mut body = Vec::new();
        reader.by_ref().take(byte_count).read_to_end(&mut body)?;
        if body.len() as u64 != byte_count {
            return Err(Error::MalformedContainer("unexpected end of data"));
        }
        let mut bits = Bits::from_vec(body);
        bits.truncate(bit_count as usize);

        Ok(Self {
            frequencies,
            symbol_count,
            bits,
        })
    }

    /// Deserialize a complete buffer.
    ///
    /// # Errors
    /// As [`Archive::read_from`], plus `Error::MalformedContainer` if bytes
    /// remain after the body.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut rest = bytes;
        let archive = Self::read_from(&mut rest)?;
        if !rest.is_empty() {
            return Err(Error::MalformedContainer("trailing bytes"));
        }
        Ok(archive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_archive_roundtrip() {
        let data = b"she sells sea shells by the sea shore".to_vec();
        let bytes = Archive::compress(&data).unwrap().to_bytes().unwrap();
        assert_eq!(SymbolKind::detect(&bytes).unwrap(), SymbolKind::Byte);

        let restored = Archive::<u8>::from_bytes(&bytes).unwrap();
        assert_eq!(restored.decompress().unwrap(), data);
    }

    #[test]
    fn test_char_archive_roundtrip() {
        let text: Vec<char> = "ação, coração, ♥♥♥".chars().collect();
        let bytes = Archive::compress(&text).unwrap().to_bytes().unwrap();
        assert_eq!(SymbolKind::detect(&bytes).unwrap(), SymbolKind::Char);

        let restored = Archive::<char>::from_bytes(&bytes).unwrap();
        assert_eq!(restored.decompress().unwrap(), text);
    }

    #[test]
    fn test_scenario_layout() {
        let archive = Archive::compress(b"aaabbc").unwrap();
        let bytes = archive.to_bytes().unwrap();

        // magic + kind + distinct + 3 * (symbol + freq) + count + bits + body
        assert_eq!(bytes.len(), 4 + 1 + 4 + 3 * 9 + 8 + 8 + 2);
        assert_eq!(&bytes[..4], b"HUF1");
        assert_eq!(bytes[4], 1);
        assert_eq!(&bytes[44..52], &9u64.to_le_bytes());
        assert_eq!(&bytes[52..], &[0b0001_1111, 0b0000_0000]);
        assert_eq!(archive.report(48), SizeReport::new(48, 9));
    }

    #[test]
    fn test_single_symbol_archive() {
        let bytes = Archive::compress(&[0u8; 5]).unwrap().to_bytes().unwrap();
        let restored = Archive::<u8>::from_bytes(&bytes).unwrap();
        assert_eq!(restored.bits().len(), 5);
        assert_eq!(restored.decompress().unwrap(), vec![0u8; 5]);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            Archive::<u8>::compress(&[]),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_rejects_bad_magic_and_kind() {
        let mut bytes = Archive::compress(b"abc").unwrap().to_bytes().unwrap();
        assert!(matches!(
            Archive::<char>::from_bytes(&bytes),
            Err(Error::MalformedContainer("symbol kind mismatch"))
        ));
        bytes[0] = b'X';
        assert!(matches!(
            Archive::<u8>::from_bytes(&bytes),
            Err(Error::MalformedContainer("missing magic"))
        ));
    }

    #[test]
    fn test_rejects_truncated_and_trailing_data() {
        let bytes = Archive::compress(b"abcabc").unwrap().to_bytes().unwrap();
        assert!(matches!(
            Archive::<u8>::from_bytes(&bytes[..bytes.len() - 1]),
            Err(Error::MalformedContainer("unexpected end of data"))
        ));
        assert!(matches!(
            Archive::<u8>::from_bytes(&bytes[..7]),
            Err(Error::MalformedContainer("unexpected end of data"))
        ));

        let mut longer = bytes.clone();
        longer.push(0);
        assert!(matches!(
            Archive::<u8>::from_bytes(&longer),
            Err(Error::MalformedContainer("trailing bytes"))
        ));
    }

    #[test]
    fn test_tampered_bit_count_is_truncated_stream() {
        let mut bytes = Archive::compress(b"aaabbc").unwrap().to_bytes().unwrap();
        bytes[44..52].copy_from_slice(&8u64.to_le_bytes());
        bytes.truncate(53);
        let archive = Archive::<u8>::from_bytes(&bytes).unwrap();
        assert!(matches!(
            archive.decompress(),
            Err(Error::TruncatedStream { .. })
        ));
    }

    #[test]
    fn test_oversized_body_stops_past_symbol_count() {
        // One symbol counted once, followed by a long run of zero bits.
        let mut bytes = MAGIC.to_vec();
        bytes.push(SymbolKind::Byte.tag());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.push(b'a');
        bytes.extend_from_slice(&1u64.to_le_bytes());
        bytes.extend_from_slice(&1u64.to_le_bytes());
        bytes.extend_from_slice(&(1u64 << 16).to_le_bytes());
        bytes.resize(bytes.len() + (1 << 13), 0);

        let archive = Archive::<u8>::from_bytes(&bytes).unwrap();
        let tree = HuffmanTree::from_frequencies(archive.frequencies()).unwrap();
        let head = HuffmanDecoder::new(&tree)
            .decode_at_most(archive.bits(), 2)
            .unwrap();
        assert_eq!(head.symbols.len(), 2);
        assert!(matches!(
            archive.decompress(),
            Err(Error::MalformedContainer(
                "symbol count does not match the bit stream"
            ))
        ));
    }

    #[test]
    fn test_frequency_sum_overflow() {
        let mut bytes = MAGIC.to_vec();
        bytes.push(SymbolKind::Byte.tag());
        bytes.extend_from_slice(&2u32.to_le_bytes());
        for symbol in [b'a', b'b'] {
            bytes.push(symbol);
            bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        }
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        bytes.extend_from_slice(&0u64.to_le_bytes());
        assert!(matches!(
            Archive::<u8>::from_bytes(&bytes),
            Err(Error::WeightOverflow)
        ));
    }

    #[test]
    fn test_rejects_zero_and_duplicate_frequencies() {
        let bytes = Archive::compress(b"aaabbc").unwrap().to_bytes().unwrap();

        let mut zero = bytes.clone();
        zero[10..18].copy_from_slice(&0u64.to_le_bytes());
        assert!(matches!(
            Archive::<u8>::from_bytes(&zero),
            Err(Error::MalformedContainer("zero frequency"))
        ));

        let mut duplicate = bytes;
        duplicate[18] = b'a';
        assert!(matches!(
            Archive::<u8>::from_bytes(&duplicate),
            Err(Error::MalformedContainer("duplicate symbol"))
        ));
    }

    #[test]
    fn test_rejects_invalid_char() {
        let mut bytes = Archive::compress(&['x', 'y']).unwrap().to_bytes().unwrap();
        bytes[9..13].copy_from_slice(&0xD800u32.to_le_bytes());
        assert!(matches!(
            Archive::<char>::from_bytes(&bytes),
            Err(Error::MalformedContainer("invalid unicode scalar value"))
        ));
    }
}
