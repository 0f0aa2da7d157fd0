//! Compression size reporting.

use std::fmt;
use std::io::{self, Write};

use crate::code::CodeTable;
use crate::error::{Error, Result};
use crate::frequency::{FrequencyTable, Symbol};

/// Original vs. compressed size of one input, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReport {
    /// Size of the uncompressed input.
    pub original_bits: u64,
    /// Size of the encoded bit stream.
    pub compressed_bits: u64,
}

impl SizeReport {
    /// Create a report from explicit sizes.
    pub fn new(original_bits: u64, compressed_bits: u64) -> Self {
        Self {
            original_bits,
            compressed_bits,
        }
    }

    /// Report for an input of fixed-width symbols: the original size is
    /// `symbol count × bits_per_symbol`, the compressed size the weighted
    /// code length.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` if `codes` lacks a counted symbol and
    /// `Error::WeightOverflow` if the original size does not fit a `u64`.
    pub fn fixed_width<S: Symbol>(
        frequencies: &FrequencyTable<S>,
        codes: &CodeTable<S>,
        bits_per_symbol: u64,
    ) -> Result<Self> {
        Ok(Self::new(
            frequencies
                .total()?
                .checked_mul(bits_per_symbol)
                .ok_or(Error::WeightOverflow)?,
            codes.weighted_length(frequencies)?,
        ))
    }

    /// Percentage by which the compressed size undercuts the original.
    ///
    /// Negative when the encoding is larger; `None` when the original size
    /// is zero.
    pub fn reduction(&self) -> Option<f64> {
        if self.original_bits == 0 {
            return None;
        }
        let original = self.original_bits as f64;
        Some(100.0 * (original - self.compressed_bits as f64) / original)
    }

    /// Write a multi-line size comparison to `sink`.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink, "original size:   {} bits", self.original_bits)?;
        writeln!(sink, "compressed size: {} bits", self.compressed_bits)?;
        match self.reduction() {
            Some(pct) => writeln!(sink, "reduction:       {pct:.2}%"),
            None => writeln!(sink, "reduction:       n/a"),
        }
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "original: {} bits, compressed: {} bits, reduction: ",
            self.original_bits, self.compressed_bits
        )?;
        match self.reduction() {
            Some(pct) => write!(f, "{pct:.2}%"),
            None => write!(f, "n/a"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::HuffmanTree;

    #[test]
    fn test_scenario_report() {
        let freq = FrequencyTable::analyze("aaabbc".chars()).unwrap();
        let codes = HuffmanTree::from_frequencies(&freq).unwrap().code_table();
        let report = SizeReport::fixed_width(&freq, &codes, 8).unwrap();

        assert_eq!(report, SizeReport::new(48, 9));
        assert_eq!(report.reduction(), Some(81.25));
        assert_eq!(
            report.to_string(),
            "original: 48 bits, compressed: 9 bits, reduction: 81.25%"
        );
    }

    #[test]
    fn test_fixed_width_overflow() {
        let mut freq = FrequencyTable::new();
        freq.add('a', u64::MAX / 2).unwrap();
        freq.add('b', 1).unwrap();
        let codes = HuffmanTree::from_frequencies(&freq).unwrap().code_table();
        assert!(matches!(
            SizeReport::fixed_width(&freq, &codes, 8),
            Err(Error::WeightOverflow)
        ));
    }

    #[test]
    fn test_zero_original_is_not_applicable() {
        let report = SizeReport::new(0, 0);
        assert_eq!(report.reduction(), None);
        assert!(report.to_string().ends_with("reduction: n/a"));
    }

    #[test]
    fn test_expansion_is_negative() {
        let report = SizeReport::new(8, 10);
        assert_eq!(report.reduction(), Some(-25.0));
    }

    #[test]
    fn test_write_to_sink() {
        let mut out = Vec::new();
        SizeReport::new(48, 9).write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "original size:   48 bits\ncompressed size: 9 bits\nreduction:       81.25%\n"
        );
    }
}
