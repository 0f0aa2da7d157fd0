//! Huffman encoding and decoding.
//!
//! The encoder concatenates per-symbol codes looked up in a [`CodeTable`];
//! the decoder walks the [`HuffmanTree`] from the root, one bit per step, and
//! emits a symbol each time it lands on a leaf.

use bitvec::prelude::*;

use crate::code::{Bits, CodeTable};
use crate::error::{Error, Result};
use crate::frequency::Symbol;
use crate::tree::{HuffmanTree, Node};

/// Huffman encoder.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder<S> {
    codes: CodeTable<S>,
}

impl<S: Symbol> HuffmanEncoder<S> {
    /// Create an encoder from a code table.
    pub fn new(codes: CodeTable<S>) -> Self {
        Self { codes }
    }

    /// Create an encoder for the codes of `tree`.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        Self::new(tree.code_table())
    }

    /// The code table in use.
    pub fn codes(&self) -> &CodeTable<S> {
        &self.codes
    }

    /// Encode a symbol sequence into a bit stream.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` if a symbol has no code.
    pub fn encode<'a, I>(&self, symbols: I) -> Result<Bits>
    where
        I: IntoIterator<Item = &'a S>,
        S: 'a,
    {
        let mut bits = Bits::new();
        self.encode_into(symbols, &mut bits)?;
        Ok(bits)
    }

    /// Append the encoding of `symbols` to `out`.
    ///
    /// On error `out` is left as it was before the call.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` if a symbol has no code.
    pub fn encode_into<'a, I>(&self, symbols: I, out: &mut Bits) -> Result<()>
    where
        I: IntoIterator<Item = &'a S>,
        S: 'a,
    {
        let start = out.len();
        for (position, symbol) in symbols.into_iter().enumerate() {
            match self.codes.get(symbol) {
                Some(code) => out.extend_from_bitslice(code),
                None => {
                    out.truncate(start);
                    return Err(Error::UnknownSymbol { position });
                }
            }
        }
        Ok(())
    }
}

/// Result of decoding a bit stream that may end mid-code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<S> {
    /// Symbols decoded from complete codes.
    pub symbols: Vec<S>,
    /// Bits of a trailing incomplete code; 0 when the stream ended cleanly.
    pub pending_bits: usize,
}

impl<S> Decoded<S> {
    /// Whether the stream ended exactly on a code boundary.
    pub fn is_complete(&self) -> bool {
        self.pending_bits == 0
    }

    /// The decoded symbols, provided the stream was complete.
    ///
    /// # Errors
    /// Returns `Error::TruncatedStream` if a partial code was left over.
    pub fn into_complete(self) -> Result<Vec<S>> {
        if self.is_complete() {
            Ok(self.symbols)
        } else {
            Err(Error::TruncatedStream {
                decoded: self.symbols.len(),
                pending_bits: self.pending_bits,
            })
        }
    }
}

/// Huffman decoder.
///
/// Borrows the tree; any number of decoders may share one.
#[derive(Debug, Clone)]
pub struct HuffmanDecoder<'t, S> {
    tree: &'t HuffmanTree<S>,
}

impl<'t, S: Clone> HuffmanDecoder<'t, S> {
    /// Create a decoder over `tree`.
    pub fn new(tree: &'t HuffmanTree<S>) -> Self {
        Self { tree }
    }

    /// Decode a bit stream into a symbol sequence.
    ///
    /// # Errors
    /// Returns `Error::TruncatedStream` if the stream stops mid-code and
    /// `Error::CorruptStream` if a bit leads nowhere.
    pub fn decode(&self, bits: &BitSlice<u8, Msb0>) -> Result<Vec<S>> {
        self.decode_partial(bits)?.into_complete()
    }

    /// Decode as much of `bits` as forms complete codes.
    ///
    /// A dangling trailing code is reported through
    /// [`Decoded::pending_bits`] instead of failing.
    ///
    /// # Errors
    /// Returns `Error::CorruptStream` if a bit leads nowhere.
    pub fn decode_partial(&self, bits: &BitSlice<u8, Msb0>) -> Result<Decoded<S>> {
        self.decode_at_most(bits, usize::MAX)
    }

    /// Like [`HuffmanDecoder::decode_partial`], but stops once
    /// `max_symbols` symbols have been decoded.
    ///
    /// Bits after the last decoded symbol are then left unread and do not
    /// count as pending.
    ///
    /// # Errors
    /// Returns `Error::CorruptStream` if a bit leads nowhere.
    pub fn decode_at_most(
        &self,
        bits: &BitSlice<u8, Msb0>,
        max_symbols: usize,
    ) -> Result<Decoded<S>> {
        let root = self.tree.root();
        let mut symbols = Vec::new();

        // A lone leaf owns the single code `0`.
        if let Node::Leaf { symbol, .. } = root {
            for (position, bit) in bits.iter().by_vals().enumerate() {
                if symbols.len() == max_symbols {
                    break;
                }
                if bit {
                    return Err(Error::CorruptStream { position });
                }
                symbols.push(symbol.clone());
            }
            return Ok(Decoded {
                symbols,
                pending_bits: 0,
            });
        }

        let mut curr = root;
        let mut pending_bits = 0;
        for (position, bit) in bits.iter().by_vals().enumerate() {
            if pending_bits == 0 && symbols.len() == max_symbols {
                break;
            }
            curr = curr.child(bit).ok_or(Error::CorruptStream { position })?;
            pending_bits += 1;

            if let Node::Leaf { symbol, .. } = curr {
                symbols.push(symbol.clone());
                curr = root;
                pending_bits = 0;
            }
        }

        Ok(Decoded {
            symbols,
            pending_bits,
        })
    }
}
