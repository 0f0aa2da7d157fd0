//! Code table derivation.
//!
//! Walking the tree depth-first, a step to the left child appends `0` and a
//! step to the right child appends `1`; the path to a leaf is that leaf's
//! code. Codes read off a strict binary tree are prefix-free by construction.

use std::collections::HashMap;

use bitvec::prelude::*;

use crate::error::{Error, Result};
use crate::frequency::{FrequencyTable, Symbol};
use crate::tree::{HuffmanTree, Node};

/// A packed, MSB-first bit sequence.
pub type Bits = BitVec<u8, Msb0>;

/// Symbol to code mapping, in left-first traversal order.
#[derive(Debug, Clone)]
pub struct CodeTable<S> {
    codes: Vec<(S, Bits)>,
    index: HashMap<S, usize>,
}

impl<S: Symbol> CodeTable<S> {
    /// Derive the code of every leaf of `tree`.
    ///
    /// A lone-leaf tree gets the one-bit code `0`: an empty code could not
    /// be read back from a bit stream.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        let mut table = Self {
            codes: Vec::new(),
            index: HashMap::new(),
        };
        let mut prefix = Bits::new();
        if tree.root().is_leaf() {
            prefix.push(false);
        }
        table.assign(tree.root(), &mut prefix);
        table
    }

    fn assign(&mut self, node: &Node<S>, prefix: &mut Bits) {
        match node {
            Node::Leaf { symbol, .. } => {
                self.index.insert(symbol.clone(), self.codes.len());
                self.codes.push((symbol.clone(), prefix.clone()));
            }
            Node::Internal { left, right, .. } => {
                prefix.push(false);
                self.assign(left, prefix);
                prefix.pop();

                prefix.push(true);
                self.assign(right, prefix);
                prefix.pop();
            }
        }
    }

    /// The code of `symbol`, if it has one.
    pub fn get(&self, symbol: &S) -> Option<&BitSlice<u8, Msb0>> {
        self.index
            .get(symbol)
            .map(|&i| self.codes[i].1.as_bitslice())
    }

    /// Length in bits of the code of `symbol`.
    pub fn code_len(&self, symbol: &S) -> Option<usize> {
        self.get(symbol).map(|code| code.len())
    }

    /// Total encoded size, in bits, of the input `frequencies` describe:
    /// the sum of frequency × code length.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` with the index of the first
    /// frequency-table entry that has no code, and `Error::WeightOverflow`
    /// if the total does not fit a `u64`.
    pub fn weighted_length(&self, frequencies: &FrequencyTable<S>) -> Result<u64> {
        frequencies
            .iter()
            .enumerate()
            .try_fold(0u64, |acc, (position, (symbol, count))| {
                let len = self
                    .code_len(symbol)
                    .ok_or(Error::UnknownSymbol { position })?;
                count
                    .checked_mul(len as u64)
                    .and_then(|bits| acc.checked_add(bits))
                    .ok_or(Error::WeightOverflow)
            })
    }
}

impl<S> CodeTable<S> {
    /// Number of coded symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table holds no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .map(|(symbol, code)| (symbol, code.as_bitslice()))
    }
}

/// Render a code as a string of `0` and `1` characters.
pub fn code_string(code: &BitSlice<u8, Msb0>) -> String {
    code.iter().map(|bit| if *bit { '1' } else { '0' }).collect()
}
