//! # Huffman Coding
//!
//! *Optimal prefix codes from symbol frequencies.*
//!
//! ## Intuition First
//!
//! Morse code gives `E` a single dot and `Q` four symbols: frequent letters get
//! short codes, rare ones long codes. Huffman coding does the same thing
//! optimally. It builds a binary tree whose leaves are the symbols; the path
//! from the root to a leaf (left = `0`, right = `1`) is that symbol's code.
//! Because symbols only ever sit at leaves, no code is a prefix of another,
//! and a bit stream can be decoded without separators.
//!
//! ## The Problem
//!
//! Fixed-width encodings spend the same number of bits on every symbol,
//! however often it occurs. For skewed distributions most of those bits are
//! wasted. We want the prefix-free code that minimizes
//!
//! ```text
//! L = Σ_s f(s) · |code(s)|
//! ```
//!
//! over all prefix-free codes, where `f(s)` is the number of occurrences of `s`.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the lower bound on average code length
//! 1949  Fano        Top-down splitting (Shannon-Fano), not always optimal
//! 1952  Huffman     Bottom-up greedy merging, provably optimal
//! 1964  Schwartz    Canonical codes: transmit lengths, not trees
//! 1992  JPEG        Huffman coding of quantized coefficients
//! 1996  DEFLATE     RFC 1951: Huffman at the core of zip, gzip and PNG
//! ```
//!
//! Huffman's insight was to build the tree from the bottom: the two rarest
//! symbols can always be siblings at the deepest level of some optimal tree,
//! so merge them and recurse on the smaller problem.
//!
//! ## Algorithm
//!
//! 1. [`FrequencyTable`] counts each symbol once, left to right.
//! 2. [`HuffmanTree`] seeds a min-priority queue with one leaf per symbol,
//!    then repeatedly merges the two lightest nodes until one root is left.
//! 3. [`CodeTable`] walks the tree depth-first and records each leaf's path.
//! 4. [`HuffmanEncoder`] concatenates codes; [`HuffmanDecoder`] walks the
//!    tree bit by bit and emits a symbol at every leaf.
//!
//! ```
//! use canonical_huffman::{HuffmanDecoder, HuffmanEncoder, HuffmanTree};
//!
//! let input = b"aaabbc";
//! let tree = HuffmanTree::from_symbols(input.iter().copied())?;
//! let bits = HuffmanEncoder::from_tree(&tree).encode(input)?;
//! assert_eq!(bits.len(), 9);
//!
//! let decoded = HuffmanDecoder::new(&tree).decode(&bits)?;
//! assert_eq!(decoded, input.to_vec());
//! # Ok::<(), canonical_huffman::Error>(())
//! ```
//!
//! ## Complexity Analysis
//!
//! - **Tree construction**: $O(n \log n)$ for $n$ distinct symbols.
//! - **Encoding**: $O(1)$ lookup per symbol, $O(|code|)$ bits written.
//! - **Decoding**: $O(1)$ per bit.
//!
//! ## Failure Modes
//!
//! 1. **Empty input**: there is no tree for zero symbols ([`Error::EmptyInput`]).
//! 2. **Single symbol**: the tree is a lone leaf and would give an empty code;
//!    the code table assigns it `0` instead.
//! 3. **Mismatched tables**: encoding with a table built from other data
//!    ([`Error::UnknownSymbol`]); decoding a stream cut mid-code
//!    ([`Error::TruncatedStream`]).
//!
//! ## Implementation Notes
//!
//! - Ties in weight are broken by first-occurrence order, so trees and codes
//!   are fully deterministic (see [`tree`]).
//! - Bit streams are `bitvec` vectors packed MSB-first into bytes.
//! - [`Archive`] wraps the pipeline with a self-describing byte format.
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Schwartz, E. S., & Kallick, B. (1964). "Generating a Canonical Prefix Encoding."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod code;
pub mod codec;
pub mod container;
pub mod error;
pub mod frequency;
pub mod report;
pub mod tree;

pub use code::{Bits, CodeTable};
pub use codec::{Decoded, HuffmanDecoder, HuffmanEncoder};
pub use container::{Archive, SymbolKind, WireSymbol};
pub use error::{Error, Result};
pub use frequency::{FrequencyTable, Symbol};
pub use report::SizeReport;
pub use tree::{HuffmanTree, Node};
