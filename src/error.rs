//! Error types for Huffman coding.

use thiserror::Error;

/// Error variants for Huffman operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No symbols were supplied, so there is nothing to build a code from.
    #[error("empty input: no symbols to build a code from")]
    EmptyInput,

    /// The encoder met a symbol that has no entry in its code table.
    #[error("symbol at position {position} has no code in the table")]
    UnknownSymbol {
        /// Index of the offending symbol in the encoder input.
        position: usize,
    },

    /// The bit stream ended in the middle of a code.
    #[error("bit stream truncated: {pending_bits} dangling bit(s) after {decoded} decoded symbol(s)")]
    TruncatedStream {
        /// Number of symbols decoded before the dangling code.
        decoded: usize,
        /// Bits of the incomplete trailing code.
        pending_bits: usize,
    },

    /// A bit selected a branch that does not exist in the tree.
    #[error("corrupt bit stream: no code continues with the bit at position {position}")]
    CorruptStream {
        /// Index of the offending bit.
        position: usize,
    },

    /// Combined node weight does not fit in `u64`.
    #[error("weight overflow while combining tree nodes")]
    WeightOverflow,

    /// A serialized container is inconsistent.
    #[error("malformed container: {0}")]
    MalformedContainer(&'static str),

    /// An I/O error occurred while reading or writing a container.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
