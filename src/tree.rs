//! Huffman tree construction.
//!
//! The builder is the classic greedy algorithm: put one leaf per symbol into a
//! min-priority queue, repeatedly pop the two lightest nodes and push their
//! combination, until a single root remains.
//!
//! # Tie-breaking
//!
//! Huffman trees are not unique when weights tie. Here the queue is keyed by
//! `(weight, order)`: a leaf's order is its first-occurrence index in the
//! [`FrequencyTable`], and every internal node takes the next unused order
//! number when it is created. The node popped first becomes the left child.
//! Building twice from the same table therefore yields the same tree, bit
//! values included.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt::Debug;
use std::io::{self, Write};

use crate::code::CodeTable;
use crate::error::{Error, Result};
use crate::frequency::{FrequencyTable, Symbol};

/// Huffman tree node.
///
/// Leaves are told apart structurally, so every value of `S` (including
/// zero-valued ones) is a legal symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    /// A symbol and its occurrence count.
    Leaf {
        /// The coded symbol.
        symbol: S,
        /// Occurrence count.
        weight: u64,
    },
    /// A combination of exactly two subtrees.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached with bit 0.
        left: Box<Node<S>>,
        /// Subtree reached with bit 1.
        right: Box<Node<S>>,
    },
}

impl<S> Node<S> {
    /// Aggregate weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The child selected by `bit` (`false` = left, `true` = right).
    ///
    /// Leaves have no children.
    pub fn child(&self, bit: bool) -> Option<&Node<S>> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Queue entry during construction.
struct Pending<S> {
    weight: u64,
    order: usize,
    node: Node<S>,
}

impl<S> Pending<S> {
    fn key(&self) -> (u64, usize) {
        (self.weight, self.order)
    }
}

impl<S> PartialEq for Pending<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<S> Eq for Pending<S> {}

impl<S> Ord for Pending<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key()) // Min-priority queue
    }
}

impl<S> PartialOrd for Pending<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An immutable Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: Node<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Build the optimal prefix tree for `frequencies`.
    ///
    /// A table with a single symbol yields a lone leaf as root.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` for an empty table and
    /// `Error::WeightOverflow` if combined weights exceed `u64`.
    pub fn from_frequencies(frequencies: &FrequencyTable<S>) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut pq: BinaryHeap<Pending<S>> = frequencies
            .iter()
            .enumerate()
            .map(|(order, (symbol, weight))| Pending {
                weight,
                order,
                node: Node::Leaf {
                    symbol: symbol.clone(),
                    weight,
                },
            })
            .collect();
        let mut next_order = pq.len();

        while pq.len() > 1 {
            let (Some(left), Some(right)) = (pq.pop(), pq.pop()) else {
                break;
            };
            let weight = left
                .weight
                .checked_add(right.weight)
                .ok_or(Error::WeightOverflow)?;
            pq.push(Pending {
                weight,
                order: next_order,
                node: Node::Internal {
                    weight,
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                },
            });
            next_order += 1;
        }

        let root = pq.pop().ok_or(Error::EmptyInput)?.node;
        Ok(Self { root })
    }

    /// Count `symbols` and build the tree in one step.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `symbols` yields nothing.
    pub fn from_symbols<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        Self::from_frequencies(&FrequencyTable::analyze(symbols)?)
    }

    /// Derive the code table by depth-first traversal.
    pub fn code_table(&self) -> CodeTable<S> {
        CodeTable::from_tree(self)
    }
}

impl<S> HuffmanTree<S> {
    /// The root node.
    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Total weight, i.e. the number of symbols the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path; 0 for a lone leaf.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

impl<S: Debug> HuffmanTree<S> {
    /// Write a Graphviz DOT dump of the tree to `sink`.
    ///
    /// Node ids are assigned breadth-first starting at 0 and are only
    /// meaningful within one call. Internal nodes are labelled with their
    /// weight, leaves with `symbol:weight`, edges with the bit they consume.
    pub fn write_dot<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink, "digraph huffman {{")?;
        let mut queue = VecDeque::from([(0usize, &self.root)]);
        let mut next_id = 1usize;

        while let Some((id, node)) = queue.pop_front() {
            match node {
                Node::Leaf { symbol, weight } => {
                    let label = escape_label(&format!("{symbol:?}"));
                    writeln!(sink, "    {id} [label=\"{label}:{weight}\"];")?;
                }
                Node::Internal {
                    weight,
                    left,
                    right,
                } => {
                    writeln!(sink, "    {id} [label=\"{weight}\"];")?;
                    for (bit, child) in [(0, left), (1, right)] {
                        writeln!(sink, "    {id} -> {next_id} [label=\"{bit}\"];")?;
                        queue.push_back((next_id, child.as_ref()));
                        next_id += 1;
                    }
                }
            }
        }

        writeln!(sink, "}}")
    }
}

fn escape_label(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
