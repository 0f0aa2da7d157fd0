//! Frequency analysis.
//!
//! Counts how often each distinct symbol occurs in a sequence. The table
//! remembers the order in which symbols were first seen; tree construction
//! uses that order to break weight ties, so the same input always yields the
//! same tree.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Error, Result};

/// A unit of data that can be Huffman coded.
///
/// Blanket-implemented for every `Eq + Hash + Clone` type: bytes, chars,
/// tokens, or anything else that can key a hash map.
pub trait Symbol: Eq + Hash + Clone {}

impl<T: Eq + Hash + Clone> Symbol for T {}

/// Occurrence counts per symbol, in first-occurrence order.
///
/// Every stored count is at least 1.
#[derive(Debug, Clone)]
pub struct FrequencyTable<S> {
    entries: Vec<(S, u64)>,
    index: HashMap<S, usize>,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Count the symbols of `symbols` in a single left-to-right pass.
    ///
    /// Empty input gives an empty table; see [`FrequencyTable::analyze`] for
    /// the variant that rejects it.
    pub fn count<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut table = Self::new();
        for symbol in symbols {
            // Unit steps cannot reach u64::MAX.
            *table.slot(symbol) += 1;
        }
        table
    }

    /// Count the symbols of `symbols`, failing on empty input.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `symbols` yields nothing.
    pub fn analyze<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        let table = Self::count(symbols);
        if table.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(table)
    }

    /// Add `count` occurrences of `symbol`.
    ///
    /// A zero count is ignored so that no symbol is ever stored with
    /// frequency 0.
    ///
    /// # Errors
    /// Returns `Error::WeightOverflow` if the symbol's count would exceed
    /// `u64`; the table is left unchanged.
    pub fn add(&mut self, symbol: S, count: u64) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        if let Some(&i) = self.index.get(&symbol) {
            let slot = &mut self.entries[i].1;
            *slot = slot.checked_add(count).ok_or(Error::WeightOverflow)?;
        } else {
            *self.slot(symbol) = count;
        }
        Ok(())
    }

    fn slot(&mut self, symbol: S) -> &mut u64 {
        let i = match self.index.get(&symbol) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.index.insert(symbol.clone(), i);
                self.entries.push((symbol, 0));
                i
            }
        };
        &mut self.entries[i].1
    }

    /// Occurrence count of `symbol`, if it was seen.
    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.index.get(symbol).map(|&i| self.entries[i].1)
    }

    /// Whether `symbol` was seen.
    pub fn contains(&self, symbol: &S) -> bool {
        self.index.contains_key(symbol)
    }
}

impl<S> FrequencyTable<S> {
    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no symbol was counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    ///
    /// # Errors
    /// Returns `Error::WeightOverflow` if the sum exceeds `u64`.
    pub fn total(&self) -> Result<u64> {
        self.entries.iter().try_fold(0u64, |acc, &(_, count)| {
            acc.checked_add(count).ok_or(Error::WeightOverflow)
        })
    }

    /// `(symbol, count)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, u64)> + '_ {
        self.entries.iter().map(|(symbol, count)| (symbol, *count))
    }
}

impl<S: Symbol> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> FromIterator<S> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::count(iter)
    }
}
