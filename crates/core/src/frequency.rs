//! Symbol frequency counting.
//!
//! A symbol is one Unicode scalar value (`char`). The table remembers the
//! order in which symbols were first seen; the tree builder relies on that
//! order to break ties between equal weights deterministically.

use std::collections::HashMap;

/// Mapping from symbol to occurrence count.
///
/// # Invariants
/// - Every count is >= 1
/// - Sum of counts equals the number of symbols counted
/// - `entries` holds each symbol exactly once, in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    /// (symbol, count) in first-occurrence order
    entries: Vec<(char, u64)>,
    /// Position of each symbol in `entries`
    index: HashMap<char, usize>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every symbol of `text`.
    ///
    /// Empty input yields an empty table.
    pub fn count(text: &str) -> Self {
        let mut table = Self::new();
        for symbol in text.chars() {
            table.record(symbol);
        }
        table
    }

    /// Record one occurrence of `symbol`.
    pub fn record(&mut self, symbol: char) {
        match self.index.get(&symbol) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push((symbol, 1));
            }
        }
    }

    /// Count for `symbol`, or 0 if it was never seen.
    pub fn get(&self, symbol: char) -> u64 {
        self.index
            .get(&symbol)
            .map_or(0, |&slot| self.entries[slot].1)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    /// Iterate (symbol, count) pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// Shannon entropy of the distribution in bits per symbol.
    ///
    /// Returns 0.0 for an empty table or a single-symbol alphabet.
    pub fn entropy(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }
        self.entries
            .iter()
            .map(|&(_, count)| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

impl FromIterator<char> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut table = Self::new();
        for symbol in iter {
            table.record(symbol);
        }
        table
    }
}
