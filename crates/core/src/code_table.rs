//! Code table derivation and validation.
//!
//! The code of a symbol is the root-to-leaf path of its leaf, written as a
//! string of '0' (left) and '1' (right) characters. A tree whose root is
//! itself a leaf assigns that symbol the one-bit code "0".
//!
//! Derivation walks the tree with an explicit `(node, prefix)` work stack, so
//! heavily skewed trees do not grow the call stack.

use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanNode;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Code assigned to the only symbol of a single-symbol alphabet.
pub const SINGLE_SYMBOL_CODE: &str = "0";

/// Mapping from symbol to its prefix-free code.
///
/// Built once per compression from a complete tree and immutable thereafter;
/// decoding requires the exact table that produced the bits. Iteration is
/// ordered by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, String>,
}

impl CodeTable {
    /// Derive the code table of a tree.
    pub fn derive(root: &HuffmanNode) -> Self {
        let mut codes = BTreeMap::new();

        if let HuffmanNode::Leaf { symbol, .. } = root {
            codes.insert(*symbol, SINGLE_SYMBOL_CODE.to_string());
            return Self { codes };
        }

        let mut stack: Vec<(&HuffmanNode, String)> = vec![(root, String::new())];
        while let Some((node, prefix)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes.insert(*symbol, prefix);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push('1');
                    let mut left_prefix = prefix;
                    left_prefix.push('0');

                    stack.push((right.as_ref(), right_prefix));
                    stack.push((left.as_ref(), left_prefix));
                }
            }
        }

        Self { codes }
    }

    /// Build a table from (symbol, code) pairs supplied by a caller.
    ///
    /// Codes are not checked here; see [`CodeTable::validate`].
    ///
    /// # Errors
    /// `CodecError::InvalidTable` if a symbol appears more than once.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        let mut codes = BTreeMap::new();
        for (symbol, code) in pairs {
            match codes.entry(symbol) {
                Entry::Vacant(slot) => {
                    slot.insert(code.into());
                }
                Entry::Occupied(_) => {
                    return Err(CodecError::InvalidTable {
                        reason: format!("symbol {symbol:?} listed more than once"),
                    }
                    .into());
                }
            }
        }
        Ok(Self { codes })
    }

    /// Code for `symbol`, if present.
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.codes.contains_key(&symbol)
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate (symbol, code) pairs ordered by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code.as_str()))
    }

    /// Length in bits of the longest code (0 for an empty table).
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    /// Code length of every symbol.
    pub fn code_lengths(&self) -> BTreeMap<char, usize> {
        self.codes
            .iter()
            .map(|(&symbol, code)| (symbol, code.len()))
            .collect()
    }

    /// Total encoded length in bits of a text with the given frequencies.
    ///
    /// Symbols missing from the table contribute nothing.
    pub fn weighted_length(&self, freq: &FrequencyTable) -> u64 {
        freq.iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| count * code.len() as u64))
            .sum()
    }

    /// Whether no code is a prefix of another code.
    ///
    /// Duplicate codes count as prefixes of each other.
    pub fn is_prefix_free(&self) -> bool {
        find_prefix_pair(&self.codes).is_none()
    }

    /// Check that this table can decode unambiguously.
    ///
    /// # Errors
    /// `CodecError::InvalidTable` if a code is empty, contains a character
    /// other than '0'/'1', is shared by two symbols, or is a proper prefix of
    /// another code.
    pub fn validate(&self) -> Result<()> {
        for (symbol, code) in &self.codes {
            if code.is_empty() {
                return Err(invalid(format!("symbol {symbol:?} has an empty code")));
            }
            if let Some(found) = code.chars().find(|c| *c != '0' && *c != '1') {
                return Err(invalid(format!(
                    "code {code:?} of symbol {symbol:?} contains {found:?}"
                )));
            }
        }

        if let Some((shorter, longer)) = find_prefix_pair(&self.codes) {
            let reason = if shorter == longer {
                format!("code {shorter:?} is assigned to more than one symbol")
            } else {
                format!("code {shorter:?} is a prefix of code {longer:?}")
            };
            return Err(invalid(reason));
        }

        Ok(())
    }
}

fn invalid(reason: String) -> crate::error::Error {
    CodecError::InvalidTable { reason }.into()
}

/// Find two codes where the first is a prefix of (or equal to) the second.
///
/// After a lexicographic sort every string lying between a code and one of
/// its extensions shares that code as a prefix, so checking neighbours is
/// enough.
fn find_prefix_pair(codes: &BTreeMap<char, String>) -> Option<(String, String)> {
    let mut sorted: Vec<&str> = codes.values().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted
        .windows(2)
        .find(|pair| pair[1].starts_with(pair[0]))
        .map(|pair| (pair[0].to_string(), pair[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree;

    fn table_for(text: &str) -> CodeTable {
        let root = tree::build(&FrequencyTable::count(text)).unwrap();
        CodeTable::derive(&root)
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let table = table_for("aaaa");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get('a'), Some("0"));
    }

    #[test]
    fn test_abracadabra_codes() {
        let table = table_for("abracadabra");

        assert_eq!(table.get('a'), Some("0"));
        assert_eq!(table.get('c'), Some("100"));
        assert_eq!(table.get('d'), Some("101"));
        assert_eq!(table.get('b'), Some("110"));
        assert_eq!(table.get('r'), Some("111"));
        assert!(table.is_prefix_free());
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_every_symbol_present_once() {
        let text = "the quick brown fox jumps over the lazy dog";
        let table = table_for(text);
        let freq = FrequencyTable::count(text);

        assert_eq!(table.len(), freq.len());
        for (symbol, _) in freq.iter() {
            assert!(table.contains(symbol), "missing {symbol:?}");
        }
    }

    #[test]
    fn test_weighted_length() {
        let text = "abracadabra";
        let table = table_for(text);
        // a:5*1 + b:2*3 + r:2*3 + c:1*3 + d:1*3
        assert_eq!(table.weighted_length(&FrequencyTable::count(text)), 23);
        assert_eq!(table.max_code_len(), 3);
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        // Doubling weights give a chain whose depth equals the alphabet size
        let mut freq = FrequencyTable::new();
        let symbols: Vec<char> = ('a'..='z').collect();
        for (i, &symbol) in symbols.iter().enumerate().take(20) {
            for _ in 0..(1u64 << i) {
                freq.record(symbol);
            }
        }
        let root = tree::build(&freq).unwrap();
        let table = CodeTable::derive(&root);

        assert_eq!(table.len(), 20);
        assert_eq!(table.max_code_len(), 19);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_from_pairs_rejects_duplicate_symbol() {
        let result = CodeTable::from_pairs([('a', "0"), ('a', "1")]);
        assert!(matches!(
            result,
            Err(crate::error::Error::Codec(CodecError::InvalidTable { .. }))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_codes() {
        let cases: [&[(char, &str)]; 4] = [
            &[('a', ""), ('b', "1")],
            &[('a', "0"), ('b', "12")],
            &[('a', "01"), ('b', "01")],
            &[('a', "0"), ('b', "01")],
        ];
        for pairs in cases {
            let table = CodeTable::from_pairs(pairs.iter().copied()).unwrap();
            assert!(
                matches!(
                    table.validate(),
                    Err(crate::error::Error::Codec(CodecError::InvalidTable { .. }))
                ),
                "accepted {pairs:?}"
            );
        }
    }

    #[test]
    fn test_prefix_detection_with_neighbours() {
        // "0" and "01" are separated by "001" after sorting
        let table = CodeTable::from_pairs([('a', "0"), ('b', "001"), ('c', "01")]).unwrap();
        assert!(!table.is_prefix_free());

        let table = CodeTable::from_pairs([('a', "00"), ('b', "01"), ('c', "1")]).unwrap();
        assert!(table.is_prefix_free());
    }
}
