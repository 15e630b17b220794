//! Huffman tree construction.
//!
//! Repeatedly merges the two lightest nodes until a single root remains.
//!
//! # Tie-break
//!
//! Candidates are ordered by `(weight, sequence)`. Leaves receive sequence
//! numbers in the frequency table's first-occurrence order, and every merged
//! node receives the next number after all nodes created before it. Among
//! equal weights the node created earlier is therefore picked first, which is
//! the order a stable ascending sort of the working list would produce on
//! every iteration. The first node extracted becomes the left child.
//!
//! # Ownership
//!
//! Each node is exclusively owned by its parent through a `Box`; the tree is
//! dropped as a unit once the code table has been extracted.

use crate::frequency::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

/// A node of the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// Holds exactly one symbol and its frequency
    Leaf { symbol: char, weight: u64 },

    /// Holds two children and the summed weight of their leaves
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Create a leaf node.
    pub fn leaf(symbol: char, weight: u64) -> Self {
        HuffmanNode::Leaf { symbol, weight }
    }

    /// Join two subtrees under a new internal node.
    ///
    /// `left` is the node selected first (the lighter one, or the earlier one
    /// on a tie).
    pub fn merge(left: Self, right: Self) -> Self {
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => count += 1,
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path (0 for a lone leaf).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => height = height.max(depth),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((right.as_ref(), depth + 1));
                    stack.push((left.as_ref(), depth + 1));
                }
            }
        }
        height
    }
}

/// A node waiting in the build queue.
#[derive(Debug)]
struct Candidate {
    node: HuffmanNode,
    sequence: usize,
}

// Implement ordering for the heap (min-heap: lightest, then oldest, first)
impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        (other.node.weight(), other.sequence).cmp(&(self.node.weight(), self.sequence))
    }
}

/// Build a Huffman tree from a frequency table.
///
/// # Returns
/// - `None` if the table is empty (no tree can be built from zero symbols)
/// - A single leaf if the table holds exactly one symbol
/// - Otherwise the root of a full binary tree with one leaf per symbol
pub fn build(freq: &FrequencyTable) -> Option<HuffmanNode> {
    let mut queue: BinaryHeap<Candidate> = freq
        .iter()
        .enumerate()
        .map(|(sequence, (symbol, weight))| Candidate {
            node: HuffmanNode::leaf(symbol, weight),
            sequence,
        })
        .collect();
    let mut next_sequence = queue.len();

    while queue.len() > 1 {
        let (Some(first), Some(second)) = (queue.pop(), queue.pop()) else {
            break;
        };
        trace!(
            left = first.node.weight(),
            right = second.node.weight(),
            "merging nodes"
        );
        queue.push(Candidate {
            node: HuffmanNode::merge(first.node, second.node),
            sequence: next_sequence,
        });
        next_sequence += 1;
    }

    queue.pop().map(|candidate| candidate.node)
}
