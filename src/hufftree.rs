use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        byte: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(byte: u8, weight: u64) -> Self {
        HuffNode::Leaf { weight, byte }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// Join two subtrees; `zero` becomes the left ("0") branch.
    ///
    /// Returns `None` if the combined weight does not fit in a `u64`.
    pub fn merge(zero: Self, one: Self) -> Option<Self> {
        let weight = zero.weight().checked_add(one.weight())?;
        Some(HuffNode::Internal {
            weight,
            left: Box::new(zero),
            right: Box::new(one),
        })
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn write_structure(&self, f: &mut fmt::Formatter<'_>, depth: usize, label: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            HuffNode::Leaf { byte, weight } => {
                writeln!(f, "{indent}{label}-> Leaf: {:?} (0x{byte:02x}) [weight: {weight}]", *byte as char)
            }
            HuffNode::Internal { weight, left, right } => {
                writeln!(f, "{indent}{label}-> Internal [weight: {weight}]")?;
                left.write_structure(f, depth + 1, "0")?;
                right.write_structure(f, depth + 1, "1")
            }
        }
    }
}

/// Queue entry for tree building.
///
/// Ordered by weight, then by sequence number. Leaves are numbered in the
/// order their symbols were first observed and every merged node takes the
/// next unused number, so no two entries ever compare equal.
#[derive(Debug)]
struct Pending {
    weight: u64,
    seq: u64,
    node: HuffNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Build the minimum-weight code tree for `frequencies`.
    ///
    /// Returns `None` for an empty table: there is nothing to code.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let leaves: Vec<Pending> = frequencies
            .iter()
            .zip(0u64..)
            .map(|((byte, weight), seq)| Pending {
                weight,
                seq,
                node: HuffNode::leaf(byte, weight),
            })
            .collect();

        let mut next_seq = leaves.len() as u64;
        let mut heap = MinHeap::build(leaves);

        while heap.len() > 1 {
            let (Some(zero), Some(one)) = (heap.extract_min(), heap.extract_min()) else {
                break;
            };
            // merged weights never exceed frequencies.total(), which fits in u64
            let node = HuffNode::merge(zero.node, one.node)?;
            heap.insert(Pending {
                weight: node.weight(),
                seq: next_seq,
                node,
            });
            next_seq += 1;
        }

        let tree = HuffmanTree {
            root: heap.extract_min()?.node,
        };
        debug!(
            symbols = tree.leaf_count(),
            depth = tree.depth(),
            weight = tree.weight(),
            "built huffman tree"
        );
        trace!("huffman tree structure:\n{tree}");
        Some(tree)
    }

    /// Shorthand for counting `bytes` and building from the result.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::build(&FrequencyTable::from_bytes(bytes))
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Total weight, i.e. the number of symbols the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_structure(f, 0, "root")
    }
}
