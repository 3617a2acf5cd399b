use crate::bits::{bit_width, midpoint};
use crate::intbuf::IntBuf;
use crate::Symbol;

/// Index of a node in the tree's node arena.
pub(crate) type NodeId = usize;

/// Wavelet tree over a sequence of integer symbols, answering prefix rank queries
/// ("how many times does `symbol` occur in `0..=index`") in time proportional to
/// the depth of the tree, which is at most `ceil(log2(max - min + 1)) + 1`.
///
/// The tree partitions the closed value range `[min, max]` of the input sequence,
/// not its positions. Every node owns a value band `[low, high]` and represents the
/// subsequence of symbols inherited from its parent that fall into that band, in
/// their original relative order. Internal nodes split their band at the midpoint
/// and record, for every position of their subsequence, how many symbols up to and
/// including that position went to the lower half.
///
/// The tree is written once at construction and never mutated afterwards, so any
/// number of readers may query it concurrently.
#[derive(Debug, Clone)]
pub struct RankTree {
    nodes: Vec<Node>,     // node arena; children always precede their parent
    root: Option<NodeId>, // absent for an empty sequence
    len: usize,           // number of symbols
    depth: usize,         // number of nodes on the longest root-to-leaf path
}

#[derive(Debug, Clone)]
struct Node {
    low: Symbol,  // lowest symbol of this node's band
    high: Symbol, // highest symbol of this node's band
    kind: NodeKind,
}

#[derive(Debug, Clone)]
enum NodeKind {
    /// A band holding a single distinct value, or a subsequence of length one.
    /// Either way every element of the local subsequence equals `symbol`.
    Leaf { symbol: Symbol },
    Internal {
        // entry i is the number of local symbols at positions 0..=i that are <= mid
        prefix_zeros: IntBuf,
        left: Option<NodeId>,  // band [low, mid]
        right: Option<NodeId>, // band [mid + 1, high]
    },
}

impl RankTree {
    pub fn new(data: &[Symbol]) -> RankTree {
        let (Some(&low), Some(&high)) = (data.iter().min(), data.iter().max()) else {
            return RankTree {
                nodes: vec![],
                root: None,
                len: 0,
                depth: 0,
            };
        };

        let mut nodes = Vec::new();
        let mut depth = 0;
        let root = Self::build(data, low, high, 1, &mut nodes, &mut depth);

        tracing::debug!(
            len = data.len(),
            low,
            high,
            num_nodes = nodes.len(),
            depth,
            "built rank tree"
        );

        RankTree {
            nodes,
            root,
            len: data.len(),
            depth,
        }
    }

    // Build the subtree for the local subsequence `data`, whose symbols all lie in
    // `[low, high]`, and return its index in the arena. Each call scans `data` once,
    // so each level of the tree costs O(n) and the whole build O(n log σ).
    fn build(
        data: &[Symbol],
        low: Symbol,
        high: Symbol,
        level: usize,
        nodes: &mut Vec<Node>,
        depth: &mut usize,
    ) -> Option<NodeId> {
        if data.is_empty() || low > high {
            return None;
        }
        *depth = (*depth).max(level);

        if low == high || data.len() == 1 {
            nodes.push(Node {
                low,
                high,
                kind: NodeKind::Leaf { symbol: data[0] },
            });
            return Some(nodes.len() - 1);
        }

        let mid = midpoint(low, high);

        // Stably partition the symbols by band, recording the running count
        // of symbols that went left after each position.
        let mut prefix_zeros = IntBuf::new(data.len(), bit_width(data.len()));
        let mut left_data = Vec::with_capacity(data.len());
        let mut right_data = Vec::with_capacity(data.len());
        for &symbol in data {
            if symbol <= mid {
                left_data.push(symbol);
            } else {
                right_data.push(symbol);
            }
            prefix_zeros.push(left_data.len() as u64);
        }

        let left = Self::build(&left_data, low, mid, level + 1, nodes, depth);
        drop(left_data);
        // mid < high here, so mid + 1 cannot overflow
        let right = Self::build(&right_data, mid + 1, high, level + 1, nodes, depth);

        nodes.push(Node {
            low,
            high,
            kind: NodeKind::Internal {
                prefix_zeros,
                left,
                right,
            },
        });
        Some(nodes.len() - 1)
    }

    /// Number of occurrences of `symbol` in positions `0..=index` of the sequence
    /// this tree was built from.
    ///
    /// Returns 0 when `index >= self.size()`, when the tree is empty, and when the
    /// symbol lies outside the tree's value range. Callers that need to tell an
    /// invalid index apart from a zero count must check the index themselves.
    pub fn rank(&self, symbol: Symbol, index: usize) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        if index >= self.len {
            return 0;
        }

        // `index` is always relative to the current node's local subsequence
        let mut node_id = root;
        let mut index = index;
        loop {
            let node = &self.nodes[node_id];
            if symbol < node.low || symbol > node.high {
                return 0;
            }
            match &node.kind {
                NodeKind::Leaf { symbol: leaf_symbol } => {
                    // every element up to and including `index` is the leaf symbol
                    return if *leaf_symbol == symbol { index + 1 } else { 0 };
                }
                NodeKind::Internal {
                    prefix_zeros,
                    left,
                    right,
                } => {
                    let zeros = prefix_zeros.get(index) as usize;
                    let ones = (index + 1) - zeros;
                    let (child, count) = if symbol <= midpoint(node.low, node.high) {
                        (*left, zeros)
                    } else {
                        (*right, ones)
                    };
                    match child {
                        // the last of the `count` symbols routed to the child
                        // sits at local index `count - 1` there
                        Some(child) if count > 0 => {
                            node_id = child;
                            index = count - 1;
                        }
                        _ => return 0,
                    }
                }
            }
        }
    }

    /// Return the symbol at `index` of the original sequence, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<Symbol> {
        if index >= self.len {
            return None;
        }
        let mut node_id = self.root?;
        let mut index = index;
        loop {
            match &self.nodes[node_id].kind {
                NodeKind::Leaf { symbol } => return Some(*symbol),
                NodeKind::Internal {
                    prefix_zeros,
                    left,
                    right,
                } => {
                    let zeros = prefix_zeros.get(index) as usize;
                    let preceding_zeros = if index == 0 {
                        0
                    } else {
                        prefix_zeros.get(index - 1) as usize
                    };
                    if zeros > preceding_zeros {
                        // go left
                        node_id = (*left)?;
                        index = zeros - 1;
                    } else {
                        // go right
                        node_id = (*right)?;
                        index = index - zeros;
                    }
                }
            }
        }
    }

    /// Length of the sequence this tree was built from.
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Smallest symbol in the sequence, if any.
    pub fn min_symbol(&self) -> Option<Symbol> {
        self.root.map(|root| self.nodes[root].low)
    }

    /// Largest symbol in the sequence, if any.
    pub fn max_symbol(&self) -> Option<Symbol> {
        self.root.map(|root| self.nodes[root].high)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes on the longest root-to-leaf path; zero for an empty tree.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Walk the tree and assert the structural invariants of every node.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let Some(root) = self.root else {
            assert_eq!(self.len, 0);
            assert!(self.nodes.is_empty());
            return;
        };
        let span = i64::from(self.nodes[root].high) - i64::from(self.nodes[root].low) + 1;
        let max_depth = (span as u64).next_power_of_two().ilog2() as usize + 1;
        assert!(self.depth <= max_depth, "depth {} > {}", self.depth, max_depth);

        // (node, expected local length, level)
        let mut stack = vec![(root, self.len, 1)];
        let mut visited = 0;
        while let Some((node_id, len, level)) = stack.pop() {
            visited += 1;
            assert!(level <= self.depth);
            let node = &self.nodes[node_id];
            assert!(node.low <= node.high);
            match &node.kind {
                NodeKind::Leaf { symbol } => {
                    assert!(node.low == node.high || len == 1);
                    assert!(node.low <= *symbol && *symbol <= node.high);
                }
                NodeKind::Internal {
                    prefix_zeros,
                    left,
                    right,
                } => {
                    assert_eq!(prefix_zeros.len(), len);
                    let mut prev = 0;
                    for i in 0..len {
                        let cur = prefix_zeros.get(i);
                        assert!(cur == prev || cur == prev + 1);
                        prev = cur;
                    }
                    let zeros = prev as usize;
                    let mid = midpoint(node.low, node.high);
                    assert_eq!(left.is_some(), zeros > 0);
                    assert_eq!(right.is_some(), zeros < len);
                    if let Some(left) = *left {
                        let child = &self.nodes[left];
                        assert_eq!((child.low, child.high), (node.low, mid));
                        stack.push((left, zeros, level + 1));
                    }
                    if let Some(right) = *right {
                        let child = &self.nodes[right];
                        assert_eq!((child.low, child.high), (mid + 1, node.high));
                        stack.push((right, len - zeros, level + 1));
                    }
                }
            }
        }
        assert_eq!(visited, self.nodes.len());
    }
}

impl FromIterator<Symbol> for RankTree {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let data: Vec<Symbol> = iter.into_iter().collect();
        RankTree::new(&data)
    }
}
