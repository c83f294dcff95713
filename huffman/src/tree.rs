use std::cmp::Ordering;
use std::collections::HashMap;

use crate::frequency::FrequencyTable;
use crate::heap::MinHeap;

/// Creation-order tag of a node, unique within one tree.
pub type NodeId = usize;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    Leaf {
        id: NodeId,
        weight: u64,
        symbol: char,
    },
    /// `right` is only absent in the wrapper around the single leaf of a
    /// one-symbol alphabet.
    Internal {
        id: NodeId,
        weight: u64,
        left: Box<Node>,
        right: Option<Box<Node>>,
    },
}

impl Node {
    pub fn id(&self) -> NodeId {
        match *self {
            Node::Leaf { id, .. } | Node::Internal { id, .. } => id,
        }
    }
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }
    pub fn symbol(&self) -> Option<char> {
        match *self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }
    pub fn is_leaf(&self) -> bool {
        self.symbol().is_some()
    }
    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, .. } => Some(&**left),
        }
    }
    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { right, .. } => right.as_deref(),
        }
    }
    /// The symbol of a single-symbol wrapper, i.e. an internal node whose
    /// only child is a leaf.
    pub fn wrapped_symbol(&self) -> Option<char> {
        match self {
            Node::Internal { left, right: None, .. } => left.symbol(),
            _ => None,
        }
    }
}

/// Queue entry ordered by weight, then by creation order.
///
/// Ids are unique, so the order is total and equal weights leave the queue
/// first-in first-out.
struct Queued(Node);

impl Queued {
    fn key(&self) -> (u64, NodeId) {
        (self.0.weight(), self.0.id())
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Queued) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Queued) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Queued) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// A Huffman tree, exclusively owning its nodes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tree {
    root: Node,
    num_nodes: usize,
}

impl Tree {
    /// Builds the tree for the given frequencies, `None` if there are none.
    ///
    /// The same table always yields the same tree.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Option<Tree> {
        if frequencies.is_empty() {
            return None;
        }
        let mut next_id: NodeId = 0;
        let mut queue = MinHeap::with_capacity(frequencies.len());
        for (symbol, weight) in frequencies.iter() {
            queue.insert(Queued(Node::Leaf {
                id: next_id,
                weight: weight,
                symbol: symbol,
            }));
            next_id += 1;
        }

        if queue.len() == 1 {
            let Queued(leaf) = queue.extract_min()?;
            trace!("single symbol {:?}, wrapping leaf", leaf.symbol());
            let root = Node::Internal {
                id: next_id,
                weight: leaf.weight(),
                left: Box::new(leaf),
                right: None,
            };
            return Some(Tree {
                root: root,
                num_nodes: next_id + 1,
            });
        }

        while queue.len() > 1 {
            // `queue.len() > 1`, so both extractions succeed.
            let Queued(left) = queue.extract_min()?;
            let Queued(right) = queue.extract_min()?;
            trace!(
                "merging #{} ({}) and #{} ({}) into #{}",
                left.id(),
                left.weight(),
                right.id(),
                right.weight(),
                next_id
            );
            let merged = Node::Internal {
                id: next_id,
                weight: left.weight().saturating_add(right.weight()),
                left: Box::new(left),
                right: Some(Box::new(right)),
            };
            next_id += 1;
            queue.insert(Queued(merged));
        }
        let Queued(root) = queue.extract_min()?;
        Some(Tree {
            root: root,
            num_nodes: next_id,
        })
    }
    pub fn root(&self) -> &Node {
        &self.root
    }
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }
    pub fn num_leaves(&self) -> usize {
        self.preorder().filter(|&(_, n)| n.is_leaf()).count()
    }
    /// Depth-first traversal, left before right, yielding each node together
    /// with its depth.
    pub fn preorder(&self) -> Preorder {
        Preorder {
            stack: vec![(0, &self.root)],
        }
    }
    /// Maps every node except the root to its parent.
    pub fn parents(&self) -> HashMap<NodeId, NodeId> {
        let mut parents = HashMap::with_capacity(self.num_nodes);
        for (_, node) in self.preorder() {
            for child in node.left().into_iter().chain(node.right()) {
                parents.insert(child.id(), node.id());
            }
        }
        parents
    }
}

pub struct Preorder<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (usize, &'a Node);
    fn next(&mut self) -> Option<(usize, &'a Node)> {
        let (depth, node) = self.stack.pop()?;
        if let Some(right) = node.right() {
            self.stack.push((depth + 1, right));
        }
        if let Some(left) = node.left() {
            self.stack.push((depth + 1, left));
        }
        Some((depth, node))
    }
}

/// See [`Tree::from_frequencies`].
pub fn build_tree(frequencies: &FrequencyTable) -> Option<Tree> {
    Tree::from_frequencies(frequencies)
}
