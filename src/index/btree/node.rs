//! B+ tree node types.
//!
//! The tree uses two node shapes:
//! - Leaf nodes: store the keys themselves, singly linked left to right
//! - Internal nodes: store separator keys and references to child nodes
//!
//! Each shape lives in its own arena inside the tree, so a [`NodeRef`]
//! carries both the shape and the arena slot. Descent never has to guess
//! which kind of node it is looking at.

use std::fmt;

use crate::common::NodeId;

/// A key stored in the index.
pub type Key = i64;

/// Reference to a node: which arena it lives in, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Leaf(NodeId),
    Internal(NodeId),
}

impl NodeRef {
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeRef::Leaf(_))
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Leaf(id) => write!(f, "Leaf({})", id.0),
            NodeRef::Internal(id) => write!(f, "Internal({})", id.0),
        }
    }
}

/// A leaf node.
///
/// Keys are strictly ascending. `next` is the leaf immediately to the right
/// in key order, `None` for the rightmost leaf. The link does not own the
/// sibling; every leaf is owned through the root-to-leaf hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LeafNode {
    pub(crate) keys: Vec<Key>,
    pub(crate) next: Option<NodeId>,
}

impl LeafNode {
    /// Create a new empty leaf with no right sibling.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Index of the first key `>= key` (the sorted insertion point).
    pub(crate) fn insert_position(&self, key: Key) -> usize {
        self.keys.partition_point(|&k| k < key)
    }

    /// Whether `key` is stored in this leaf.
    pub(crate) fn contains(&self, key: Key) -> bool {
        let pos = self.insert_position(key);
        self.keys.get(pos) == Some(&key)
    }
}

/// An internal (non-leaf) node.
///
/// Stores N separators and N+1 children.
/// `children[i]` contains keys < `separators[i]`
/// `children[i+1]` contains keys >= `separators[i]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InternalNode {
    /// Separator keys in sorted order.
    pub(crate) separators: Vec<Key>,
    /// `children.len()` == `separators.len()` + 1
    pub(crate) children: Vec<NodeRef>,
}

impl InternalNode {
    /// Create an internal node with a single separator and two children.
    ///
    /// This is the shape of every freshly grown root.
    pub(crate) fn with_children(left: NodeRef, separator: Key, right: NodeRef) -> Self {
        Self {
            separators: vec![separator],
            children: vec![left, right],
        }
    }

    /// Index of the child to descend into for `key`.
    ///
    /// Equal to the number of separators `<= key`, so a key equal to a
    /// separator routes right, where the leaf split left its copy.
    pub(crate) fn child_index(&self, key: Key) -> usize {
        self.separators.partition_point(|&s| s <= key)
    }
}
