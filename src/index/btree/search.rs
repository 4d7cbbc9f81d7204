//! Root-to-leaf descent.
//!
//! Lookup and insert share the same routing rule: at each internal node take
//! the child whose index equals the number of separators `<= key`. Insert
//! additionally records the path so splits can walk back up without parent
//! pointers.

use crate::common::NodeId;
use crate::index::btree::node::{Key, NodeRef};
use crate::index::btree::trace::{Trace, TracePoint};
use crate::index::btree::tree::BPlusTree;

/// One step of a descent: an internal node and the child index taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PathEntry {
    pub node: NodeId,
    pub child_index: usize,
}

/// Ancestors of a leaf, root first. Popping yields the innermost ancestor.
pub(super) type Path = Vec<PathEntry>;

impl BPlusTree {
    /// Find the leaf that holds `key` if it is present.
    pub(super) fn find_leaf(&self, key: Key) -> NodeId {
        let mut current = self.root;
        loop {
            match current {
                NodeRef::Leaf(id) => return id,
                NodeRef::Internal(id) => {
                    let node = &self.internals[id.0];
                    current = node.children[node.child_index(key)];
                }
            }
        }
    }

    /// Like `find_leaf`, but also returns the path taken.
    pub(super) fn descend(&self, key: Key, trace: &mut Trace<'_>) -> (NodeId, Path) {
        let mut path = Path::with_capacity(self.height - 1);
        let mut current = self.root;
        loop {
            match current {
                NodeRef::Leaf(id) => return (id, path),
                NodeRef::Internal(id) => {
                    let node = &self.internals[id.0];
                    let child_index = node.child_index(key);
                    trace.record(TracePoint::DescendInternal);
                    path.push(PathEntry {
                        node: id,
                        child_index,
                    });
                    current = node.children[child_index];
                }
            }
        }
    }

    /// Start of the leaf chain, found by always taking the first child.
    pub(super) fn leftmost_leaf(&self) -> NodeId {
        let mut current = self.root;
        loop {
            match current {
                NodeRef::Leaf(id) => return id,
                NodeRef::Internal(id) => current = self.internals[id.0].children[0],
            }
        }
    }
}
