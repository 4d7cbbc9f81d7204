//! Node splitting and upward propagation.
//!
//! Leaf and internal splits differ in what happens to the separator:
//! - Leaf split: the right leaf's first key is COPIED up and stays in the leaf
//! - Internal split: the middle separator is MOVED up and leaves both halves
//!
//! Propagation walks the recorded descent path innermost first. It stops at
//! the first parent that absorbs the new child without overflowing, or grows
//! a new root once the path is exhausted.

use crate::common::NodeId;
use crate::index::btree::node::{InternalNode, Key, LeafNode, NodeRef};
use crate::index::btree::search::{Path, PathEntry};
use crate::index::btree::trace::{Trace, TracePoint};
use crate::index::btree::tree::BPlusTree;

impl BPlusTree {
    /// Split an overflowing leaf and hand the new right leaf to its parent.
    pub(super) fn split_leaf(&mut self, leaf_id: NodeId, path: &mut Path, trace: &mut Trace<'_>) {
        let right_id = NodeId::new(self.leaves.len());

        let leaf = &mut self.leaves[leaf_id.0];
        let split_index = leaf.keys.len() / 2;
        let right = LeafNode {
            keys: leaf.keys.split_off(split_index),
            next: leaf.next,
        };
        leaf.next = Some(right_id);

        let separator = right.keys[0];
        self.leaves.push(right);
        self.stats.leaf_splits += 1;

        tracing::debug!(
            left = %leaf_id,
            right = %right_id,
            separator,
            "split leaf"
        );
        trace.record(TracePoint::SplitLeaf);

        self.propagate(
            NodeRef::Leaf(leaf_id),
            separator,
            NodeRef::Leaf(right_id),
            path,
            trace,
        );
    }

    /// Link `right` into the tree as the sibling after `left`.
    ///
    /// Iterative: each overflowing parent is split and the loop continues one
    /// level up with the promoted separator.
    fn propagate(
        &mut self,
        mut left: NodeRef,
        mut separator: Key,
        mut right: NodeRef,
        path: &mut Path,
        trace: &mut Trace<'_>,
    ) {
        loop {
            let Some(PathEntry {
                node: parent_id,
                child_index,
            }) = path.pop()
            else {
                self.grow_root(left, separator, right);
                trace.record(TracePoint::NewRoot);
                return;
            };

            trace.record(TracePoint::InsertInParent);

            let parent = &mut self.internals[parent_id.0];
            debug_assert_eq!(parent.children[child_index], left);
            parent.separators.insert(child_index, separator);
            parent.children.insert(child_index + 1, right);

            if parent.separators.len() <= self.max_keys {
                return;
            }

            trace.record(TracePoint::InternalOverflow);
            let (promoted, right_id) = self.split_internal(parent_id);
            trace.record(TracePoint::SplitInternal);

            left = NodeRef::Internal(parent_id);
            separator = promoted;
            right = NodeRef::Internal(right_id);
        }
    }

    /// Split an overflowing internal node around its middle separator.
    ///
    /// Returns the promoted separator and the new right node. The promoted
    /// separator is kept by neither half.
    fn split_internal(&mut self, node_id: NodeId) -> (Key, NodeId) {
        let right_id = NodeId::new(self.internals.len());

        let node = &mut self.internals[node_id.0];
        let middle = node.separators.len() / 2;
        let promoted = node.separators[middle];

        let right = InternalNode {
            separators: node.separators.split_off(middle + 1),
            children: node.children.split_off(middle + 1),
        };
        node.separators.truncate(middle);

        self.internals.push(right);
        self.stats.internal_splits += 1;

        tracing::debug!(
            left = %node_id,
            right = %right_id,
            separator = promoted,
            "split internal node"
        );

        (promoted, right_id)
    }

    /// Replace the root with a new internal node over `left` and `right`.
    fn grow_root(&mut self, left: NodeRef, separator: Key, right: NodeRef) {
        debug_assert_eq!(self.root, left);

        let root_id = NodeId::new(self.internals.len());
        self.internals
            .push(InternalNode::with_children(left, separator, right));
        self.root = NodeRef::Internal(root_id);
        self.height += 1;
        self.stats.root_splits += 1;

        tracing::debug!(
            root = %root_id,
            separator,
            height = self.height,
            "grew new root"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_split_halves_and_links() {
        let mut tree = BPlusTree::new();
        tree.leaves[0].keys = (1..=8).collect();

        tree.split_leaf(NodeId::new(0), &mut Path::new(), &mut Trace::off());

        assert_eq!(tree.leaves[0].keys, vec![1, 2, 3, 4]);
        assert_eq!(tree.leaves[1].keys, vec![5, 6, 7, 8]);
        assert_eq!(tree.leaves[0].next, Some(NodeId::new(1)));
        assert_eq!(tree.leaves[1].next, None);
        assert_eq!(tree.root_separators(), &[5]);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_leaf_split_keeps_chain_order() {
        let mut tree = BPlusTree::new();
        tree.leaves[0].keys = vec![1, 2, 3, 4];
        tree.leaves[0].next = Some(NodeId::new(1));
        tree.leaves.push(LeafNode {
            keys: vec![100],
            next: None,
        });

        tree.split_leaf(NodeId::new(0), &mut Path::new(), &mut Trace::off());

        // 0 -> 2 (new right half) -> 1
        assert_eq!(tree.leaves[0].next, Some(NodeId::new(2)));
        assert_eq!(tree.leaves[2].next, Some(NodeId::new(1)));
        assert_eq!(tree.leaves[2].keys, vec![3, 4]);
    }

    #[test]
    fn test_internal_split_drops_middle_from_both_halves() {
        let mut tree = BPlusTree::new();
        let children = (0..9).map(|i| NodeRef::Leaf(NodeId::new(i))).collect();
        tree.internals.push(InternalNode {
            separators: vec![10, 20, 30, 40, 50, 60, 70, 80],
            children,
        });

        let (promoted, right_id) = tree.split_internal(NodeId::new(0));

        assert_eq!(promoted, 50);
        let left = &tree.internals[0];
        let right = &tree.internals[right_id.0];
        assert_eq!(left.separators, vec![10, 20, 30, 40]);
        assert_eq!(right.separators, vec![60, 70, 80]);
        assert_eq!(left.children.len(), 5);
        assert_eq!(right.children.len(), 4);
        assert_eq!(right.children[0], NodeRef::Leaf(NodeId::new(5)));
    }

    #[test]
    fn test_propagate_into_parent_without_overflow() {
        let mut tree: BPlusTree = (1..=8).map(|i| i * 10).collect();
        let before = tree.internals.len();

        let trace = tree.insert_with_trace(90);
        assert!(!trace.contains(&TracePoint::LeafOverflow));

        for key in [100, 110, 120] {
            tree.insert(key);
        }
        assert_eq!(tree.root_separators(), &[50, 90]);
        assert_eq!(tree.internals.len(), before);
        assert_eq!(tree.height(), 2);
    }
}
