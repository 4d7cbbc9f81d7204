//! In-memory B+ tree over unique integer keys.
//!
//! All keys live in leaves, which are chained left to right in key order.
//! Internal nodes only hold separators that steer descent.
//!
//! # Insert flow
//! ```text
//!   insert(k)
//!      │
//!      ▼
//!   descend ──── records (internal, child index) per level
//!      │
//!      ▼
//!   leaf insert ── duplicate? ──▶ done
//!      │
//!      ▼ overflow
//!   split_leaf ── separator is COPIED up (stays in right leaf)
//!      │
//!      ▼
//!   propagate ─── parent overflow? ── split_internal (separator MOVED up)
//!      │                                   │
//!      ▼ path empty                        └──▶ propagate one level up
//!   grow_root
//! ```

use crate::common::config::{validate_max_keys, DEFAULT_MAX_KEYS};
use crate::common::{NodeId, Result};
use crate::index::btree::iter::{Keys, Leaves};
use crate::index::btree::node::{InternalNode, Key, LeafNode, NodeRef};
use crate::index::btree::stats::TreeStats;
use crate::index::btree::trace::{Trace, TracePoint};

/// An ordered index over unique `i64` keys.
///
/// # Layout
/// Nodes live in two arenas owned by the tree, one per node shape. Internal
/// nodes refer to their children by [`NodeRef`], leaves refer to their right
/// sibling by [`NodeId`]. Nodes are never removed, so ids stay valid.
///
/// # Thread Safety
/// None. The tree is a single-owner structure; mutation takes `&mut self`,
/// so callers that share it must serialize access themselves.
///
/// # Usage
/// ```
/// use bplus_index::BPlusTree;
///
/// let mut tree = BPlusTree::new();
/// for key in [30, 10, 20, 10] {
///     tree.insert(key);
/// }
///
/// assert!(tree.contains(20));
/// assert!(!tree.contains(25));
/// assert_eq!(tree.keys_in_order(), vec![10, 20, 30]);
/// ```
#[derive(Debug, Clone)]
pub struct BPlusTree {
    /// Leaf arena, indexed by `NodeId`.
    pub(super) leaves: Vec<LeafNode>,

    /// Internal node arena, indexed by `NodeId`.
    pub(super) internals: Vec<InternalNode>,

    /// Reassigned only when the root splits.
    pub(super) root: NodeRef,

    /// Capacity of every node (keys per leaf, separators per internal node).
    pub(super) max_keys: usize,

    /// Number of distinct keys.
    pub(super) len: usize,

    /// Levels from root to leaf, inclusive.
    pub(super) height: usize,

    pub(super) stats: TreeStats,
}

impl BPlusTree {
    /// Create an empty tree with the default capacity of 7.
    pub fn new() -> Self {
        Self::with_validated_max_keys(DEFAULT_MAX_KEYS)
    }

    /// Create an empty tree holding at most `max_keys` keys per node.
    ///
    /// # Errors
    /// `Error::InvalidMaxKeys` if `max_keys < 3`.
    pub fn with_max_keys(max_keys: usize) -> Result<Self> {
        let max_keys = validate_max_keys(max_keys)?;
        Ok(Self::with_validated_max_keys(max_keys))
    }

    fn with_validated_max_keys(max_keys: usize) -> Self {
        Self {
            leaves: vec![LeafNode::new()],
            internals: Vec::new(),
            root: NodeRef::Leaf(NodeId::new(0)),
            max_keys,
            len: 0,
            height: 1,
            stats: TreeStats::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Configured node capacity.
    pub fn max_keys(&self) -> usize {
        self.max_keys
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels, 1 while the root is still a leaf.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Snapshot of the structural counters.
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Zero the structural counters. The tree's contents are untouched.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Separator keys of the root, empty while the root is a leaf.
    pub fn root_separators(&self) -> &[Key] {
        match self.root {
            NodeRef::Leaf(_) => &[],
            NodeRef::Internal(id) => &self.internals[id.0].separators,
        }
    }

    // ========================================================================
    // Public API: Insert and lookup
    // ========================================================================

    /// Insert `key`.
    ///
    /// Inserting a key that is already present is a no-op. Returns whether
    /// the key was newly added.
    pub fn insert(&mut self, key: Key) -> bool {
        self.insert_traced(key, &mut Trace::off())
    }

    /// Insert `key` and return the algorithm points the insert passed through.
    pub fn insert_with_trace(&mut self, key: Key) -> Vec<TracePoint> {
        let mut points = Vec::new();
        self.insert_traced(key, &mut Trace::recording(&mut points));
        points
    }

    /// Insert every key in order, returning one concatenated trace.
    pub fn insert_all_with_trace<I>(&mut self, keys: I) -> Vec<TracePoint>
    where
        I: IntoIterator<Item = Key>,
    {
        let mut points = Vec::new();
        for key in keys {
            self.insert_traced(key, &mut Trace::recording(&mut points));
        }
        points
    }

    /// Whether `key` has been inserted.
    pub fn contains(&self, key: Key) -> bool {
        let leaf_id = self.find_leaf(key);
        self.leaves[leaf_id.0].contains(key)
    }

    // ========================================================================
    // Public API: Ordered traversal
    // ========================================================================

    /// All keys in ascending order.
    pub fn keys_in_order(&self) -> Vec<Key> {
        self.iter().collect()
    }

    /// Iterate keys in ascending order by walking the leaf chain.
    pub fn iter(&self) -> Keys<'_> {
        Keys::new(self.leaves())
    }

    /// Iterate each leaf's keys, leftmost leaf first.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(&self.leaves, self.leftmost_leaf())
    }

    // ========================================================================
    // Internal: Insert
    // ========================================================================

    fn insert_traced(&mut self, key: Key, trace: &mut Trace<'_>) -> bool {
        trace.record(TracePoint::StartInsert);
        if self.root.is_leaf() {
            trace.record(TracePoint::RootIsLeaf);
        }

        let (leaf_id, mut path) = self.descend(key, trace);
        trace.record(TracePoint::LeafFound);

        let max_keys = self.max_keys;
        let leaf = &mut self.leaves[leaf_id.0];
        let pos = leaf.insert_position(key);
        if leaf.keys.get(pos) == Some(&key) {
            tracing::trace!(key, "duplicate insert ignored");
            self.stats.duplicate_inserts += 1;
            trace.record(TracePoint::DuplicateKey);
            trace.record(TracePoint::EndInsert);
            return false;
        }

        leaf.keys.insert(pos, key);
        let overflow = leaf.keys.len() > max_keys;
        self.len += 1;
        self.stats.inserts += 1;
        trace.record(TracePoint::LeafInsert);

        if overflow {
            trace.record(TracePoint::LeafOverflow);
            self.split_leaf(leaf_id, &mut path, trace);
        }

        trace.record(TracePoint::EndInsert);
        true
    }
}

impl Default for BPlusTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Key> for BPlusTree {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<Key> for BPlusTree {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a> IntoIterator for &'a BPlusTree {
    type Item = Key;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    fn tree_with(keys: impl IntoIterator<Item = Key>) -> BPlusTree {
        keys.into_iter().collect()
    }

    #[test]
    fn test_new_tree_is_empty_leaf_root() {
        let tree = BPlusTree::new();
        assert_eq!(tree.max_keys(), 7);
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 1);
        assert!(tree.root.is_leaf());
        assert!(tree.root_separators().is_empty());
        assert_eq!(tree.keys_in_order(), Vec::<Key>::new());
        assert!(!tree.contains(0));
    }

    #[test]
    fn test_rejects_small_capacity() {
        assert_eq!(
            BPlusTree::with_max_keys(2).unwrap_err(),
            Error::InvalidMaxKeys { max_keys: 2, min: 3 }
        );
        assert_eq!(BPlusTree::with_max_keys(3).unwrap().max_keys(), 3);
    }

    #[test]
    fn test_insert_returns_whether_added() {
        let mut tree = BPlusTree::new();
        assert!(tree.insert(42));
        assert!(!tree.insert(42));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.stats().duplicate_inserts, 1);
    }

    #[test]
    fn test_reset_stats_clears_tree_counters() {
        let mut tree = tree_with((1..=40).chain([5, 6]));
        assert!(tree.stats().leaf_splits > 0);
        assert_eq!(tree.stats().duplicate_inserts, 2);
        let height = tree.height();

        tree.reset_stats();

        assert_eq!(tree.stats(), TreeStats::new());
        assert_eq!(tree.len(), 40);
        assert_eq!(tree.height(), height);
        assert_eq!(tree.keys_in_order(), (1..=40).collect::<Vec<_>>());

        // Counting resumes from zero on the next split.
        for key in 41..=44 {
            tree.insert(key);
        }
        assert_eq!(tree.stats().inserts, 4);
        assert_eq!(tree.stats().leaf_splits, 1);
    }

    #[test]
    fn test_first_leaf_split_copies_separator() {
        let tree = tree_with((1..=8).map(|i| i * 10));

        assert_eq!(tree.height(), 2);
        assert_eq!(tree.root_separators(), &[50]);

        let NodeRef::Internal(root_id) = tree.root else {
            panic!("root should be internal after a split");
        };
        let root = &tree.internals[root_id.0];
        let (NodeRef::Leaf(left), NodeRef::Leaf(right)) = (root.children[0], root.children[1])
        else {
            panic!("root children should be leaves");
        };

        assert_eq!(tree.leaves[left.0].keys, vec![10, 20, 30, 40]);
        assert_eq!(tree.leaves[right.0].keys, vec![50, 60, 70, 80]);
        assert_eq!(tree.leaves[left.0].next, Some(right));
        assert_eq!(tree.leaves[right.0].next, None);
    }

    #[test]
    fn test_internal_split_moves_separator() {
        let tree = tree_with((1..=36).map(|i| i * 10));

        assert_eq!(tree.height(), 3);
        let NodeRef::Internal(root_id) = tree.root else {
            panic!("root should be internal");
        };
        let root = &tree.internals[root_id.0];
        assert_eq!(root.separators.len(), 1);
        let promoted = root.separators[0];

        for child in &root.children {
            let NodeRef::Internal(child_id) = *child else {
                panic!("height 3 root should have internal children");
            };
            assert!(!tree.internals[child_id.0].separators.contains(&promoted));
        }
        // Still present as data in a leaf.
        assert!(tree.contains(promoted));
        assert_eq!(tree.stats().internal_splits, 1);
        assert_eq!(tree.stats().root_splits, 2);
    }

    #[test]
    fn test_from_iterator_and_into_iterator() {
        let tree: BPlusTree = [5, -3, 9, 5, 0].into_iter().collect();
        let collected: Vec<Key> = (&tree).into_iter().collect();
        assert_eq!(collected, vec![-3, 0, 5, 9]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_extreme_keys() {
        let mut tree = BPlusTree::with_max_keys(3).unwrap();
        tree.extend([i64::MAX, i64::MIN, 0, -1, 1, i64::MAX - 1, i64::MIN + 1]);

        assert_eq!(
            tree.keys_in_order(),
            vec![i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX - 1, i64::MAX]
        );
        assert!(tree.contains(i64::MIN));
        assert!(tree.contains(i64::MAX));
        tree.validate().unwrap();
    }

    #[test]
    fn test_descending_inserts_with_min_capacity() {
        let mut tree = BPlusTree::with_max_keys(3).unwrap();
        for key in (0..200).rev() {
            tree.insert(key);
            tree.validate().unwrap();
        }
        assert_eq!(tree.keys_in_order(), (0..200).collect::<Vec<_>>());
    }
}
