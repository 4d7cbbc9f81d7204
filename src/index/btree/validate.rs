//! Structural invariant checks.

use crate::common::{Error, NodeId, Result};
use crate::index::btree::node::{Key, NodeRef};
use crate::index::btree::tree::BPlusTree;

/// Half-open key range `[lower, upper)` a subtree must stay within.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    lower: Option<Key>,
    upper: Option<Key>,
}

impl Bounds {
    const ALL: Bounds = Bounds {
        lower: None,
        upper: None,
    };

    fn admits(&self, key: Key) -> bool {
        !matches!(self.lower, Some(lo) if key < lo) && !matches!(self.upper, Some(hi) if key >= hi)
    }
}

/// Accumulated while walking the tree.
#[derive(Default)]
struct Walk {
    leaves_in_order: Vec<NodeId>,
    leaf_depth: Option<usize>,
    internals_seen: usize,
    keys_seen: usize,
}

impl BPlusTree {
    /// Check every structural invariant of the tree.
    ///
    /// Verifies node capacities, key ordering, separator bounds, child counts,
    /// uniform leaf depth, and that the leaf chain visits exactly the leaves
    /// reachable from the root in the same order.
    ///
    /// # Errors
    /// `Error::InvariantViolation` naming the first offending node.
    pub fn validate(&self) -> Result<()> {
        let mut walk = Walk::default();
        self.validate_node(self.root, Bounds::ALL, 1, &mut walk)?;

        if walk.leaf_depth != Some(self.height) {
            return Err(Error::violation(
                self.root,
                format!(
                    "recorded height {} but leaves sit at depth {:?}",
                    self.height, walk.leaf_depth
                ),
            ));
        }
        if walk.keys_seen != self.len {
            return Err(Error::violation(
                self.root,
                format!("len is {} but leaves hold {} keys", self.len, walk.keys_seen),
            ));
        }
        if walk.leaves_in_order.len() != self.leaves.len()
            || walk.internals_seen != self.internals.len()
        {
            return Err(Error::violation(self.root, "unreachable nodes in arena"));
        }

        self.validate_chain(&walk.leaves_in_order)
    }

    fn validate_node(
        &self,
        node: NodeRef,
        bounds: Bounds,
        depth: usize,
        walk: &mut Walk,
    ) -> Result<()> {
        let is_root = node == self.root;
        match node {
            NodeRef::Leaf(id) => {
                let keys = &self.leaves[id.0].keys;
                if keys.len() > self.max_keys {
                    return Err(Error::violation(node, format!("{} keys", keys.len())));
                }
                if keys.is_empty() && !is_root {
                    return Err(Error::violation(node, "empty non-root leaf"));
                }
                self.validate_keys(node, keys, bounds)?;

                match walk.leaf_depth {
                    None => walk.leaf_depth = Some(depth),
                    Some(d) if d != depth => {
                        return Err(Error::violation(
                            node,
                            format!("leaf at depth {depth}, expected {d}"),
                        ));
                    }
                    Some(_) => {}
                }
                walk.leaves_in_order.push(id);
                walk.keys_seen += keys.len();
                Ok(())
            }
            NodeRef::Internal(id) => {
                let internal = &self.internals[id.0];
                let separators = &internal.separators;
                if separators.is_empty() || separators.len() > self.max_keys {
                    return Err(Error::violation(
                        node,
                        format!("{} separators", separators.len()),
                    ));
                }
                if internal.children.len() != separators.len() + 1 {
                    return Err(Error::violation(
                        node,
                        format!(
                            "{} children for {} separators",
                            internal.children.len(),
                            separators.len()
                        ),
                    ));
                }
                self.validate_keys(node, separators, bounds)?;
                walk.internals_seen += 1;

                for (i, &child) in internal.children.iter().enumerate() {
                    let child_bounds = Bounds {
                        lower: if i == 0 { bounds.lower } else { Some(separators[i - 1]) },
                        upper: separators.get(i).copied().or(bounds.upper),
                    };
                    self.validate_node(child, child_bounds, depth + 1, walk)?;
                }
                Ok(())
            }
        }
    }

    fn validate_keys(&self, node: NodeRef, keys: &[Key], bounds: Bounds) -> Result<()> {
        if keys.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::violation(node, "keys not strictly ascending"));
        }
        if let Some(&key) = keys.iter().find(|&&k| !bounds.admits(k)) {
            return Err(Error::violation(
                node,
                format!(
                    "key {key} outside [{:?}, {:?})",
                    bounds.lower, bounds.upper
                ),
            ));
        }
        Ok(())
    }

    fn validate_chain(&self, expected: &[NodeId]) -> Result<()> {
        let mut current = Some(self.leftmost_leaf());
        for &want in expected {
            match current {
                Some(id) if id == want => current = self.leaves[id.0].next,
                other => {
                    return Err(Error::violation(
                        NodeRef::Leaf(want),
                        format!("leaf chain reached {:?} instead", other),
                    ));
                }
            }
        }
        if let Some(extra) = current {
            return Err(Error::violation(
                NodeRef::Leaf(extra),
                "leaf chain continues past the rightmost leaf",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::btree::node::LeafNode;

    fn grown_tree() -> BPlusTree {
        (1..=60).map(|i| i * 10).collect()
    }

    #[test]
    fn test_valid_trees_pass() {
        BPlusTree::new().validate().unwrap();
        grown_tree().validate().unwrap();
    }

    #[test]
    fn test_detects_unsorted_leaf() {
        let mut tree = grown_tree();
        tree.leaves[0].keys.swap(0, 1);
        assert!(matches!(
            tree.validate(),
            Err(Error::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_detects_overfull_leaf() {
        let mut tree = BPlusTree::new();
        tree.leaves[0].keys = (0..8).collect();
        tree.len = 8;
        let err = tree.validate().unwrap_err();
        assert!(format!("{}", err).contains("8 keys"));
    }

    #[test]
    fn test_detects_key_on_wrong_side_of_separator() {
        let mut tree: BPlusTree = (1..=8).map(|i| i * 10).collect();
        // Leaf 0 is left of separator 50.
        tree.leaves[0].keys.push(55);
        tree.len += 1;
        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_detects_broken_chain() {
        let mut tree = grown_tree();
        let leftmost = tree.leftmost_leaf();
        tree.leaves[leftmost.0].next = None;
        let err = tree.validate().unwrap_err();
        assert!(format!("{}", err).contains("leaf chain"));
    }

    #[test]
    fn test_detects_orphan_leaf() {
        let mut tree = grown_tree();
        tree.leaves.push(LeafNode::new());
        assert!(tree.validate().is_err());
    }
}
