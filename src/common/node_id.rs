//! Node identifier type.

use std::fmt;

/// Identifies a slot in one of the tree's node arenas.
///
/// The tree keeps leaves and internal nodes in separate vectors, so an id
/// alone does not say which one it indexes; `NodeRef` pairs it with the shape.
///
/// Using `usize` because:
/// 1. Leaves are stored in `Vec<LeafNode>`, internal nodes in `Vec<InternalNode>`
/// 2. Direct indexing without casting: `leaves[node_id.0]`
/// 3. Nodes are never freed, so an id stays valid for the tree's lifetime
///
/// # Example
/// ```
/// use bplus_index::NodeId;
///
/// let node_id = NodeId::new(5);
/// assert_eq!(node_id.0, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}
