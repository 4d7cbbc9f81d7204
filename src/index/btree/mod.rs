//! B+ tree index implementation.
//!
//! # Structure
//!
//! The tree consists of:
//! - Internal nodes: store separator keys and child references
//! - Leaf nodes: store the keys, singly linked for ordered scans
//!
//! # Components
//! - [`BPlusTree`] - The index and its public operations
//! - `node` - Leaf / internal node shapes and the [`NodeRef`] handle
//! - `search` - Root-to-leaf descent with path recording
//! - `split` - Leaf and internal splits, propagation to the root
//! - [`Keys`] / [`Leaves`] - Leaf chain iterators
//! - [`TracePoint`] - Insert trace points
//! - [`TreeStats`] - Structural counters

mod iter;
mod node;
mod search;
mod split;
mod stats;
mod trace;
mod tree;
mod validate;

pub use iter::{Keys, Leaves};
pub use node::{Key, NodeRef};
pub use stats::TreeStats;
pub use trace::TracePoint;
pub use tree::BPlusTree;
