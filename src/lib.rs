//! bplus-index - An in-memory B+ tree index over unique integer keys.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           BPlusTree                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Public API (index/btree/tree.rs)              │   │
//! │  │    insert · contains · keys_in_order · validate · stats  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │      Descent (search.rs)    →    Splits (split.rs)       │   │
//! │  │   path of (internal, child idx)   leaf: copy separator   │   │
//! │  │                                   internal: move it up   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Node arenas (node.rs)                     │   │
//! │  │   leaves: Vec<LeafNode>      internals: Vec<InternalNode>│   │
//! │  │   [L0]→[L3]→[L1]→[L2]        children: Vec<NodeRef>      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - Index structures (B+ tree)
//!
//! # Quick Start
//! ```
//! use bplus_index::BPlusTree;
//!
//! let mut tree = BPlusTree::with_max_keys(7).unwrap();
//! for key in (10..=80).step_by(10) {
//!     tree.insert(key);
//! }
//!
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.root_separators(), &[50]);
//! assert_eq!(tree.keys_in_order(), vec![10, 20, 30, 40, 50, 60, 70, 80]);
//! ```
//!
//! # Logging
//! Splits and root growth are reported through `tracing` at `debug` level.
//! The crate never installs a subscriber.

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_MAX_KEYS, MIN_MAX_KEYS};
pub use common::{Error, NodeId, Result};

pub use index::btree::{BPlusTree, Key, Keys, Leaves, NodeRef, TracePoint, TreeStats};
