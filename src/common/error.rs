//! Error types for the B+ tree index.

use thiserror::Error;

use crate::index::btree::NodeRef;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised by the index.
///
/// Inserts and lookups are total, so the only failures are a bad capacity at
/// construction and the structural problems reported by `BPlusTree::validate`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested node capacity is below the supported minimum.
    #[error("max_keys must be >= {min}, got {max_keys}")]
    InvalidMaxKeys { max_keys: usize, min: usize },

    /// A structural invariant does not hold.
    ///
    /// This indicates a bug in the split logic, never a caller mistake.
    #[error("invariant violated at {node}: {reason}")]
    InvariantViolation { node: NodeRef, reason: String },
}

impl Error {
    pub(crate) fn violation(node: NodeRef, reason: impl Into<String>) -> Self {
        Error::InvariantViolation {
            node,
            reason: reason.into(),
        }
    }
}
