//! Configuration constants for the B+ tree index.

use crate::common::{Error, Result};

/// Default node capacity (maximum keys per leaf, separators per internal node).
///
/// With 7 keys per node a leaf splits on its 8th key into two halves of 4.
pub const DEFAULT_MAX_KEYS: usize = 7;

/// Smallest capacity the tree accepts.
pub const MIN_MAX_KEYS: usize = 3;

/// Check a requested capacity.
///
/// # Errors
/// `Error::InvalidMaxKeys` if `max_keys < MIN_MAX_KEYS`.
pub fn validate_max_keys(max_keys: usize) -> Result<usize> {
    if max_keys < MIN_MAX_KEYS {
        return Err(Error::InvalidMaxKeys {
            max_keys,
            min: MIN_MAX_KEYS,
        });
    }
    Ok(max_keys)
}
