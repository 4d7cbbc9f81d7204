//! Structural statistics for the index.

use std::fmt;

/// Counters describing how the tree has been reshaped.
///
/// The tree is single-owner, so these are plain integers updated through
/// `&mut self`; `BPlusTree::stats` hands out a copy.
///
/// # Example
/// ```
/// use bplus_index::BPlusTree;
///
/// let mut tree = BPlusTree::new();
/// for key in 1..=8 {
///     tree.insert(key);
/// }
/// let stats = tree.stats();
/// assert_eq!(stats.leaf_splits, 1);
/// assert_eq!(stats.root_splits, 1);
/// println!("{}", stats);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Keys actually added (duplicates excluded).
    pub inserts: u64,

    /// Inserts that found the key already present.
    pub duplicate_inserts: u64,

    /// Leaves split on overflow.
    pub leaf_splits: u64,

    /// Internal nodes split on overflow.
    pub internal_splits: u64,

    /// Splits that replaced the root (each adds one level).
    pub root_splits: u64,
}

impl TreeStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaf and internal splits combined.
    pub fn total_splits(&self) -> u64 {
        self.leaf_splits + self.internal_splits
    }

    /// Average number of splits per successful insert (0.0 when empty).
    pub fn splits_per_insert(&self) -> f64 {
        if self.inserts == 0 {
            0.0
        } else {
            self.total_splits() as f64 / self.inserts as f64
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, duplicates: {}, leaf_splits: {}, internal_splits: {}, root_splits: {}, splits/insert: {:.3} }}",
            self.inserts,
            self.duplicate_inserts,
            self.leaf_splits,
            self.internal_splits,
            self.root_splits,
            self.splits_per_insert()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = TreeStats::new();
        assert_eq!(stats.inserts, 0);
        assert_eq!(stats.total_splits(), 0);
        assert_eq!(stats.splits_per_insert(), 0.0);
    }

    #[test]
    fn test_stats_ratio() {
        let stats = TreeStats {
            inserts: 8,
            leaf_splits: 3,
            internal_splits: 1,
            ..TreeStats::default()
        };

        assert_eq!(stats.total_splits(), 4);
        assert_eq!(stats.splits_per_insert(), 0.5);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = TreeStats {
            inserts: 100,
            root_splits: 2,
            ..TreeStats::default()
        };

        stats.reset();

        assert_eq!(stats, TreeStats::new());
    }

    #[test]
    fn test_stats_display() {
        let stats = TreeStats {
            inserts: 80,
            duplicate_inserts: 20,
            leaf_splits: 10,
            internal_splits: 2,
            root_splits: 1,
        };

        let display = format!("{}", stats);

        assert!(display.contains("inserts: 80"));
        assert!(display.contains("duplicates: 20"));
        assert!(display.contains("splits/insert: 0.150"));
    }
}
