//! Iterators over the leaf chain.

use std::iter::FusedIterator;
use std::slice;

use crate::common::NodeId;
use crate::index::btree::node::{Key, LeafNode};

/// Iterator over each leaf's keys, following `next` links from the leftmost
/// leaf.
///
/// Created by [`BPlusTree::leaves`](crate::BPlusTree::leaves).
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    arena: &'a [LeafNode],
    next: Option<NodeId>,
}

impl<'a> Leaves<'a> {
    pub(super) fn new(arena: &'a [LeafNode], start: NodeId) -> Self {
        Self {
            arena,
            next: Some(start),
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a [Key];

    fn next(&mut self) -> Option<Self::Item> {
        let leaf = &self.arena[self.next?.0];
        self.next = leaf.next;
        Some(&leaf.keys)
    }
}

impl FusedIterator for Leaves<'_> {}

/// Iterator over all keys in ascending order.
///
/// Created by [`BPlusTree::iter`](crate::BPlusTree::iter). Each call walks
/// the chain from scratch.
#[derive(Debug, Clone)]
pub struct Keys<'a> {
    leaves: Leaves<'a>,
    current: slice::Iter<'a, Key>,
}

impl<'a> Keys<'a> {
    pub(super) fn new(leaves: Leaves<'a>) -> Self {
        Self {
            leaves,
            current: [].iter(),
        }
    }
}

impl Iterator for Keys<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        loop {
            if let Some(&key) = self.current.next() {
                return Some(key);
            }
            self.current = self.leaves.next()?.iter();
        }
    }
}

impl FusedIterator for Keys<'_> {}
