//! Insert tracing.
//!
//! `BPlusTree::insert_with_trace` records which characteristic points of the
//! insert algorithm a single call passed through. Tests use the sequence to
//! pin down exactly which split path an insert took.

use std::fmt;

/// A characteristic point of the insert algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TracePoint {
    StartInsert,
    /// Root was a leaf when the insert started (tree of height 1).
    RootIsLeaf,
    /// Stepped from an internal node into one of its children.
    DescendInternal,
    LeafFound,
    /// Key was already present; nothing was mutated.
    DuplicateKey,
    LeafInsert,
    LeafOverflow,
    SplitLeaf,
    /// A separator was added to an existing parent.
    InsertInParent,
    InternalOverflow,
    SplitInternal,
    /// The root split and the tree grew by one level.
    NewRoot,
    EndInsert,
}

impl TracePoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            TracePoint::StartInsert => "START_INSERT",
            TracePoint::RootIsLeaf => "ROOT_IS_LEAF",
            TracePoint::DescendInternal => "DESCEND_INTERNAL",
            TracePoint::LeafFound => "LEAF_FOUND",
            TracePoint::DuplicateKey => "DUPLICATE_KEY",
            TracePoint::LeafInsert => "LEAF_INSERT",
            TracePoint::LeafOverflow => "LEAF_OVERFLOW",
            TracePoint::SplitLeaf => "SPLIT_LEAF",
            TracePoint::InsertInParent => "INSERT_IN_PARENT",
            TracePoint::InternalOverflow => "INTERNAL_OVERFLOW",
            TracePoint::SplitInternal => "SPLIT_INTERNAL",
            TracePoint::NewRoot => "NEW_ROOT",
            TracePoint::EndInsert => "END_INSERT",
        }
    }
}

impl fmt::Display for TracePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional sink for trace points.
///
/// The untraced insert path passes `Trace::off()` and never allocates.
pub(crate) struct Trace<'a> {
    sink: Option<&'a mut Vec<TracePoint>>,
}

impl<'a> Trace<'a> {
    pub(crate) fn off() -> Self {
        Self { sink: None }
    }

    pub(crate) fn recording(sink: &'a mut Vec<TracePoint>) -> Self {
        Self { sink: Some(sink) }
    }

    #[inline]
    pub(crate) fn record(&mut self, point: TracePoint) {
        if let Some(sink) = self.sink.as_mut() {
            sink.push(point);
        }
    }
}
