//! The capability a tree-node type needs in order to be traversed.

use super::segment::Segment;

/// A lazy stream of traversal endpoints.
pub type Endpoints<'s, T> = Box<dyn Iterator<Item = T> + 's>;

/// A position in some tree that knows how to take one [`Segment`] step.
///
/// Implementors provide [`step_ambiguously`](Navigable::step_ambiguously);
/// everything else (paths, combinators) is built on top of it. The returned
/// iterator must not borrow `self` or the segment, only the tree the cursor
/// points into.
pub trait Navigable: Clone {
    /// All nodes reachable from `self` through `segment`, in document order.
    /// Data-dependent misses (absent key, index out of range, wrong node
    /// kind) produce an empty stream.
    fn step_ambiguously<'s>(&self, segment: &Segment) -> Endpoints<'s, Self>
    where
        Self: 's;

    /// First node reachable through `segment`, ignoring any alternatives.
    fn step(&self, segment: &Segment) -> Option<Self> {
        self.step_ambiguously(segment).next()
    }
}
