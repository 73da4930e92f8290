//! Topology construction.
//!
//! The pipeline runs normalize → bounds → prequantize → extract → join →
//! cut → dedup → index → delta. Every stage between extract and dedup works
//! on one shared coordinate buffer plus an arena of [`Range`]s into it; the
//! buffer is dropped once arcs have been copied out during indexing.

mod bounds;
mod cut;
mod dedup;
mod delta;
mod extract;
mod geometry;
mod join;
mod prequantize;
mod topology;

pub use bounds::bounds;
pub(crate) use bounds::Bounds;
pub use geometry::normalize;
pub use topology::topology;

use crate::types::Position;

/// Index into [`Extraction::ranges`].
pub(crate) type RangeId = usize;

/// An inclusive `[start, end]` span of the coordinate buffer.
///
/// Cutting splits a range into a chain linked through `next`; concatenating
/// the chain (sharing the junction point between neighbours) reproduces the
/// original line. After dedup a range may be aliased to an earlier arc's
/// span, with `start > end` marking a reversed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Range {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) next: Option<RangeId>,
}

/// The coordinate buffer and range arena shared by extract, join, cut and
/// dedup.
#[derive(Clone, Debug, Default)]
pub(crate) struct Extraction {
    pub(crate) coordinates: Vec<Position>,
    pub(crate) ranges: Vec<Range>,
    /// Heads of the chains extracted from line strings, in visit order.
    pub(crate) lines: Vec<RangeId>,
    /// Heads of the chains extracted from polygon rings, in visit order.
    pub(crate) rings: Vec<RangeId>,
}

impl Extraction {
    /// Append a fresh unlinked range and return its id.
    #[inline]
    pub(crate) fn push_range(&mut self, start: usize, end: usize) -> RangeId {
        push_range(&mut self.ranges, start, end)
    }
}

#[inline]
pub(crate) fn push_range(ranges: &mut Vec<Range>, start: usize, end: usize) -> RangeId {
    ranges.push(Range { start, end, next: None });
    ranges.len() - 1
}
