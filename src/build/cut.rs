use tracing::trace;

use crate::build::join::Junctions;
use crate::build::{push_range, Extraction, Range, RangeId};
use crate::types::Position;

/// Split lines and rings at junctions so every arc starts and ends on one.
///
/// Each range becomes the head of a chain linked through `next`. A ring
/// whose start is not a junction is first rotated in the buffer so that its
/// first junction becomes the start, instead of being cut at an arbitrary
/// point; a ring with no junctions stays whole. Returns the number of
/// rotated rings.
pub(crate) fn cut(extraction: &mut Extraction, junctions: &Junctions) -> usize {
    let Extraction { coordinates, ranges, lines, rings } = extraction;

    for &head in lines.iter() {
        let mut tail = head;
        let (start, end) = (ranges[head].start, ranges[head].end);
        for mid in start + 1..end {
            if is_junction(junctions, coordinates, mid) {
                tail = split(ranges, tail, mid);
            }
        }
    }

    let mut rotated = 0;
    for &head in rings.iter() {
        let mut tail = head;
        let (start, end) = (ranges[head].start, ranges[head].end);
        let mut fixed = is_junction(junctions, coordinates, start);
        let mut mid = start + 1;
        while mid < end {
            if is_junction(junctions, coordinates, mid) {
                if fixed {
                    tail = split(ranges, tail, mid);
                } else {
                    coordinates[start..end].rotate_left(mid - start);
                    coordinates[end] = coordinates[start].clone();
                    trace!(start, end, offset = mid - start, "rotated ring to its first junction");
                    rotated += 1;
                    fixed = true;
                    mid = start;
                }
            }
            mid += 1;
        }
    }
    rotated
}

#[inline]
fn is_junction(junctions: &Junctions, coordinates: &[Position], i: usize) -> bool {
    junctions.contains(&coordinates[i].coord())
}

/// End `tail` at `mid` and chain a new range covering the rest of it.
fn split(ranges: &mut Vec<Range>, tail: RangeId, mid: usize) -> RangeId {
    let next = push_range(ranges, mid, ranges[tail].end);
    ranges[tail].end = mid;
    ranges[tail].next = Some(next);
    next
}
