use geo::Coord;

use crate::build::{Extraction, Range, RangeId};
use crate::error::Result;
use crate::hash::{equal_point, load_hint, OpenHashMap, PointHasher};
use crate::types::Position;

/// Collapse cut arcs that trace the same points.
///
/// Open arcs match forward or reversed; rings (uncut closed arcs) also match
/// any rotation, compared from each ring's lexicographically smallest
/// point. A matched range is aliased to the earlier arc's span, reversed
/// (`start > end`) when the match was backward. Returns the surviving arcs in
/// first-seen order.
pub(crate) fn dedup(extraction: &mut Extraction) -> Result<Vec<RangeId>> {
    let arc_count = extraction.ranges.len();
    let mut dedup = Dedup {
        coordinates: &extraction.coordinates,
        ranges: &mut extraction.ranges,
        arcs_by_end: OpenHashMap::new(load_hint(arc_count * 2), PointHasher),
        arcs: Vec::new(),
    };

    for &head in &extraction.lines {
        dedup.chain(head)?;
    }

    for &head in &extraction.rings {
        if dedup.ranges[head].next.is_some() {
            // Cut rings are no longer closed.
            dedup.chain(head)?;
        } else {
            dedup.ring(head)?;
        }
    }

    Ok(dedup.arcs)
}

struct Dedup<'a> {
    coordinates: &'a [Position],
    ranges: &'a mut Vec<Range>,
    /// Stored arcs bucketed by endpoint: open arcs under both ends, rings
    /// under one point.
    arcs_by_end: OpenHashMap<Coord<f64>, Vec<RangeId>, PointHasher>,
    arcs: Vec<RangeId>,
}

/// How a candidate matched a stored arc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Match {
    Forward,
    Reverse,
}

impl Dedup<'_> {
    #[inline]
    fn point(&self, i: usize) -> Coord<f64> {
        self.coordinates[i].coord()
    }

    #[inline]
    fn same(&self, i: usize, j: usize) -> bool {
        equal_point(&self.point(i), &self.point(j))
    }

    fn chain(&mut self, head: RangeId) -> Result<()> {
        let mut next = Some(head);
        while let Some(id) = next {
            self.line(id)?;
            next = self.ranges[id].next;
        }
        Ok(())
    }

    /// Whether `point` has a bucket, and the first stored arc in it that
    /// `test` accepts.
    fn find(&self, point: &Coord<f64>, test: impl Fn(&Self, Range) -> Option<Match>) -> (bool, Option<(RangeId, Match)>) {
        match self.arcs_by_end.get(point) {
            None => (false, None),
            Some(bucket) => (
                true,
                bucket.iter().find_map(|&other| test(self, self.ranges[other]).map(|m| (other, m))),
            ),
        }
    }

    fn alias(&mut self, id: RangeId, other: RangeId, m: Match) {
        let Range { start, end, .. } = self.ranges[other];
        let range = &mut self.ranges[id];
        (range.start, range.end) = match m {
            Match::Forward => (start, end),
            Match::Reverse => (end, start),
        };
    }

    /// Add `id` to the bucket at `point`; `present` is whether the bucket
    /// existed before this arc was looked up.
    fn register(&mut self, point: Coord<f64>, id: RangeId, present: bool) -> Result<()> {
        match self.arcs_by_end.get_mut(&point) {
            Some(bucket) if present => {
                bucket.push(id);
                Ok(())
            }
            _ => self.arcs_by_end.set(point, vec![id]),
        }
    }

    fn line(&mut self, id: RangeId) -> Result<()> {
        let arc = self.ranges[id];
        let start_point = self.point(arc.start);
        let end_point = self.point(arc.end);

        let (start_present, found) = self.find(&start_point, |d, other| {
            d.equal_line(other, arc).then_some(Match::Forward)
        });
        if let Some((other, m)) = found {
            self.alias(id, other, m);
            return Ok(());
        }

        let (end_present, found) = self.find(&end_point, |d, other| {
            d.reverse_equal_line(other, arc).then_some(Match::Reverse)
        });
        if let Some((other, m)) = found {
            self.alias(id, other, m);
            return Ok(());
        }

        self.register(start_point, id, start_present)?;
        self.register(end_point, id, end_present)?;
        self.arcs.push(id);
        Ok(())
    }

    fn ring(&mut self, id: RangeId) -> Result<()> {
        let arc = self.ranges[id];
        let test = |d: &Self, other: Range| {
            if d.equal_ring(other, arc) {
                Some(Match::Forward)
            } else if d.reverse_equal_ring(other, arc) {
                Some(Match::Reverse)
            } else {
                None
            }
        };

        // A stored ring may be bucketed under its own canonical point rather
        // than its start, so try both.
        let (_, found) = self.find(&self.point(arc.start), test);
        if let Some((other, m)) = found {
            self.alias(id, other, m);
            return Ok(());
        }

        let offset_point = self.point(arc.start + self.minimum_offset(arc));
        let (present, found) = self.find(&offset_point, test);
        if let Some((other, m)) = found {
            self.alias(id, other, m);
            return Ok(());
        }

        self.register(offset_point, id, present)?;
        self.arcs.push(id);
        Ok(())
    }

    fn equal_line(&self, a: Range, b: Range) -> bool {
        let n = a.end - a.start;
        n == b.end - b.start && (0..=n).all(|k| self.same(a.start + k, b.start + k))
    }

    fn reverse_equal_line(&self, a: Range, b: Range) -> bool {
        let n = a.end - a.start;
        n == b.end - b.start && (0..=n).all(|k| self.same(a.start + k, b.end - k))
    }

    fn equal_ring(&self, a: Range, b: Range) -> bool {
        let n = a.end - a.start;
        if n != b.end - b.start {
            return false;
        }
        let ka = self.minimum_offset(a);
        let kb = self.minimum_offset(b);
        (0..n).all(|i| self.same(a.start + (i + ka) % n, b.start + (i + kb) % n))
    }

    fn reverse_equal_ring(&self, a: Range, b: Range) -> bool {
        let n = a.end - a.start;
        if n != b.end - b.start {
            return false;
        }
        let ka = self.minimum_offset(a);
        let kb = n - self.minimum_offset(b);
        (0..n).all(|i| self.same(a.start + (i + ka) % n, b.end - (i + kb) % n))
    }

    /// Offset from `start` of the smallest point by `x`, then `y`. Rings are
    /// compared as if rotated to start there.
    fn minimum_offset(&self, arc: Range) -> usize {
        let mut minimum = arc.start;
        let mut minimum_point = self.point(minimum);
        for mid in arc.start + 1..arc.end {
            let p = self.point(mid);
            if p.x < minimum_point.x || (p.x == minimum_point.x && p.y < minimum_point.y) {
                minimum = mid;
                minimum_point = p;
            }
        }
        minimum - arc.start
    }
}
