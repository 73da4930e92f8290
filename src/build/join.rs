use geo::Coord;

use crate::build::{Extraction, Range};
use crate::error::Result;
use crate::hash::{equal_point, hash_point, load_hint, KeyHasher, OpenHashMap, OpenHashSet, PointHasher};
use crate::types::Position;

/// Coordinate values at which arcs must be cut.
pub(crate) type Junctions = OpenHashSet<Coord<f64>, PointHasher>;

/// Keys buffer indices by the coordinate they point at.
struct IndexHasher<'a> {
    coordinates: &'a [Position],
}

impl KeyHasher<usize> for IndexHasher<'_> {
    #[inline]
    fn hash(&self, key: &usize) -> u32 {
        hash_point(&self.coordinates[*key].coord())
    }

    #[inline]
    fn equal(&self, a: &usize, b: &usize) -> bool {
        equal_point(&self.coordinates[*a].coord(), &self.coordinates[*b].coord())
    }
}

/// For every buffer position, the first position holding an equal
/// coordinate.
fn canonical_indexes(coordinates: &[Position]) -> Result<Vec<usize>> {
    let mut index_by_point = OpenHashMap::new(load_hint(coordinates.len()), IndexHasher { coordinates });
    (0..coordinates.len())
        .map(|i| index_by_point.maybe_set(i, i).copied())
        .collect()
}

/// Per canonical index: who visited it last, which neighbour pair it was
/// first seen with, and whether it is a junction.
struct Adjacency {
    visited_by: Vec<Option<usize>>,
    neighbors: Vec<Option<(usize, usize)>>,
    junction: Vec<bool>,
    count: usize,
}

impl Adjacency {
    fn new(n: usize) -> Self {
        Self { visited_by: vec![None; n], neighbors: vec![None; n], junction: vec![false; n], count: 0 }
    }

    #[inline]
    fn mark(&mut self, index: usize) {
        self.count += 1;
        self.junction[index] = true;
    }

    /// Record `current` being passed through between `previous` and `next`
    /// by arc `arc`. A second visit by the same arc is a self-intersection
    /// and is ignored.
    fn sequence(&mut self, arc: usize, previous: usize, current: usize, next: usize) {
        if self.visited_by[current] == Some(arc) {
            return;
        }
        self.visited_by[current] = Some(arc);
        match self.neighbors[current] {
            Some((left, right)) => {
                if (left != previous || right != next) && (left != next || right != previous) {
                    self.mark(current);
                }
            }
            None => self.neighbors[current] = Some((previous, next)),
        }
    }
}

/// Find every junction of the extracted lines and rings.
///
/// A point is a junction where two arcs passing through it disagree on its
/// neighbours (in either direction). Line endpoints are always junctions,
/// so closed lines are never rotated; rings get junctions only from
/// disagreement.
pub(crate) fn join(extraction: &Extraction) -> Result<Junctions> {
    let coordinates = &extraction.coordinates;
    let indexes = canonical_indexes(coordinates)?;
    let mut adjacency = Adjacency::new(coordinates.len());

    for (i, &id) in extraction.lines.iter().enumerate() {
        let Range { start, end, .. } = extraction.ranges[id];
        let mut current = indexes[start];
        let mut next = indexes[start + 1];
        adjacency.mark(current);
        for k in start + 2..=end {
            let previous = current;
            current = next;
            next = indexes[k];
            adjacency.sequence(i, previous, current, next);
        }
        adjacency.mark(next);
    }

    adjacency.visited_by.fill(None);

    for (i, &id) in extraction.rings.iter().enumerate() {
        let Range { start, end, .. } = extraction.ranges[id];
        let mut previous = indexes[end - 1];
        let mut current = indexes[start];
        let mut next = indexes[start + 1];
        adjacency.sequence(i, previous, current, next);
        for k in start + 2..=end {
            previous = current;
            current = next;
            next = indexes[k];
            adjacency.sequence(i, previous, current, next);
        }
    }

    let mut junctions = OpenHashSet::new(load_hint(adjacency.count), PointHasher);
    for &j in &indexes {
        if adjacency.junction[j] {
            junctions.add(coordinates[j].coord())?;
        }
    }
    Ok(junctions)
}
