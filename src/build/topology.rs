use tracing::debug;

use crate::build::cut::cut;
use crate::build::dedup::dedup;
use crate::build::delta::delta;
use crate::build::extract::extract;
use crate::build::join::join;
use crate::build::prequantize::prequantize;
use crate::build::{bounds, normalize, Range, RangeId};
use crate::error::{Error, Result};
use crate::hash::{load_hint, KeyHasher, OpenHashMap};
use crate::types::{ArcIndex, GeoJson, Objects, Topology};

/// Keys `(start, end)` spans without regard to direction.
struct ArcHasher;

impl KeyHasher<(usize, usize)> for ArcHasher {
    #[inline]
    fn hash(&self, &(i, j): &(usize, usize)) -> u32 {
        let (i, j) = if j < i { (j, i) } else { (i, j) };
        i.wrapping_add(j.wrapping_mul(31)) as u32
    }

    #[inline]
    fn equal(&self, a: &(usize, usize), b: &(usize, usize)) -> bool {
        (a.0 == b.0 && a.1 == b.1) || (a.0 == b.1 && a.1 == b.0)
    }
}

/// Build a topology from named GeoJSON objects.
///
/// With a positive `quantization`, coordinates are first snapped onto a
/// `quantization × quantization` grid over the input bounds and the arcs of
/// the result are delta-encoded; `None`, zero or a negative value keeps the
/// input coordinates. The grid size is floored, and one below 2 (or a
/// non-finite one) is rejected.
///
/// Arcs are numbered in the order their lines and rings are first met:
/// objects in insertion order, then nested order.
pub fn topology(objects: Objects<GeoJson>, quantization: Option<f64>) -> Result<Topology> {
    let quantization = match quantization {
        Some(n) if n.is_nan() || n > 0.0 => {
            let n = n.floor();
            if !(n.is_finite() && n >= 2.0) {
                return Err(Error::InvalidResolution(n));
            }
            Some(n)
        }
        _ => None,
    };

    let objects = normalize(objects);
    let bbox = bounds(&objects);
    let (objects, transform) = match (quantization, bbox) {
        (Some(n), Some(bbox)) => {
            let (objects, transform) = prequantize(objects, &bbox, n);
            debug!(n, ?transform, "prequantized input");
            (objects, Some(transform))
        }
        _ => (objects, None),
    };

    let (mut extraction, objects) = extract(objects)?;
    debug!(
        coordinates = extraction.coordinates.len(),
        lines = extraction.lines.len(),
        rings = extraction.rings.len(),
        "extracted lines and rings"
    );

    let junctions = join(&extraction)?;
    debug!(junctions = junctions.len(), "found junctions");

    let rotated = cut(&mut extraction, &junctions);
    debug!(ranges = extraction.ranges.len(), rotated, "cut arcs at junctions");

    let unique = dedup(&mut extraction)?;
    debug!(arcs = unique.len(), "deduplicated arcs");

    let mut index_by_arc = OpenHashMap::new(load_hint(unique.len()), ArcHasher);
    let mut arcs = Vec::with_capacity(unique.len());
    for (i, &id) in unique.iter().enumerate() {
        let Range { start, end, .. } = extraction.ranges[id];
        index_by_arc.set((start, end), i as ArcIndex)?;
        arcs.push(extraction.coordinates[start..=end].to_vec());
    }

    let ranges = extraction.ranges;
    let objects = objects.try_map(|geometry| {
        geometry.try_map_lines(&mut |head, _| index_chain(&ranges, &index_by_arc, head))
    })?;

    if transform.is_some() {
        delta(&mut arcs);
    }

    Ok(Topology { bbox, transform, objects, arcs })
}

/// Signed arc references for the chain starting at `head`.
fn index_chain(
    ranges: &[Range],
    index_by_arc: &OpenHashMap<(usize, usize), ArcIndex, ArcHasher>,
    head: RangeId,
) -> Result<Vec<ArcIndex>> {
    let mut indexes = Vec::new();
    let mut next = Some(head);
    while let Some(id) = next {
        let Range { start, end, next: following } = ranges[id];
        let index = *index_by_arc.get(&(start, end)).ok_or(Error::UnindexedArc { start, end })?;
        indexes.push(if start < end { index } else { !index });
        next = following;
    }
    Ok(indexes)
}
