use ahash::AHashMap;

use crate::types::{arc_id, TopoGeometry};

/// For each of `objects`, the ascending indexes of the other objects that
/// share at least one arc with it, in either direction.
///
/// An object that references the same arc twice is not listed as its own
/// neighbor.
pub fn neighbors(objects: &[&TopoGeometry]) -> Vec<Vec<usize>> {
    let mut indexes_by_arc: AHashMap<usize, Vec<usize>> = AHashMap::new();
    for (i, object) in objects.iter().enumerate() {
        object.for_each_line(&mut |arcs, _| {
            for &arc in arcs {
                indexes_by_arc.entry(arc_id(arc)).or_default().push(i);
            }
        });
    }

    let mut neighbors = vec![Vec::new(); objects.len()];
    for indexes in indexes_by_arc.values() {
        for (j, &a) in indexes.iter().enumerate() {
            for &b in &indexes[j + 1..] {
                if a != b {
                    insert_sorted(&mut neighbors[a], b);
                    insert_sorted(&mut neighbors[b], a);
                }
            }
        }
    }
    neighbors
}

fn insert_sorted(list: &mut Vec<usize>, value: usize) {
    if let Err(at) = list.binary_search(&value) {
        list.insert(at, value);
    }
}
