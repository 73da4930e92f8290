use std::collections::{BTreeMap, VecDeque};

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::types::{arc_id, ArcIndex, Position, Topology};

/// An endpoint compared by value; `-0` and `0` share a key.
type EndpointKey = (u64, u64);

#[inline]
fn key(x: f64, y: f64) -> EndpointKey {
    ((x + 0.0).to_bits(), (y + 0.0).to_bits())
}

/// Endpoint → fragment map that iterates in insertion order.
///
/// Overwriting a key keeps its position; removing and re-inserting it moves
/// it to the back. Flush order, and so the order of stitched output, depends
/// on this.
#[derive(Debug, Default)]
struct EndpointIndex {
    slots: AHashMap<EndpointKey, (u64, usize)>,
    order: BTreeMap<u64, EndpointKey>,
    next_seq: u64,
}

impl EndpointIndex {
    #[inline]
    fn get(&self, key: &EndpointKey) -> Option<usize> {
        self.slots.get(key).map(|&(_, fragment)| fragment)
    }

    fn insert(&mut self, key: EndpointKey, fragment: usize) {
        match self.slots.get_mut(&key) {
            Some(slot) => slot.1 = fragment,
            None => {
                self.slots.insert(key, (self.next_seq, fragment));
                self.order.insert(self.next_seq, key);
                self.next_seq += 1;
            }
        }
    }

    fn remove(&mut self, key: &EndpointKey) {
        if let Some((seq, _)) = self.slots.remove(key) {
            self.order.remove(&seq);
        }
    }

    /// Fragments in key insertion order.
    fn fragments(&self) -> Vec<usize> {
        self.order.values().filter_map(|key| self.get(key)).collect()
    }
}

#[derive(Debug)]
struct Fragment {
    refs: VecDeque<ArcIndex>,
    start: EndpointKey,
    end: EndpointKey,
}

/// Whether an arc has no length: two positions, the second a zero delta
/// (or equal to the first when the arcs are not delta-encoded).
fn is_degenerate(arc: &[Position], delta_encoded: bool) -> bool {
    arc.len() < 3
        && arc.get(1).is_some_and(|p| {
            if delta_encoded {
                p.x == 0.0 && p.y == 0.0
            } else {
                p.x == arc[0].x && p.y == arc[0].y
            }
        })
}

/// Start and end keys of the arc `i` refers to, in the direction of `i`.
fn ends(topology: &Topology, i: ArcIndex) -> Result<(EndpointKey, EndpointKey)> {
    let arc = topology.arc(i).ok_or(Error::ArcOutOfRange(i))?;
    let (first, last) = match (arc.first(), arc.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(Error::InvalidTopoJson(format!("arc {} has no positions", arc_id(i)))),
    };
    let p0 = key(first.x, first.y);
    let p1 = if topology.transform.is_some() {
        let (x, y) = arc.iter().fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
        key(x, y)
    } else {
        key(last.x, last.y)
    };
    Ok(if i < 0 { (p1, p0) } else { (p0, p1) })
}

/// Chain arc references end to start into maximal fragments.
///
/// Zero-length arcs are moved to the front first so they are absorbed by
/// the chain they sit on instead of splitting it. Each reference is then
/// appended to a fragment ending where it starts, or prepended to one
/// starting where it ends, joining two fragments when it bridges them.
/// Output order follows fragment creation through the endpoint maps; any
/// reference left out of every fragment is emitted on its own.
pub fn stitch(topology: &Topology, arcs: &[ArcIndex]) -> Result<Vec<Vec<ArcIndex>>> {
    let delta_encoded = topology.transform.is_some();
    let mut order = arcs.to_vec();
    let mut empty = 0;
    for j in 0..order.len() {
        let arc = topology.arc(order[j]).ok_or(Error::ArcOutOfRange(order[j]))?;
        if is_degenerate(arc, delta_encoded) {
            order.swap(empty, j);
            empty += 1;
        }
    }

    let mut fragments: Vec<Fragment> = Vec::new();
    let mut by_start = EndpointIndex::default();
    let mut by_end = EndpointIndex::default();

    for &i in &order {
        let (start, end) = ends(topology, i)?;

        if let Some(f) = by_end.get(&start) {
            by_end.remove(&fragments[f].end);
            fragments[f].refs.push_back(i);
            fragments[f].end = end;
            if let Some(g) = by_start.get(&end) {
                by_start.remove(&fragments[g].start);
                let (f_start, g_end) = (fragments[f].start, fragments[g].end);
                if g != f {
                    let tail = std::mem::take(&mut fragments[g].refs);
                    fragments[f].refs.extend(tail);
                }
                fragments[f].end = g_end;
                by_start.insert(f_start, f);
                by_end.insert(g_end, f);
            } else {
                by_start.insert(fragments[f].start, f);
                by_end.insert(fragments[f].end, f);
            }
        } else if let Some(f) = by_start.get(&end) {
            by_start.remove(&fragments[f].start);
            fragments[f].refs.push_front(i);
            fragments[f].start = start;
            if let Some(g) = by_end.get(&start) {
                by_end.remove(&fragments[g].end);
                let (g_start, f_end) = (fragments[g].start, fragments[f].end);
                if g != f {
                    let tail = std::mem::take(&mut fragments[f].refs);
                    fragments[g].refs.extend(tail);
                }
                fragments[g].start = g_start;
                fragments[g].end = f_end;
                by_start.insert(g_start, g);
                by_end.insert(f_end, g);
            } else {
                by_start.insert(fragments[f].start, f);
                by_end.insert(fragments[f].end, f);
            }
        } else {
            fragments.push(Fragment { refs: VecDeque::from([i]), start, end });
            let f = fragments.len() - 1;
            by_start.insert(start, f);
            by_end.insert(end, f);
        }
    }

    let mut stitched = vec![false; topology.arcs.len()];
    let mut output = Vec::new();
    let mut emit = |fragment: &Fragment| {
        for &i in &fragment.refs {
            stitched[arc_id(i)] = true;
        }
        output.push(fragment.refs.iter().copied().collect::<Vec<_>>());
    };

    for f in by_end.fragments() {
        by_start.remove(&fragments[f].start);
        emit(&fragments[f]);
    }
    for f in by_start.fragments() {
        emit(&fragments[f]);
    }

    for &i in &order {
        if !stitched[arc_id(i)] {
            output.push(vec![i]);
        }
    }
    Ok(output)
}
