use crate::types::Position;

/// Delta-encode arcs in place: the first position stays absolute, every
/// following one becomes the difference from its predecessor. Positions
/// equal to their predecessor are dropped, and an arc that collapses to a
/// single position gets a `[0, 0]` delta so it keeps two.
pub(crate) fn delta(arcs: &mut [Vec<Position>]) {
    for arc in arcs {
        delta_arc(arc);
    }
}

fn delta_arc(arc: &mut Vec<Position>) {
    let Some(first) = arc.first() else { return };
    let (mut x0, mut y0) = (first.x, first.y);
    let mut k = 1;
    for j in 1..arc.len() {
        let (x1, y1) = (arc[j].x, arc[j].y);
        if x1 != x0 || y1 != y0 {
            arc[k] = Position::new(x1 - x0, y1 - y0);
            k += 1;
            (x0, y0) = (x1, y1);
        }
    }
    arc.truncate(k);
    if k == 1 {
        arc.push(Position::new(0.0, 0.0));
    }
}
