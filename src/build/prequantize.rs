use crate::types::{BBox, GeoGeometry, Geometry, GeometryKind, Objects, Part, Position, Transform};

/// Snaps raw coordinates onto an `n × n` integer grid spanning a bbox.
struct Grid {
    x0: f64,
    y0: f64,
    kx: f64,
    ky: f64,
}

impl Grid {
    fn new(bbox: &BBox, n: f64) -> Self {
        let [x0, y0, x1, y1] = *bbox;
        Self {
            x0,
            y0,
            kx: if x1 - x0 != 0.0 { (n - 1.0) / (x1 - x0) } else { 1.0 },
            ky: if y1 - y0 != 0.0 { (n - 1.0) / (y1 - y0) } else { 1.0 },
        }
    }

    #[inline]
    fn point(&self, p: &Position) -> Position {
        Position::new(
            ((p.x - self.x0) * self.kx).round_ties_even(),
            ((p.y - self.y0) * self.ky).round_ties_even(),
        )
    }

    /// Snap a line or ring, dropping points that land on the same cell as
    /// their predecessor, then pad with copies of the first point up to
    /// `min` positions.
    fn points(&self, input: &[Position], min: usize) -> Vec<Position> {
        let mut output: Vec<Position> = Vec::with_capacity(input.len().max(min));
        for p in input {
            let q = self.point(p);
            if output.last().is_none_or(|last| last.x != q.x || last.y != q.y) {
                output.push(q);
            }
        }
        if let Some(first) = output.first().cloned() {
            output.resize(output.len().max(min), first);
        }
        output
    }

    fn geometry(&self, geometry: GeoGeometry) -> GeoGeometry {
        let Geometry { kind, id, bbox, properties } = geometry;
        let kind = match kind {
            GeometryKind::Point(p) => GeometryKind::Point(self.point(&p)),
            GeometryKind::MultiPoint(points) => {
                GeometryKind::MultiPoint(points.iter().map(|p| self.point(p)).collect())
            }
            GeometryKind::GeometryCollection(geometries) => GeometryKind::GeometryCollection(
                geometries.into_iter().map(|g| self.geometry(g)).collect(),
            ),
            kind => {
                return Geometry { kind, id, bbox, properties }.map_lines(&mut |line, part| match part {
                    Part::Line => self.points(&line, 2),
                    Part::Ring => self.points(&line, 4),
                });
            }
        };
        Geometry { kind, id, bbox, properties }
    }

    fn transform(&self) -> Transform {
        Transform { scale: [1.0 / self.kx, 1.0 / self.ky], translate: [self.x0, self.y0] }
    }
}

/// Quantize every coordinate in `objects` onto an `n × n` grid over `bbox`
/// and return the transform that maps grid cells back to coordinates.
///
/// Trailing dimensions are dropped. Lines keep at least two positions and
/// rings at least four.
pub(crate) fn prequantize(objects: Objects<GeoGeometry>, bbox: &BBox, n: f64) -> (Objects<GeoGeometry>, Transform) {
    let grid = Grid::new(bbox, n);
    let objects = objects.map(|g| grid.geometry(g));
    (objects, grid.transform())
}
