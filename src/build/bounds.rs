use crate::types::{BBox, GeoGeometry, GeometryKind, Objects};

/// Running `[x0, y0, x1, y1]` reduction.
///
/// Starts inverted at `[+∞, +∞, -∞, -∞]`; comparisons are strict so NaN
/// components never widen the box.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Bounds {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self { x0: f64::INFINITY, y0: f64::INFINITY, x1: f64::NEG_INFINITY, y1: f64::NEG_INFINITY }
    }
}

impl Bounds {
    #[inline]
    pub(crate) fn add(&mut self, x: f64, y: f64) {
        if x < self.x0 { self.x0 = x; }
        if x > self.x1 { self.x1 = x; }
        if y < self.y0 { self.y0 = y; }
        if y > self.y1 { self.y1 = y; }
    }

    /// The box as accumulated, inverted if nothing was added.
    #[inline]
    pub(crate) fn raw(&self) -> BBox {
        [self.x0, self.y0, self.x1, self.y1]
    }

    /// The box, or `None` if nothing was added.
    pub(crate) fn finish(&self) -> Option<BBox> {
        (self.x1 >= self.x0 && self.y1 >= self.y0).then(|| self.raw())
    }
}

/// Bounding box of every coordinate in `objects`: points, multipoints,
/// and every line and ring position. `None` if there are none.
pub fn bounds(objects: &Objects<GeoGeometry>) -> Option<BBox> {
    let mut b = Bounds::default();
    for (_, geometry) in objects {
        bound_geometry(&mut b, geometry);
    }
    b.finish()
}

fn bound_geometry(b: &mut Bounds, geometry: &GeoGeometry) {
    match &geometry.kind {
        GeometryKind::Point(p) => b.add(p.x, p.y),
        GeometryKind::MultiPoint(points) => points.iter().for_each(|p| b.add(p.x, p.y)),
        GeometryKind::GeometryCollection(geometries) => {
            geometries.iter().for_each(|g| bound_geometry(b, g))
        }
        _ => geometry.for_each_line(&mut |line, _| line.iter().for_each(|p| b.add(p.x, p.y))),
    }
}
