use crate::build::Bounds;
use crate::reconstruct::Transformer;
use crate::types::{BBox, GeometryKind, TopoGeometry, Topology};

/// Bounding box of a topology's decoded arcs and its points.
///
/// Returns the inverted box `[+∞, +∞, -∞, -∞]` when there is nothing to
/// bound.
pub fn bbox(topology: &Topology) -> BBox {
    let mut t = Transformer::new(topology.transform.as_ref());
    let mut b = Bounds::default();

    for arc in &topology.arcs {
        for (i, p) in arc.iter().enumerate() {
            let p = t.apply(p, Some(i));
            b.add(p.x, p.y);
        }
    }

    for (_, geometry) in &topology.objects {
        bbox_geometry(&mut t, &mut b, geometry);
    }
    b.raw()
}

fn bbox_geometry(t: &mut Transformer, b: &mut Bounds, geometry: &TopoGeometry) {
    match &geometry.kind {
        GeometryKind::GeometryCollection(geometries) => {
            geometries.iter().for_each(|g| bbox_geometry(t, b, g))
        }
        GeometryKind::Point(p) => {
            let p = t.apply(p, None);
            b.add(p.x, p.y);
        }
        GeometryKind::MultiPoint(points) => {
            for p in points {
                let p = t.apply(p, None);
                b.add(p.x, p.y);
            }
        }
        _ => {}
    }
}
