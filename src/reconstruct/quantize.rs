use tracing::debug;

use crate::error::{Error, Result};
use crate::reconstruct::{bbox, Untransformer};
use crate::types::{Geometry, GeometryKind, Position, TopoGeometry, Topology, Transform};

/// How [`quantize`] picks its grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuantizeSpec {
    /// An `n × n` grid over the topology's bbox; `n` is floored and must be
    /// at least 2.
    Resolution(f64),
    /// An explicit transform.
    Transform(Transform),
}

/// Quantize and delta-encode an unquantized topology.
///
/// Arcs keep their first position absolute and drop positions that snap to
/// the same cell as their predecessor; points are snapped in place. Other
/// geometries are copied unchanged since they only hold arc references.
pub fn quantize(topology: &Topology, spec: QuantizeSpec) -> Result<Topology> {
    if topology.transform.is_some() {
        return Err(Error::AlreadyQuantized);
    }

    let (transform, bbox) = match spec {
        QuantizeSpec::Resolution(n) => {
            let n = n.floor();
            if !(n.is_finite() && n >= 2.0) {
                return Err(Error::InvalidResolution(n));
            }
            let [x0, y0, x1, y1] = topology.bbox.unwrap_or_else(|| bbox(topology));
            let transform = Transform {
                scale: [
                    if x1 - x0 != 0.0 { (x1 - x0) / (n - 1.0) } else { 1.0 },
                    if y1 - y0 != 0.0 { (y1 - y0) / (n - 1.0) } else { 1.0 },
                ],
                translate: [x0, y0],
            };
            (transform, Some([x0, y0, x1, y1]))
        }
        QuantizeSpec::Transform(transform) => (transform, topology.bbox),
    };
    debug!(?transform, "quantizing topology");

    let mut t = Untransformer::new(Some(&transform));
    let objects = topology.objects.clone().map(|g| quantize_geometry(&mut t, g));
    let arcs = topology.arcs.iter().map(|arc| quantize_arc(&mut t, arc)).collect();

    Ok(Topology { bbox, transform: Some(transform), objects, arcs })
}

fn quantize_geometry(t: &mut Untransformer, geometry: TopoGeometry) -> TopoGeometry {
    let Geometry { kind, id, bbox, properties } = geometry;
    let kind = match kind {
        GeometryKind::GeometryCollection(geometries) => GeometryKind::GeometryCollection(
            geometries.into_iter().map(|g| quantize_geometry(t, g)).collect(),
        ),
        GeometryKind::Point(p) => GeometryKind::Point(t.apply(&p, None)),
        GeometryKind::MultiPoint(points) => {
            GeometryKind::MultiPoint(points.iter().map(|p| t.apply(p, None)).collect())
        }
        kind => kind,
    };
    Geometry { kind, id, bbox, properties }
}

fn quantize_arc(t: &mut Untransformer, arc: &[Position]) -> Vec<Position> {
    let mut output = Vec::with_capacity(arc.len());
    for (i, p) in arc.iter().enumerate() {
        let q = t.apply(p, Some(i));
        if i == 0 || q.x != 0.0 || q.y != 0.0 {
            output.push(q);
        }
    }
    if output.len() == 1 {
        output.push(Position::new(0.0, 0.0));
    }
    output
}
