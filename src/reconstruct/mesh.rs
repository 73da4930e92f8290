use std::collections::BTreeMap;

use crate::error::Result;
use crate::reconstruct::{object, stitch};
use crate::types::{arc_id, ArcIndex, GeoGeometry, Geometry, GeometryKind, TopoGeometry, Topology};

/// Decides whether an arc shared by (or owned only by) two geometries is
/// kept in a mesh. Called with the first and last geometry that reference
/// the arc; both are the same geometry for an unshared arc.
pub type MeshFilter<'a> = &'a dyn Fn(&TopoGeometry, &TopoGeometry) -> bool;

/// The arcs of `geometry` (or of the whole topology when `None`) stitched
/// into a MultiLineString, each arc appearing once.
pub fn mesh_arcs(topology: &Topology, geometry: Option<&TopoGeometry>, filter: Option<MeshFilter>) -> Result<TopoGeometry> {
    let arcs: Vec<ArcIndex> = match geometry {
        None => (0..topology.arcs.len() as ArcIndex).collect(),
        Some(geometry) => extract_arcs(geometry, filter),
    };
    Ok(Geometry::new(GeometryKind::MultiLineString(stitch(topology, &arcs)?)))
}

/// [`mesh_arcs`], decoded into coordinates.
pub fn mesh(topology: &Topology, geometry: Option<&TopoGeometry>, filter: Option<MeshFilter>) -> Result<GeoGeometry> {
    let arcs = mesh_arcs(topology, geometry, filter)?;
    Ok(object(topology, &arcs)?.unwrap_or_else(Geometry::null))
}

/// For every arc referenced under `geometry`, in arc order, its first
/// reference, kept when the filter accepts its first and last owner.
fn extract_arcs(geometry: &TopoGeometry, filter: Option<MeshFilter>) -> Vec<ArcIndex> {
    let mut geometries_by_arc: BTreeMap<usize, Vec<(ArcIndex, &TopoGeometry)>> = BTreeMap::new();
    collect(geometry, &mut geometries_by_arc);
    geometries_by_arc
        .values()
        .filter_map(|owners| {
            let (&(i, first), &(_, last)) = (owners.first()?, owners.last()?);
            filter.is_none_or(|accept| accept(first, last)).then_some(i)
        })
        .collect()
}

fn collect<'a>(geometry: &'a TopoGeometry, by_arc: &mut BTreeMap<usize, Vec<(ArcIndex, &'a TopoGeometry)>>) {
    match &geometry.kind {
        GeometryKind::GeometryCollection(geometries) => {
            geometries.iter().for_each(|g| collect(g, by_arc))
        }
        _ => geometry.for_each_line(&mut |arcs, _| {
            for &i in arcs {
                by_arc.entry(arc_id(i)).or_default().push((i, geometry));
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn pts(coords: &[[f64; 2]]) -> Vec<Position> {
        coords.iter().copied().map(Position::from).collect()
    }

    /// Two unit squares sharing the edge x = 1.
    fn squares() -> Topology {
        let mut t = Topology {
            arcs: vec![
                pts(&[[1.0, 0.0], [1.0, 1.0]]),
                pts(&[[1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]]),
                pts(&[[1.0, 1.0], [2.0, 1.0], [2.0, 0.0], [1.0, 0.0]]),
            ],
            ..Default::default()
        };
        t.objects.insert("squares", Geometry::new(GeometryKind::GeometryCollection(vec![
            Geometry::new(GeometryKind::Polygon(vec![vec![0, 1]])),
            Geometry::new(GeometryKind::Polygon(vec![vec![2, !0]])),
        ]))).unwrap();
        t
    }

    #[test]
    fn whole_topology_mesh() {
        let t = squares();
        let GeometryKind::MultiLineString(lines) = mesh_arcs(&t, None, None).unwrap().kind else {
            panic!("expected a multilinestring")
        };
        let mut all: Vec<_> = lines.into_iter().flatten().map(arc_id).collect();
        all.sort();
        assert_eq!(all, vec![0, 1, 2]);
    }

    #[test]
    fn interior_filter_keeps_shared_arcs() {
        let t = squares();
        let interior = |a: &TopoGeometry, b: &TopoGeometry| !std::ptr::eq(a, b);
        let m = mesh_arcs(&t, t.object("squares"), Some(&interior)).unwrap();
        assert_eq!(m.kind, GeometryKind::MultiLineString(vec![vec![0]]));

        let decoded = mesh(&t, t.object("squares"), Some(&interior)).unwrap();
        assert_eq!(decoded.kind, GeometryKind::MultiLineString(vec![pts(&[[1.0, 0.0], [1.0, 1.0]])]));
    }

    #[test]
    fn exterior_filter_keeps_outline() {
        let t = squares();
        let exterior = |a: &TopoGeometry, b: &TopoGeometry| std::ptr::eq(a, b);
        let m = mesh_arcs(&t, t.object("squares"), Some(&exterior)).unwrap();
        // Both outline arcs run from (1, 1) to (1, 0), so they cannot chain.
        assert_eq!(m.kind, GeometryKind::MultiLineString(vec![vec![2], vec![1]]));
    }
}
