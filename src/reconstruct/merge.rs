use ahash::AHashMap;

use crate::convert::ring_area;
use crate::error::Result;
use crate::reconstruct::{object, stitch, ArcDecoder};
use crate::types::{arc_id, ArcIndex, GeoGeometry, Geometry, GeometryKind, TopoGeometry, Topology};

type Polygon<'a> = &'a [Vec<ArcIndex>];

/// Dissolve the polygons of `geometries` along their shared arcs.
///
/// Polygons connected through shared arcs form one output polygon whose
/// rings are the stitched arcs used by a single polygon. When a component
/// yields several rings, the largest one is moved to the front as the
/// exterior.
pub fn merge_arcs(topology: &Topology, geometries: &[&TopoGeometry]) -> Result<TopoGeometry> {
    let mut polygons: Vec<Polygon> = Vec::new();
    for geometry in geometries {
        gather(geometry, &mut polygons);
    }

    let mut polygons_by_arc: AHashMap<usize, Vec<usize>> = AHashMap::new();
    for (p, polygon) in polygons.iter().enumerate() {
        for &arc in polygon.iter().flatten() {
            polygons_by_arc.entry(arc_id(arc)).or_default().push(p);
        }
    }

    let mut merged = Vec::new();
    for group in components(&polygons, &polygons_by_arc) {
        let arcs: Vec<ArcIndex> = group
            .iter()
            .flat_map(|&p| polygons[p].iter().flatten().copied())
            .filter(|&arc| polygons_by_arc.get(&arc_id(arc)).is_some_and(|owners| owners.len() < 2))
            .collect();
        let mut rings = stitch(topology, &arcs)?;
        if rings.len() > 1 {
            largest_first(topology, &mut rings)?;
        }
        if !rings.is_empty() {
            merged.push(rings);
        }
    }
    Ok(Geometry::new(GeometryKind::MultiPolygon(merged)))
}

/// [`merge_arcs`], decoded into coordinates.
pub fn merge(topology: &Topology, geometries: &[&TopoGeometry]) -> Result<GeoGeometry> {
    let merged = merge_arcs(topology, geometries)?;
    Ok(object(topology, &merged)?.unwrap_or_else(Geometry::null))
}

fn gather<'a>(geometry: &'a TopoGeometry, polygons: &mut Vec<Polygon<'a>>) {
    match &geometry.kind {
        GeometryKind::GeometryCollection(geometries) => {
            geometries.iter().for_each(|g| gather(g, polygons))
        }
        GeometryKind::Polygon(rings) => polygons.push(rings),
        GeometryKind::MultiPolygon(members) => polygons.extend(members.iter().map(Vec::as_slice)),
        _ => {}
    }
}

/// Connected components of the shared-arc graph, each in depth-first
/// discovery order.
fn components(polygons: &[Polygon], polygons_by_arc: &AHashMap<usize, Vec<usize>>) -> Vec<Vec<usize>> {
    let mut visited = vec![false; polygons.len()];
    let mut groups = Vec::new();
    for seed in 0..polygons.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        let mut group = Vec::new();
        let mut stack = vec![seed];
        while let Some(p) = stack.pop() {
            group.push(p);
            for &arc in polygons[p].iter().flatten() {
                for &q in polygons_by_arc.get(&arc_id(arc)).into_iter().flatten() {
                    if !visited[q] {
                        visited[q] = true;
                        stack.push(q);
                    }
                }
            }
        }
        groups.push(group);
    }
    groups
}

/// Swap the ring of greatest planar area into position 0.
fn largest_first(topology: &Topology, rings: &mut [Vec<ArcIndex>]) -> Result<()> {
    let mut decoder = ArcDecoder::new(topology);
    let mut largest = ring_area(&decoder.ring(&rings[0])?);
    for i in 1..rings.len() {
        let area = ring_area(&decoder.ring(&rings[i])?);
        if area > largest {
            rings.swap(0, i);
            largest = area;
        }
    }
    Ok(())
}
