// Integration tests for the topology consumers:
//   feature, mesh, merge, stitch, neighbors, quantize, bbox

use approx::assert_relative_eq;
use geo::Area;
use serde_json::{json, Value};
use topokit::{
    bbox, convert, feature_by_name, io, merge, merge_arcs, mesh_arcs, neighbors, quantize,
    stitch, topology, Error, GeoJson, GeometryKind, Objects, Position, QuantizeSpec,
    TopoGeometry, Topology,
};

/// Two unit squares side by side, as one FeatureCollection named "squares".
fn squares(quantization: Option<f64>) -> Topology {
    let doc = json!({"type": "FeatureCollection", "features": [
        {"type": "Feature", "id": "left", "properties": {"n": 1},
         "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]}},
        {"type": "Feature", "id": "right", "properties": {},
         "geometry": {"type": "Polygon", "coordinates": [[[1, 0], [2, 0], [2, 1], [1, 1], [1, 0]]]}}
    ]});
    let mut objects = Objects::new();
    objects.insert("squares", io::geojson::parse(&doc).unwrap()).unwrap();
    topology(objects, quantization).unwrap()
}

fn members(t: &Topology) -> Vec<&TopoGeometry> {
    match &t.object("squares").unwrap().kind {
        GeometryKind::GeometryCollection(geometries) => geometries.iter().collect(),
        other => panic!("expected a collection, got {other:?}"),
    }
}

fn pts(coords: &[[f64; 2]]) -> Vec<Position> {
    coords.iter().copied().map(Position::from).collect()
}

#[test]
fn squares_topology_layout() {
    let t = squares(None);
    assert_eq!(t.arcs, vec![
        pts(&[[1.0, 0.0], [1.0, 1.0]]),
        pts(&[[1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]]),
        pts(&[[1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0]]),
    ]);
    let m = members(&t);
    assert_eq!(m[0].kind, GeometryKind::Polygon(vec![vec![0, 1]]));
    assert_eq!(m[1].kind, GeometryKind::Polygon(vec![vec![2, !0]]));
    // Empty properties are not promoted.
    assert_eq!(m[1].properties, None);
}

#[test]
fn feature_collection_comes_back() {
    let t = squares(None);
    let GeoJson::FeatureCollection(fc) = feature_by_name(&t, "squares").unwrap() else {
        panic!("expected a feature collection")
    };
    assert_eq!(fc.features.len(), 2);
    assert_eq!(fc.features[0].id, Some(json!("left")));
    assert_eq!(fc.features[0].properties.as_ref().unwrap()["n"], json!(1));
    assert!(fc.features[1].properties.as_ref().unwrap().is_empty());
    assert_eq!(
        fc.features[0].geometry.as_ref().unwrap().kind,
        GeometryKind::Polygon(vec![pts(&[[1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]])])
    );
    assert!(matches!(feature_by_name(&t, "nope"), Err(Error::UnknownObject(_))));
}

#[test]
fn interior_mesh_is_the_shared_edge() {
    let t = squares(None);
    let interior = |a: &TopoGeometry, b: &TopoGeometry| !std::ptr::eq(a, b);
    let mesh = mesh_arcs(&t, t.object("squares"), Some(&interior)).unwrap();
    assert_eq!(mesh.kind, GeometryKind::MultiLineString(vec![vec![0]]));
}

#[test]
fn full_mesh_covers_every_arc_once() {
    let t = squares(None);
    let GeometryKind::MultiLineString(lines) = mesh_arcs(&t, None, None).unwrap().kind else {
        panic!("expected a multilinestring")
    };
    let mut ids: Vec<_> = lines.concat().into_iter().map(topokit::arc_id).collect();
    ids.sort();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn merge_dissolves_the_shared_edge() {
    let t = squares(None);
    let m = members(&t);
    assert_eq!(merge_arcs(&t, &m).unwrap().kind, GeometryKind::MultiPolygon(vec![vec![vec![1, 2]]]));

    let merged = merge(&t, &m).unwrap();
    let GeometryKind::MultiPolygon(polygons) = &merged.kind else { panic!("expected a multipolygon") };
    assert_eq!(polygons[0][0].len(), 7);
    assert_relative_eq!(convert::to_geo(&merged).unwrap().unsigned_area(), 2.0);
}

#[test]
fn stitching_a_ring_closes_it() {
    let t = squares(None);
    let rings = stitch(&t, &[1, 0]).unwrap();
    assert_eq!(rings, vec![vec![1, 0]]);
    let first = t.arc(1).unwrap().first().unwrap();
    let last = t.arc(0).unwrap().last().unwrap();
    assert_eq!(first, last);
}

#[test]
fn squares_are_neighbors() {
    let t = squares(None);
    assert_eq!(neighbors(&members(&t)), vec![vec![1], vec![0]]);
}

#[test]
fn bbox_matches_input() {
    let t = squares(None);
    assert_eq!(t.bbox, Some([0.0, 0.0, 2.0, 1.0]));
    assert_eq!(bbox(&t), [0.0, 0.0, 2.0, 1.0]);
    let quantized = bbox(&squares(Some(101.0)));
    for (got, want) in quantized.into_iter().zip([0.0, 0.0, 2.0, 1.0]) {
        assert_relative_eq!(got, want, epsilon = 1e-9);
    }
}

#[test]
fn standalone_quantize_keeps_geometry() {
    let t = squares(None);
    let q = quantize(&t, QuantizeSpec::Resolution(3.0)).unwrap();
    let transform = q.transform.unwrap();
    assert_eq!(transform.scale, [1.0, 0.5]);
    assert_eq!(transform.translate, [0.0, 0.0]);
    assert_eq!(q.arcs[0], pts(&[[1.0, 0.0], [0.0, 2.0]]));

    let before = feature_by_name(&t, "squares").unwrap();
    let after = feature_by_name(&q, "squares").unwrap();
    assert_eq!(before, after);

    assert!(matches!(quantize(&q, QuantizeSpec::Resolution(3.0)), Err(Error::AlreadyQuantized)));
    assert!(matches!(quantize(&t, QuantizeSpec::Resolution(1.9)), Err(Error::InvalidResolution(_))));
}

#[test]
fn quantized_build_decodes_close_to_input() {
    let t = squares(Some(10001.0));
    let doc: Value = io::topojson::to_value(&t).unwrap();
    let mut positions = doc["arcs"].as_array().unwrap().iter().flat_map(|arc| arc.as_array().unwrap());
    assert!(positions.all(|p| p[0].is_i64() && p[1].is_i64()));

    let GeoJson::FeatureCollection(fc) = feature_by_name(&t, "squares").unwrap() else {
        panic!("expected a feature collection")
    };
    let GeometryKind::Polygon(rings) = &fc.features[1].geometry.as_ref().unwrap().kind else {
        panic!("expected a polygon")
    };
    let expected = [[1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0], [1.0, 0.0]];
    for (p, [x, y]) in rings[0].iter().zip(expected) {
        assert_relative_eq!(p.x, x, epsilon = 1e-9);
        assert_relative_eq!(p.y, y, epsilon = 1e-9);
    }
}
