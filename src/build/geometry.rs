use crate::types::{Feature, GeoGeometry, GeoJson, Geometry, GeometryKind, Objects};

/// Reduce every input object to a bare geometry.
///
/// A Feature becomes its geometry with a non-null `id`, a `bbox` and
/// non-empty `properties` promoted onto it; a FeatureCollection becomes a
/// GeometryCollection of its normalized features, keeping its own `bbox`;
/// a missing object becomes the null geometry. Bare geometries keep only
/// their `bbox`.
pub fn normalize(objects: Objects<GeoJson>) -> Objects<GeoGeometry> {
    objects.map(normalize_object)
}

fn normalize_object(object: GeoJson) -> GeoGeometry {
    match object {
        GeoJson::Null => Geometry::null(),
        GeoJson::Geometry(geometry) => bare(geometry),
        GeoJson::Feature(feature) => promote(feature),
        GeoJson::FeatureCollection(collection) => {
            let mut output = Geometry::new(GeometryKind::GeometryCollection(
                collection.features.into_iter().map(promote).collect(),
            ));
            output.bbox = collection.bbox;
            output
        }
    }
}

fn promote(feature: Feature) -> GeoGeometry {
    let mut output = feature.geometry.map(bare).unwrap_or_else(Geometry::null);
    if let Some(id) = feature.id.filter(|id| !id.is_null()) {
        output.id = Some(id);
    }
    if feature.bbox.is_some() {
        output.bbox = feature.bbox;
    }
    if let Some(properties) = feature.properties.filter(|p| !p.is_empty()) {
        output.properties = Some(properties);
    }
    output
}

fn bare(geometry: GeoGeometry) -> GeoGeometry {
    let kind = match geometry.kind {
        GeometryKind::GeometryCollection(geometries) => {
            GeometryKind::GeometryCollection(geometries.into_iter().map(bare).collect())
        }
        kind => kind,
    };
    Geometry { kind, id: None, bbox: geometry.bbox, properties: None }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;
    use crate::types::{FeatureCollection, Position};

    fn line() -> GeoGeometry {
        Geometry::new(GeometryKind::LineString(vec![Position::new(0.0, 0.0), Position::new(1.0, 0.0)]))
    }

    fn one(object: GeoJson) -> GeoGeometry {
        let mut objects = Objects::new();
        objects.insert("o", object).unwrap();
        normalize(objects).into_iter().next().unwrap().1
    }

    #[test]
    fn null_becomes_null_geometry() {
        assert_eq!(one(GeoJson::Null), Geometry::null());
    }

    #[test]
    fn feature_promotes_attributes() {
        let mut properties = Map::new();
        properties.insert("name".into(), json!("road"));
        let feature = Feature {
            id: Some(json!(7)),
            bbox: Some(vec![0.0, 0.0, 1.0, 0.0]),
            properties: Some(properties.clone()),
            geometry: Some(line()),
        };
        let g = one(feature.into());
        assert_eq!(g.kind, line().kind);
        assert_eq!(g.id, Some(json!(7)));
        assert_eq!(g.bbox, Some(vec![0.0, 0.0, 1.0, 0.0]));
        assert_eq!(g.properties, Some(properties));
    }

    #[test]
    fn empty_properties_and_null_id_are_dropped() {
        let feature = Feature {
            id: Some(serde_json::Value::Null),
            bbox: None,
            properties: Some(Map::new()),
            geometry: None,
        };
        let g = one(feature.into());
        assert_eq!(g, Geometry::null());
    }

    #[test]
    fn feature_collection_becomes_geometry_collection() {
        let collection = FeatureCollection {
            bbox: Some(vec![0.0, 0.0, 1.0, 1.0]),
            features: vec![
                Feature { geometry: Some(line()), ..Default::default() },
                Feature { id: Some(json!("b")), ..Default::default() },
            ],
        };
        let g = one(collection.into());
        assert_eq!(g.bbox, Some(vec![0.0, 0.0, 1.0, 1.0]));
        let GeometryKind::GeometryCollection(children) = g.kind else { panic!("expected a collection") };
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], line());
        assert_eq!(children[1].kind, GeometryKind::Null);
        assert_eq!(children[1].id, Some(json!("b")));
    }

    #[test]
    fn bare_geometry_keeps_only_bbox() {
        let mut g = line();
        g.id = Some(json!(1));
        g.bbox = Some(vec![0.0, 0.0, 1.0, 0.0]);
        let out = one(g.into());
        assert_eq!(out.id, None);
        assert_eq!(out.bbox, Some(vec![0.0, 0.0, 1.0, 0.0]));
    }
}
