use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::io::{parse_bbox, parse_id, parse_properties, write_attributes, write_bbox, Dialect};
use crate::types::{Feature, FeatureCollection, GeoGeometry, GeoJson};

const GEOJSON: Dialect = Dialect { lines: "coordinates", invalid: Error::InvalidGeoJson };

/// Parse a GeoJSON document: a geometry, a Feature, a FeatureCollection or
/// `null`.
pub fn parse(value: &Value) -> Result<GeoJson> {
    Ok(match value.get("type").and_then(Value::as_str) {
        _ if value.is_null() => GeoJson::Null,
        Some("Feature") => GeoJson::Feature(parse_feature(value)?),
        Some("FeatureCollection") => {
            let features = value.get("features").and_then(Value::as_array)
                .ok_or_else(|| Error::InvalidGeoJson("\"features\" must be an array".into()))?;
            GeoJson::FeatureCollection(FeatureCollection {
                bbox: parse_bbox(value)?,
                features: features.iter().map(parse_feature).collect::<Result<_>>()?,
            })
        }
        _ => GeoJson::Geometry(parse_geometry(value)?),
    })
}

/// Parse a single GeoJSON geometry object.
pub fn parse_geometry(value: &Value) -> Result<GeoGeometry> {
    GEOJSON.parse_geometry(value)
}

fn parse_feature(value: &Value) -> Result<Feature> {
    if value.get("type").and_then(Value::as_str) != Some("Feature") {
        return Err(Error::InvalidGeoJson(format!("expected a Feature, got {value}")));
    }
    let geometry = match value.get("geometry") {
        None | Some(Value::Null) => None,
        Some(geometry) => Some(parse_geometry(geometry)?),
    };
    Ok(Feature {
        id: parse_id(value),
        bbox: parse_bbox(value)?,
        properties: parse_properties(value),
        geometry,
    })
}

/// Write a GeoJSON document.
pub fn to_value(geojson: &GeoJson) -> Result<Value> {
    match geojson {
        GeoJson::Null => Ok(Value::Null),
        GeoJson::Geometry(geometry) => GEOJSON.write_geometry(geometry),
        GeoJson::Feature(feature) => write_feature(feature),
        GeoJson::FeatureCollection(collection) => {
            let mut object = Map::new();
            object.insert("type".into(), "FeatureCollection".into());
            if let Some(bbox) = &collection.bbox {
                object.insert("bbox".into(), write_bbox(bbox));
            }
            let features = collection.features.iter().map(write_feature).collect::<Result<_>>()?;
            object.insert("features".into(), Value::Array(features));
            Ok(Value::Object(object))
        }
    }
}

fn write_feature(feature: &Feature) -> Result<Value> {
    let mut object = Map::new();
    object.insert("type".into(), "Feature".into());
    write_attributes(&mut object, &feature.id, &feature.bbox, &feature.properties);
    let geometry = match &feature.geometry {
        Some(geometry) => GEOJSON.write_geometry(geometry)?,
        None => Value::Null,
    };
    object.insert("geometry".into(), geometry);
    Ok(Value::Object(object))
}
