//! Reading and writing GeoJSON and TopoJSON documents as `serde_json`
//! values.
//!
//! - `geojson` - GeoJSON geometries, Features and FeatureCollections
//! - `topojson` - TopoJSON topologies
//!
//! Both formats share the geometry object layout; they differ only in the
//! member that holds line payloads (`coordinates` vs `arcs`).

pub mod geojson;
pub mod topojson;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::{number, Geometry, GeometryKind, Position};

/// How one format lays out geometry objects.
struct Dialect {
    /// Member holding line, ring and polygon payloads.
    lines: &'static str,
    invalid: fn(String) -> Error,
}

impl Dialect {
    fn member<'v>(&self, value: &'v Value, key: &str) -> Result<&'v Value> {
        value.get(key).ok_or_else(|| (self.invalid)(format!("missing \"{key}\" member")))
    }

    /// Parse one geometry object. A JSON `null` or a `"type": null` object
    /// is the null geometry.
    fn parse_geometry<L: DeserializeOwned>(&self, value: &Value) -> Result<Geometry<L>> {
        if value.is_null() {
            return Ok(Geometry::null());
        }
        if !value.is_object() {
            return Err((self.invalid)(format!("geometry must be an object, got {value}")));
        }
        let kind = match value.get("type").and_then(Value::as_str) {
            None if value.get("type").is_some_and(Value::is_null) => GeometryKind::Null,
            Some("Point") => GeometryKind::Point(Position::deserialize(self.member(value, "coordinates")?)?),
            Some("MultiPoint") => {
                GeometryKind::MultiPoint(Vec::deserialize(self.member(value, "coordinates")?)?)
            }
            Some("LineString") => GeometryKind::LineString(L::deserialize(self.member(value, self.lines)?)?),
            Some("MultiLineString") => {
                GeometryKind::MultiLineString(Vec::deserialize(self.member(value, self.lines)?)?)
            }
            Some("Polygon") => GeometryKind::Polygon(Vec::deserialize(self.member(value, self.lines)?)?),
            Some("MultiPolygon") => {
                GeometryKind::MultiPolygon(Vec::deserialize(self.member(value, self.lines)?)?)
            }
            Some("GeometryCollection") => {
                let members = self.member(value, "geometries")?.as_array()
                    .ok_or_else(|| (self.invalid)("\"geometries\" must be an array".into()))?;
                GeometryKind::GeometryCollection(
                    members.iter().map(|g| self.parse_geometry(g)).collect::<Result<_>>()?,
                )
            }
            other => return Err((self.invalid)(format!("unknown geometry type {other:?}"))),
        };
        let mut geometry = Geometry::new(kind);
        geometry.id = parse_id(value);
        geometry.bbox = parse_bbox(value)?;
        geometry.properties = parse_properties(value);
        Ok(geometry)
    }

    fn write_geometry<L: Serialize>(&self, geometry: &Geometry<L>) -> Result<Value> {
        let mut object = Map::new();
        object.insert("type".into(), geometry.type_name().map_or(Value::Null, Value::from));
        write_attributes(&mut object, &geometry.id, &geometry.bbox, &geometry.properties);
        let (key, payload) = match &geometry.kind {
            GeometryKind::Point(p) => ("coordinates", serde_json::to_value(p)?),
            GeometryKind::MultiPoint(ps) => ("coordinates", serde_json::to_value(ps)?),
            GeometryKind::LineString(line) => (self.lines, serde_json::to_value(line)?),
            GeometryKind::MultiLineString(lines) | GeometryKind::Polygon(lines) => {
                (self.lines, serde_json::to_value(lines)?)
            }
            GeometryKind::MultiPolygon(polygons) => (self.lines, serde_json::to_value(polygons)?),
            GeometryKind::GeometryCollection(geometries) => (
                "geometries",
                Value::Array(geometries.iter().map(|g| self.write_geometry(g)).collect::<Result<_>>()?),
            ),
            GeometryKind::Null => return Ok(Value::Object(object)),
        };
        object.insert(key.into(), payload);
        Ok(Value::Object(object))
    }
}

fn parse_id(value: &Value) -> Option<Value> {
    value.get("id").filter(|id| !id.is_null()).cloned()
}

fn parse_bbox(value: &Value) -> Result<Option<Vec<f64>>> {
    match value.get("bbox") {
        None | Some(Value::Null) => Ok(None),
        Some(bbox) => Ok(Some(Vec::deserialize(bbox)?)),
    }
}

fn parse_properties(value: &Value) -> Option<Map<String, Value>> {
    value.get("properties").and_then(Value::as_object).cloned()
}

fn write_bbox(bbox: &[f64]) -> Value {
    Value::Array(bbox.iter().copied().map(number).collect())
}

fn write_attributes(
    object: &mut Map<String, Value>,
    id: &Option<Value>,
    bbox: &Option<Vec<f64>>,
    properties: &Option<Map<String, Value>>,
) {
    if let Some(id) = id {
        object.insert("id".into(), id.clone());
    }
    if let Some(bbox) = bbox {
        object.insert("bbox".into(), write_bbox(bbox));
    }
    if let Some(properties) = properties {
        object.insert("properties".into(), Value::Object(properties.clone()));
    }
}
