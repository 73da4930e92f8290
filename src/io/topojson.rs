use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::io::{parse_bbox, write_bbox, Dialect};
use crate::types::{BBox, Objects, TopoGeometry, Topology, Transform};

const TOPOJSON: Dialect = Dialect { lines: "arcs", invalid: Error::InvalidTopoJson };

/// Parse a TopoJSON document. Objects keep their document order.
pub fn parse(value: &Value) -> Result<Topology> {
    if value.get("type").and_then(Value::as_str) != Some("Topology") {
        return Err(Error::InvalidTopoJson("expected \"type\": \"Topology\"".into()));
    }
    let bbox = match parse_bbox(value)? {
        None => None,
        Some(bbox) => Some(<BBox>::try_from(bbox.as_slice()).map_err(|_| {
            Error::InvalidTopoJson(format!("bbox must have four numbers, got {}", bbox.len()))
        })?),
    };
    let transform = match value.get("transform") {
        None | Some(Value::Null) => None,
        Some(transform) => Some(Transform::deserialize(transform)?),
    };
    let mut objects = Objects::new();
    if let Some(members) = value.get("objects") {
        let members = members.as_object()
            .ok_or_else(|| Error::InvalidTopoJson("\"objects\" must be an object".into()))?;
        for (name, object) in members {
            objects.insert(name.as_str(), parse_geometry(object)?)?;
        }
    }
    let arcs = match value.get("arcs") {
        None | Some(Value::Null) => Vec::new(),
        Some(arcs) => Vec::deserialize(arcs)?,
    };
    Ok(Topology { bbox, transform, objects, arcs })
}

/// Parse a single TopoJSON geometry object.
pub fn parse_geometry(value: &Value) -> Result<TopoGeometry> {
    TOPOJSON.parse_geometry(value)
}

/// Write a topology as a TopoJSON document.
pub fn to_value(topology: &Topology) -> Result<Value> {
    let mut document = Map::new();
    document.insert("type".into(), "Topology".into());
    if let Some(bbox) = &topology.bbox {
        document.insert("bbox".into(), write_bbox(bbox));
    }
    if let Some(transform) = &topology.transform {
        document.insert("transform".into(), serde_json::to_value(transform)?);
    }
    let mut objects = Map::new();
    for (name, object) in &topology.objects {
        objects.insert(name.to_owned(), TOPOJSON.write_geometry(object)?);
    }
    document.insert("objects".into(), Value::Object(objects));
    document.insert("arcs".into(), serde_json::to_value(&topology.arcs)?);
    Ok(Value::Object(document))
}
