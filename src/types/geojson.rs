use serde_json::{Map, Value};

use crate::types::{Geometry, Position};

/// A geometry whose lines and rings hold coordinates.
pub type GeoGeometry = Geometry<Vec<Position>>;

/// A GeoJSON Feature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feature {
    pub id: Option<Value>,
    pub bbox: Option<Vec<f64>>,
    pub properties: Option<Map<String, Value>>,
    pub geometry: Option<GeoGeometry>,
}

/// A GeoJSON FeatureCollection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
    pub bbox: Option<Vec<f64>>,
    pub features: Vec<Feature>,
}

/// Any GeoJSON object accepted as topology input, or produced by
/// reconstruction.
#[derive(Clone, Debug, PartialEq)]
pub enum GeoJson {
    Null,
    Geometry(GeoGeometry),
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

impl From<GeoGeometry> for GeoJson {
    fn from(geometry: GeoGeometry) -> Self {
        GeoJson::Geometry(geometry)
    }
}

impl From<Feature> for GeoJson {
    fn from(feature: Feature) -> Self {
        GeoJson::Feature(feature)
    }
}

impl From<FeatureCollection> for GeoJson {
    fn from(collection: FeatureCollection) -> Self {
        GeoJson::FeatureCollection(collection)
    }
}
