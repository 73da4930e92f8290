use serde_json::{Map, Value};

use crate::types::Position;

/// Whether a line payload is an open line or a closed polygon ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    Line,
    Ring,
}

/// The closed set of geometry variants, generic over the line payload `L`.
///
/// `L` changes as a geometry moves through the pipeline: coordinate lists on
/// the GeoJSON side, coordinate-range ids while the topology is being built,
/// and signed arc-index lists once it is finished. Points never change
/// representation.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryKind<L> {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(L),
    MultiLineString(Vec<L>),
    Polygon(Vec<L>),
    MultiPolygon(Vec<Vec<L>>),
    GeometryCollection(Vec<Geometry<L>>),
    Null,
}

/// A geometry plus the feature attributes promoted onto it.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry<L> {
    pub kind: GeometryKind<L>,
    pub id: Option<Value>,
    pub bbox: Option<Vec<f64>>,
    pub properties: Option<Map<String, Value>>,
}

impl<L> From<GeometryKind<L>> for Geometry<L> {
    fn from(kind: GeometryKind<L>) -> Self {
        Self::new(kind)
    }
}

impl<L> Geometry<L> {
    /// A bare geometry with no id, bbox or properties.
    pub fn new(kind: GeometryKind<L>) -> Self {
        Self { kind, id: None, bbox: None, properties: None }
    }

    /// The `{type: null}` geometry.
    pub fn null() -> Self {
        Self::new(GeometryKind::Null)
    }

    /// The GeoJSON/TopoJSON `type` name, or `None` for the null geometry.
    pub fn type_name(&self) -> Option<&'static str> {
        Some(match self.kind {
            GeometryKind::Point(_) => "Point",
            GeometryKind::MultiPoint(_) => "MultiPoint",
            GeometryKind::LineString(_) => "LineString",
            GeometryKind::MultiLineString(_) => "MultiLineString",
            GeometryKind::Polygon(_) => "Polygon",
            GeometryKind::MultiPolygon(_) => "MultiPolygon",
            GeometryKind::GeometryCollection(_) => "GeometryCollection",
            GeometryKind::Null => return None,
        })
    }

    /// Rewrite every line payload, visiting lines and rings in document
    /// order (nested collections depth-first). Attributes are carried over.
    pub fn map_lines<M>(self, f: &mut impl FnMut(L, Part) -> M) -> Geometry<M> {
        let kind = match self.kind {
            GeometryKind::Point(p) => GeometryKind::Point(p),
            GeometryKind::MultiPoint(ps) => GeometryKind::MultiPoint(ps),
            GeometryKind::LineString(line) => GeometryKind::LineString(f(line, Part::Line)),
            GeometryKind::MultiLineString(lines) => GeometryKind::MultiLineString(
                lines.into_iter().map(|line| f(line, Part::Line)).collect(),
            ),
            GeometryKind::Polygon(rings) => GeometryKind::Polygon(
                rings.into_iter().map(|ring| f(ring, Part::Ring)).collect(),
            ),
            GeometryKind::MultiPolygon(polygons) => GeometryKind::MultiPolygon(
                polygons.into_iter()
                    .map(|rings| rings.into_iter().map(|ring| f(ring, Part::Ring)).collect())
                    .collect(),
            ),
            GeometryKind::GeometryCollection(geometries) => GeometryKind::GeometryCollection(
                geometries.into_iter().map(|g| g.map_lines(f)).collect(),
            ),
            GeometryKind::Null => GeometryKind::Null,
        };
        Geometry { kind, id: self.id, bbox: self.bbox, properties: self.properties }
    }

    /// Fallible [`Geometry::map_lines`]; stops at the first error.
    pub fn try_map_lines<M, E>(self, f: &mut impl FnMut(L, Part) -> Result<M, E>) -> Result<Geometry<M>, E> {
        let kind = match self.kind {
            GeometryKind::Point(p) => GeometryKind::Point(p),
            GeometryKind::MultiPoint(ps) => GeometryKind::MultiPoint(ps),
            GeometryKind::LineString(line) => GeometryKind::LineString(f(line, Part::Line)?),
            GeometryKind::MultiLineString(lines) => GeometryKind::MultiLineString(
                lines.into_iter().map(|line| f(line, Part::Line)).collect::<Result<_, _>>()?,
            ),
            GeometryKind::Polygon(rings) => GeometryKind::Polygon(
                rings.into_iter().map(|ring| f(ring, Part::Ring)).collect::<Result<_, _>>()?,
            ),
            GeometryKind::MultiPolygon(polygons) => GeometryKind::MultiPolygon(
                polygons.into_iter()
                    .map(|rings| rings.into_iter().map(|ring| f(ring, Part::Ring)).collect())
                    .collect::<Result<_, _>>()?,
            ),
            GeometryKind::GeometryCollection(geometries) => GeometryKind::GeometryCollection(
                geometries.into_iter().map(|g| g.try_map_lines(f)).collect::<Result<_, _>>()?,
            ),
            GeometryKind::Null => GeometryKind::Null,
        };
        Ok(Geometry { kind, id: self.id, bbox: self.bbox, properties: self.properties })
    }

    /// Visit every line payload in the same order as [`Geometry::map_lines`].
    pub fn for_each_line<'a>(&'a self, f: &mut impl FnMut(&'a L, Part)) {
        match &self.kind {
            GeometryKind::Point(_) | GeometryKind::MultiPoint(_) | GeometryKind::Null => {}
            GeometryKind::LineString(line) => f(line, Part::Line),
            GeometryKind::MultiLineString(lines) => lines.iter().for_each(|line| f(line, Part::Line)),
            GeometryKind::Polygon(rings) => rings.iter().for_each(|ring| f(ring, Part::Ring)),
            GeometryKind::MultiPolygon(polygons) => polygons.iter()
                .flatten()
                .for_each(|ring| f(ring, Part::Ring)),
            GeometryKind::GeometryCollection(geometries) => {
                geometries.iter().for_each(|g| g.for_each_line(f))
            }
        }
    }
}
