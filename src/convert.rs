//! Conversion between decoded geometries and `geo` types.

use geo::{Area, Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

use crate::types::{GeoGeometry, Geometry, GeometryKind, Position};

#[inline]
fn line_string(positions: &[Position]) -> LineString<f64> {
    LineString(positions.iter().map(Position::coord).collect())
}

fn polygon(rings: &[Vec<Position>]) -> Polygon<f64> {
    match rings.split_first() {
        Some((exterior, interiors)) => {
            Polygon::new(line_string(exterior), interiors.iter().map(|r| line_string(r)).collect())
        }
        None => Polygon::new(LineString::new(Vec::new()), Vec::new()),
    }
}

/// Convert a decoded geometry to `geo` types, dropping extra dimensions and
/// attributes. The null geometry, and null members of a collection, become
/// `None`.
pub fn to_geo(geometry: &GeoGeometry) -> Option<geo::Geometry<f64>> {
    Some(match &geometry.kind {
        GeometryKind::Point(p) => geo::Geometry::Point(Point(p.coord())),
        GeometryKind::MultiPoint(ps) => {
            geo::Geometry::MultiPoint(MultiPoint(ps.iter().map(|p| Point(p.coord())).collect()))
        }
        GeometryKind::LineString(line) => geo::Geometry::LineString(line_string(line)),
        GeometryKind::MultiLineString(lines) => geo::Geometry::MultiLineString(MultiLineString(
            lines.iter().map(|l| line_string(l)).collect(),
        )),
        GeometryKind::Polygon(rings) => geo::Geometry::Polygon(polygon(rings)),
        GeometryKind::MultiPolygon(polygons) => geo::Geometry::MultiPolygon(MultiPolygon(
            polygons.iter().map(|p| polygon(p)).collect(),
        )),
        GeometryKind::GeometryCollection(geometries) => geo::Geometry::GeometryCollection(
            geo::GeometryCollection(geometries.iter().filter_map(to_geo).collect()),
        ),
        GeometryKind::Null => return None,
    })
}

fn positions(line: &LineString<f64>) -> Vec<Position> {
    line.coords().map(|c: &Coord<f64>| Position::new(c.x, c.y)).collect()
}

fn rings(polygon: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior()).chain(polygon.interiors()).map(positions).collect()
}

/// Convert a `geo` geometry into a bare decoded geometry. Lines, rectangles
/// and triangles become a LineString or Polygon.
pub fn from_geo(geometry: &geo::Geometry<f64>) -> GeoGeometry {
    let kind = match geometry {
        geo::Geometry::Point(p) => GeometryKind::Point(Position::new(p.x(), p.y())),
        geo::Geometry::MultiPoint(ps) => {
            GeometryKind::MultiPoint(ps.iter().map(|p| Position::new(p.x(), p.y())).collect())
        }
        geo::Geometry::Line(l) => GeometryKind::LineString(vec![
            Position::new(l.start.x, l.start.y),
            Position::new(l.end.x, l.end.y),
        ]),
        geo::Geometry::LineString(l) => GeometryKind::LineString(positions(l)),
        geo::Geometry::MultiLineString(ls) => {
            GeometryKind::MultiLineString(ls.iter().map(positions).collect())
        }
        geo::Geometry::Polygon(p) => GeometryKind::Polygon(rings(p)),
        geo::Geometry::MultiPolygon(ps) => GeometryKind::MultiPolygon(ps.iter().map(rings).collect()),
        geo::Geometry::GeometryCollection(gs) => {
            GeometryKind::GeometryCollection(gs.iter().map(from_geo).collect())
        }
        geo::Geometry::Rect(r) => GeometryKind::Polygon(rings(&r.to_polygon())),
        geo::Geometry::Triangle(t) => GeometryKind::Polygon(rings(&t.to_polygon())),
    };
    Geometry::new(kind)
}

/// Unsigned planar area enclosed by a ring.
pub(crate) fn ring_area(ring: &[Position]) -> f64 {
    Polygon::new(line_string(ring), Vec::new()).unsigned_area()
}
