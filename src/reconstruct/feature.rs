use serde_json::Map;

use crate::error::{Error, Result};
use crate::reconstruct::Transformer;
use crate::types::{
    ArcIndex, Feature, FeatureCollection, GeoGeometry, GeoJson, Geometry, GeometryKind,
    Position, TopoGeometry, Topology,
};

/// Decodes arc references of one topology into coordinate lists.
pub(crate) struct ArcDecoder<'a> {
    topology: &'a Topology,
    transform: Transformer,
}

impl<'a> ArcDecoder<'a> {
    pub(crate) fn new(topology: &'a Topology) -> Self {
        Self { topology, transform: Transformer::new(topology.transform.as_ref()) }
    }

    #[inline]
    fn point(&mut self, p: &Position) -> Position {
        self.transform.apply(p, None)
    }

    /// Append arc `i` to `points`, sharing its first position with the
    /// current last one.
    fn arc(&mut self, i: ArcIndex, points: &mut Vec<Position>) -> Result<()> {
        let arc = self.topology.arc(i).ok_or(Error::ArcOutOfRange(i))?;
        points.pop();
        let from = points.len();
        for (k, p) in arc.iter().enumerate() {
            points.push(self.transform.apply(p, Some(k)));
        }
        if i < 0 {
            points[from..].reverse();
        }
        Ok(())
    }

    /// Concatenate the arcs of a line; a line that decodes to a single
    /// position repeats it.
    pub(crate) fn line(&mut self, arcs: &[ArcIndex]) -> Result<Vec<Position>> {
        let mut points = Vec::new();
        for &i in arcs {
            self.arc(i, &mut points)?;
        }
        if let [only] = points.as_slice() {
            points.push(only.clone());
        }
        Ok(points)
    }

    /// Like [`ArcDecoder::line`], padded to the four positions of the
    /// smallest closed ring.
    pub(crate) fn ring(&mut self, arcs: &[ArcIndex]) -> Result<Vec<Position>> {
        let mut points = self.line(arcs)?;
        if let Some(first) = points.first().cloned() {
            points.resize(points.len().max(4), first);
        }
        Ok(points)
    }

    fn geometry(&mut self, geometry: &TopoGeometry) -> Result<GeoGeometry> {
        let kind = match &geometry.kind {
            GeometryKind::GeometryCollection(geometries) => GeometryKind::GeometryCollection(
                geometries.iter().map(|g| self.geometry(g)).collect::<Result<_>>()?,
            ),
            GeometryKind::Point(p) => GeometryKind::Point(self.point(p)),
            GeometryKind::MultiPoint(points) => {
                GeometryKind::MultiPoint(points.iter().map(|p| self.point(p)).collect())
            }
            GeometryKind::LineString(arcs) => GeometryKind::LineString(self.line(arcs)?),
            GeometryKind::MultiLineString(lines) => GeometryKind::MultiLineString(
                lines.iter().map(|arcs| self.line(arcs)).collect::<Result<_>>()?,
            ),
            GeometryKind::Polygon(rings) => GeometryKind::Polygon(self.polygon(rings)?),
            GeometryKind::MultiPolygon(polygons) => GeometryKind::MultiPolygon(
                polygons.iter().map(|rings| self.polygon(rings)).collect::<Result<_>>()?,
            ),
            GeometryKind::Null => GeometryKind::Null,
        };
        Ok(Geometry::new(kind))
    }

    fn polygon(&mut self, rings: &[Vec<ArcIndex>]) -> Result<Vec<Vec<Position>>> {
        rings.iter().map(|arcs| self.ring(arcs)).collect()
    }
}

/// Decode a topology geometry into coordinates, without its attributes.
/// The null geometry decodes to `None`; null members of a collection stay
/// null geometries.
pub fn object(topology: &Topology, geometry: &TopoGeometry) -> Result<Option<GeoGeometry>> {
    if matches!(geometry.kind, GeometryKind::Null) {
        return Ok(None);
    }
    ArcDecoder::new(topology).geometry(geometry).map(Some)
}

/// Decode a topology geometry into a Feature, or into a FeatureCollection
/// of its members when it is a GeometryCollection.
pub fn feature(topology: &Topology, geometry: &TopoGeometry) -> Result<GeoJson> {
    Ok(match &geometry.kind {
        GeometryKind::GeometryCollection(geometries) => GeoJson::FeatureCollection(FeatureCollection {
            bbox: None,
            features: geometries.iter().map(|g| to_feature(topology, g)).collect::<Result<_>>()?,
        }),
        _ => GeoJson::Feature(to_feature(topology, geometry)?),
    })
}

/// [`feature`] for the object named `name`.
pub fn feature_by_name(topology: &Topology, name: &str) -> Result<GeoJson> {
    let geometry = topology.object(name).ok_or_else(|| Error::UnknownObject(name.to_owned()))?;
    feature(topology, geometry)
}

fn to_feature(topology: &Topology, geometry: &TopoGeometry) -> Result<Feature> {
    Ok(Feature {
        id: geometry.id.clone(),
        bbox: geometry.bbox.clone(),
        properties: Some(geometry.properties.clone().unwrap_or_else(Map::new)),
        geometry: object(topology, geometry)?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::Transform;

    fn pts(coords: &[[f64; 2]]) -> Vec<Position> {
        coords.iter().copied().map(Position::from).collect()
    }

    fn topology() -> Topology {
        let mut t = Topology {
            arcs: vec![
                pts(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]),
                pts(&[[2.0, 0.0], [2.0, 1.0]]),
                pts(&[[2.0, 1.0], [0.0, 0.0]]),
            ],
            ..Default::default()
        };
        t.objects.insert("line", Geometry::new(GeometryKind::LineString(vec![0, 1]))).unwrap();
        let mut ring = Geometry::new(GeometryKind::Polygon(vec![vec![0, 1, 2]]));
        ring.id = Some(json!("tri"));
        t.objects.insert("ring", ring).unwrap();
        t.objects.insert("back", Geometry::new(GeometryKind::LineString(vec![!1, !0]))).unwrap();
        t.objects.insert("nothing", Geometry::null()).unwrap();
        t
    }

    #[test]
    fn line_shares_junction_points() {
        let t = topology();
        let g = object(&t, t.object("line").unwrap()).unwrap().unwrap();
        assert_eq!(g.kind, GeometryKind::LineString(pts(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [2.0, 1.0]])));
    }

    #[test]
    fn reversed_arcs_are_read_backwards() {
        let t = topology();
        let g = object(&t, t.object("back").unwrap()).unwrap().unwrap();
        assert_eq!(g.kind, GeometryKind::LineString(pts(&[[2.0, 1.0], [2.0, 0.0], [1.0, 0.0], [0.0, 0.0]])));
    }

    #[test]
    fn null_object_has_no_geometry() {
        let t = topology();
        assert_eq!(object(&t, t.object("nothing").unwrap()).unwrap(), None);
        let GeoJson::Feature(f) = feature_by_name(&t, "nothing").unwrap() else { panic!("expected a feature") };
        assert_eq!(f.geometry, None);
        assert_eq!(f.properties, Some(Map::new()));
    }

    #[test]
    fn feature_carries_id() {
        let t = topology();
        let GeoJson::Feature(f) = feature_by_name(&t, "ring").unwrap() else { panic!("expected a feature") };
        assert_eq!(f.id, Some(json!("tri")));
        assert_eq!(f.geometry.unwrap().kind, GeometryKind::Polygon(vec![
            pts(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 0.0]]),
        ]));
    }

    #[test]
    fn collection_becomes_feature_collection() {
        let mut t = topology();
        t.objects.insert("both", Geometry::new(GeometryKind::GeometryCollection(vec![
            Geometry::new(GeometryKind::LineString(vec![0])),
            Geometry::new(GeometryKind::Point(Position::new(9.0, 9.0))),
        ]))).unwrap();
        let GeoJson::FeatureCollection(fc) = feature_by_name(&t, "both").unwrap() else {
            panic!("expected a feature collection")
        };
        assert_eq!(fc.features.len(), 2);
        assert_eq!(fc.features[1].geometry.as_ref().unwrap().kind, GeometryKind::Point(Position::new(9.0, 9.0)));
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(matches!(feature_by_name(&topology(), "missing"), Err(Error::UnknownObject(_))));
    }

    #[test]
    fn short_rings_are_padded() {
        let mut t = Topology { arcs: vec![pts(&[[0.0, 0.0], [1.0, 1.0]])], ..Default::default() };
        t.objects.insert("sliver", Geometry::new(GeometryKind::Polygon(vec![vec![0]]))).unwrap();
        let g = object(&t, t.object("sliver").unwrap()).unwrap().unwrap();
        assert_eq!(g.kind, GeometryKind::Polygon(vec![pts(&[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0], [0.0, 0.0]])]));
    }

    #[test]
    fn transformed_arcs_are_decoded() {
        let mut t = Topology {
            transform: Some(Transform { scale: [0.5, 0.5], translate: [10.0, 20.0] }),
            arcs: vec![pts(&[[2.0, 2.0], [2.0, 0.0], [0.0, 2.0]])],
            ..Default::default()
        };
        t.objects.insert("l", Geometry::new(GeometryKind::LineString(vec![!0]))).unwrap();
        let g = object(&t, t.object("l").unwrap()).unwrap().unwrap();
        assert_eq!(g.kind, GeometryKind::LineString(pts(&[[12.0, 22.0], [12.0, 21.0], [11.0, 21.0]])));
    }

    #[test]
    fn bad_reference_is_an_error() {
        let mut t = topology();
        t.objects.insert("bad", Geometry::new(GeometryKind::LineString(vec![7]))).unwrap();
        assert!(matches!(object(&t, t.object("bad").unwrap()), Err(Error::ArcOutOfRange(7))));
    }
}
