use crate::build::{Extraction, RangeId};
use crate::error::{Error, Result};
use crate::types::{GeoGeometry, Geometry, Objects, Part, Position};

/// Copy every line and ring of `objects` into one coordinate buffer.
///
/// Each line or ring is replaced by the id of the range it occupies; ranges
/// are recorded in `lines`/`rings` in visit order (objects in insertion
/// order, nested geometries depth-first), which later fixes arc numbering.
/// Points stay inline.
pub(crate) fn extract(objects: Objects<GeoGeometry>) -> Result<(Extraction, Objects<Geometry<RangeId>>)> {
    let mut extraction = Extraction::default();
    let objects = objects.try_map(|geometry| {
        geometry.try_map_lines(&mut |line, part| extraction.extract_line(line, part))
    })?;
    Ok((extraction, objects))
}

impl Extraction {
    fn extract_line(&mut self, line: Vec<Position>, part: Part) -> Result<RangeId> {
        if line.len() < 2 {
            return Err(Error::DegenerateLine(match part {
                Part::Line => "line",
                Part::Ring => "ring",
            }));
        }
        let start = self.coordinates.len();
        self.coordinates.extend(line);
        let id = self.push_range(start, self.coordinates.len() - 1);
        match part {
            Part::Line => self.lines.push(id),
            Part::Ring => self.rings.push(id),
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::Range;
    use crate::types::GeometryKind;

    fn pts(coords: &[[f64; 2]]) -> Vec<Position> {
        coords.iter().copied().map(Position::from).collect()
    }

    #[test]
    fn ranges_follow_visit_order() {
        let mut objects = Objects::new();
        objects.insert("line", Geometry::new(GeometryKind::LineString(pts(&[[0.0, 0.0], [1.0, 0.0]])))).unwrap();
        objects.insert("polygon", Geometry::new(GeometryKind::Polygon(vec![
            pts(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]),
        ]))).unwrap();
        objects.insert("point", Geometry::new(GeometryKind::Point(Position::new(5.0, 5.0)))).unwrap();
        objects.insert("multi", Geometry::new(GeometryKind::MultiLineString(vec![
            pts(&[[2.0, 2.0], [3.0, 3.0], [4.0, 4.0]]),
        ]))).unwrap();

        let (extraction, objects) = extract(objects).unwrap();
        assert_eq!(extraction.coordinates.len(), 9);
        assert_eq!(extraction.ranges, vec![
            Range { start: 0, end: 1, next: None },
            Range { start: 2, end: 5, next: None },
            Range { start: 6, end: 8, next: None },
        ]);
        assert_eq!(extraction.lines, vec![0, 2]);
        assert_eq!(extraction.rings, vec![1]);

        let kinds: Vec<_> = objects.iter().map(|(_, g)| g.kind.clone()).collect();
        assert_eq!(kinds, vec![
            GeometryKind::LineString(0),
            GeometryKind::Polygon(vec![1]),
            GeometryKind::Point(Position::new(5.0, 5.0)),
            GeometryKind::MultiLineString(vec![2]),
        ]);
    }

    #[test]
    fn single_point_line_is_rejected() {
        let mut objects = Objects::new();
        objects.insert("bad", Geometry::new(GeometryKind::LineString(pts(&[[0.0, 0.0]])))).unwrap();
        assert!(matches!(extract(objects), Err(Error::DegenerateLine("line"))));
    }
}
