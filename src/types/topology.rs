use serde::{Deserialize, Serialize};

use crate::types::{Geometry, Objects, Position};

/// A signed reference into [`Topology::arcs`]: `i >= 0` is `arcs[i]` read
/// forward, `i < 0` is `arcs[!i]` read backward.
pub type ArcIndex = i64;

/// `[x0, y0, x1, y1]`.
pub type BBox = [f64; 4];

/// A geometry whose lines and rings are lists of signed arc references.
pub type TopoGeometry = Geometry<Vec<ArcIndex>>;

/// The arc number a signed reference points at.
#[inline]
pub fn arc_id(i: ArcIndex) -> usize {
    (if i < 0 { !i } else { i }) as usize
}

/// Affine grid transform: `point = grid * scale + translate`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

/// A topology: geometries that share arcs instead of holding coordinates.
///
/// When `transform` is present every arc is delta-encoded (first position
/// absolute, the rest differences from their predecessor) on the integer
/// grid the transform describes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Topology {
    pub bbox: Option<BBox>,
    pub transform: Option<Transform>,
    pub objects: Objects<TopoGeometry>,
    pub arcs: Vec<Vec<Position>>,
}

impl Topology {
    /// Look up a named object.
    pub fn object(&self, name: &str) -> Option<&TopoGeometry> {
        self.objects.get(name)
    }

    /// The arc a signed reference points at, if it exists.
    pub fn arc(&self, i: ArcIndex) -> Option<&[Position]> {
        self.arcs.get(arc_id(i)).map(Vec::as_slice)
    }
}
