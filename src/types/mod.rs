mod geojson;
mod geometry;
mod objects;
mod position;
mod topology;

pub use geojson::{Feature, FeatureCollection, GeoGeometry, GeoJson};
pub use geometry::{Geometry, GeometryKind, Part};
pub use objects::Objects;
pub use position::Position;
pub(crate) use position::number;
pub use topology::{arc_id, ArcIndex, BBox, TopoGeometry, Topology, Transform};
