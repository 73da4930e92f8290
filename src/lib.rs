#![doc = "topokit: shared-arc topologies from GeoJSON-like geometry, and back"]
mod build;
mod reconstruct;
mod types;

pub mod convert;
pub mod error;
pub mod hash;
pub mod io;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use types::{
    arc_id, ArcIndex, BBox, Feature, FeatureCollection, GeoGeometry, GeoJson, Geometry,
    GeometryKind, Objects, Part, Position, TopoGeometry, Topology, Transform,
};

#[doc(inline)]
pub use build::{bounds, normalize, topology};

#[doc(inline)]
pub use reconstruct::{
    bbox, feature, feature_by_name, merge, merge_arcs, mesh, mesh_arcs, neighbors, object,
    quantize, stitch, MeshFilter, QuantizeSpec, Transformer, Untransformer,
};
