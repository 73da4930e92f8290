//! Consumers of a finished topology: decoding back to coordinates, arc
//! stitching, meshes, dissolves, adjacency and standalone quantization.

mod bbox;
mod feature;
mod merge;
mod mesh;
mod neighbors;
mod quantize;
mod stitch;
mod transform;

pub use bbox::bbox;
pub(crate) use feature::ArcDecoder;
pub use feature::{feature, feature_by_name, object};
pub use merge::{merge, merge_arcs};
pub use mesh::{mesh, mesh_arcs, MeshFilter};
pub use neighbors::neighbors;
pub use quantize::{quantize, QuantizeSpec};
pub use stitch::stitch;
pub use transform::{Transformer, Untransformer};
