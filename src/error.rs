//! Error types for topology construction and reconstruction.

use crate::types::ArcIndex;

/// Result type alias for topokit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the build pipeline, the standalone quantizer and the
/// reconstruction consumers. None of them leave partial output behind.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An open-addressing table was sized too small for its entries.
    #[error("hash table full: all {capacity} slots probed")]
    HashTableFull { capacity: usize },

    /// The topology passed to `quantize` already carries a transform.
    #[error("topology is already quantized")]
    AlreadyQuantized,

    /// Quantization resolution below 2, or not a finite number.
    #[error("quantization must be a finite number >= 2, got {0}")]
    InvalidResolution(f64),

    /// A named object was inserted twice into the same collection.
    #[error("object {0:?} is not unique")]
    DuplicateObjectName(String),

    /// A topology has no object with the requested name.
    #[error("object {0:?} not found")]
    UnknownObject(String),

    /// A signed arc reference points past the end of the arc list.
    #[error("arc reference {0} is out of range")]
    ArcOutOfRange(ArcIndex),

    /// A geometry refers to a coordinate range the indexing pass never saw.
    #[error("range [{start}, {end}] was never indexed as an arc")]
    UnindexedArc { start: usize, end: usize },

    /// A line or ring has fewer than two positions.
    #[error("{0} has fewer than two positions")]
    DegenerateLine(&'static str),

    #[error("invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("invalid TopoJSON: {0}")]
    InvalidTopoJson(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
