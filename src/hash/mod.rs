//! Open-addressing hash tables with caller-supplied hashing.
//!
//! The build pipeline keys tables on coordinate values, on buffer indices
//! compared by the coordinate they point at, and on unordered index pairs.
//! All three go through the same fixed-size linear-probing table.

mod point;
mod table;

pub use point::{equal_point, hash_point, PointHasher};
pub use table::{load_hint, table_size, KeyHasher, OpenHashMap, OpenHashSet};
