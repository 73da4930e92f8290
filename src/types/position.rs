use std::fmt;

use geo::Coord;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A coordinate: `x`, `y` and any trailing dimensions, kept verbatim.
///
/// Hashing and equality inside the build pipeline only look at `x` and `y`
/// (see [`Position::coord`]); `extra` rides along untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub extra: Vec<Value>,
}

impl Position {
    /// A two-dimensional position.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, extra: Vec::new() }
    }

    /// The planar part of this position, used as a hash-table key.
    #[inline]
    pub fn coord(&self) -> Coord<f64> {
        Coord { x: self.x, y: self.y }
    }

    /// Same position with `x` and `y` replaced, trailing dimensions kept.
    #[inline]
    pub fn with_xy(&self, x: f64, y: f64) -> Self {
        Self { x, y, extra: self.extra.clone() }
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coord<f64>> for Position {
    fn from(c: Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}

/// JSON number for `v`, written as an integer when it is one.
///
/// Quantized arcs are integers on the grid; emitting them as `12` rather
/// than `12.0` keeps the output identical to other TopoJSON writers.
pub(crate) fn number(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER {
        Value::from(v as i64)
    } else {
        Value::from(v)
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2 + self.extra.len()))?;
        seq.serialize_element(&number(self.x))?;
        seq.serialize_element(&number(self.y))?;
        for value in &self.extra {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PositionVisitor;

        impl<'de> Visitor<'de> for PositionVisitor {
            type Value = Position;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an array of at least two numbers")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Position, A::Error> {
                let x: f64 = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let y: f64 = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let mut extra = Vec::new();
                while let Some(value) = seq.next_element::<Value>()? {
                    extra.push(value);
                }
                Ok(Position { x, y, extra })
            }
        }

        deserializer.deserialize_seq(PositionVisitor)
    }
}
