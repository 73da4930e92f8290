use geo::Coord;

use crate::hash::KeyHasher;

/// Hash a coordinate from the bit patterns of its components.
///
/// Each component's IEEE-754 bits are split into two 32-bit words which are
/// XORed together; the two components are then mixed with a shift pair on
/// signed 32-bit integers (wrapping left shift, arithmetic right shift).
/// Only slot placement depends on this value; arc numbering follows input
/// order, so writers that hash differently still produce the same arcs.
pub fn hash_point(c: &Coord<f64>) -> u32 {
    let (x_hi, x_lo) = words(c.x);
    let (y_hi, y_lo) = words(c.y);
    let mut h = (x_hi ^ x_lo) as i32;
    h = h.wrapping_shl(5) ^ (h >> 7) ^ y_hi as i32 ^ y_lo as i32;
    (h & 0x7fff_ffff) as u32
}

#[inline]
fn words(v: f64) -> (u32, u32) {
    let bits = v.to_bits();
    ((bits >> 32) as u32, bits as u32)
}

/// Exact numeric equality of both components.
#[inline]
pub fn equal_point(a: &Coord<f64>, b: &Coord<f64>) -> bool {
    a.x == b.x && a.y == b.y
}

/// [`KeyHasher`] over coordinate values.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointHasher;

impl KeyHasher<Coord<f64>> for PointHasher {
    #[inline]
    fn hash(&self, key: &Coord<f64>) -> u32 { hash_point(key) }

    #[inline]
    fn equal(&self, a: &Coord<f64>, b: &Coord<f64>) -> bool { equal_point(a, b) }
}
