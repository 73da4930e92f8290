use crate::types::{Position, Transform};

/// Maps grid positions back to coordinates: `p * scale + translate`.
///
/// With an index, positions are read as deltas accumulated along one arc;
/// index `0` (or none, for standalone points) starts a new arc. Without a
/// transform every position passes through unchanged.
#[derive(Clone, Debug)]
pub struct Transformer {
    transform: Option<Transform>,
    x0: f64,
    y0: f64,
}

impl Transformer {
    pub fn new(transform: Option<&Transform>) -> Self {
        Self { transform: transform.copied(), x0: 0.0, y0: 0.0 }
    }

    pub fn apply(&mut self, p: &Position, index: Option<usize>) -> Position {
        let Some(t) = self.transform else { return p.clone() };
        if !matches!(index, Some(i) if i > 0) {
            self.x0 = 0.0;
            self.y0 = 0.0;
        }
        self.x0 += p.x;
        self.y0 += p.y;
        p.with_xy(self.x0 * t.scale[0] + t.translate[0], self.y0 * t.scale[1] + t.translate[1])
    }
}

/// Inverse of [`Transformer`]: snaps coordinates to the nearest grid cell,
/// emitting deltas from the previous cell along an arc.
#[derive(Clone, Debug)]
pub struct Untransformer {
    transform: Option<Transform>,
    x0: f64,
    y0: f64,
}

impl Untransformer {
    pub fn new(transform: Option<&Transform>) -> Self {
        Self { transform: transform.copied(), x0: 0.0, y0: 0.0 }
    }

    pub fn apply(&mut self, p: &Position, index: Option<usize>) -> Position {
        let Some(t) = self.transform else { return p.clone() };
        if !matches!(index, Some(i) if i > 0) {
            self.x0 = 0.0;
            self.y0 = 0.0;
        }
        let x1 = ((p.x - t.translate[0]) / t.scale[0]).round_ties_even();
        let y1 = ((p.y - t.translate[1]) / t.scale[1]).round_ties_even();
        let output = p.with_xy(x1 - self.x0, y1 - self.y0);
        (self.x0, self.y0) = (x1, y1);
        output
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const T: Transform = Transform { scale: [0.5, 2.0], translate: [10.0, -1.0] };

    #[test]
    fn identity_without_transform() {
        let p = Position::new(0.25, 7.5);
        assert_eq!(Transformer::new(None).apply(&p, Some(3)), p);
        assert_eq!(Untransformer::new(None).apply(&p, None), p);
    }

    #[test]
    fn forward_accumulates_deltas_along_an_arc() {
        let mut t = Transformer::new(Some(&T));
        assert_eq!(t.apply(&Position::new(2.0, 1.0), Some(0)), Position::new(11.0, 1.0));
        assert_eq!(t.apply(&Position::new(2.0, 1.0), Some(1)), Position::new(12.0, 3.0));
        // A new arc, or a standalone point, starts from the origin again.
        assert_eq!(t.apply(&Position::new(2.0, 1.0), Some(0)), Position::new(11.0, 1.0));
        assert_eq!(t.apply(&Position::new(2.0, 1.0), None), Position::new(11.0, 1.0));
    }

    #[test]
    fn inverse_rounds_and_emits_deltas() {
        let mut u = Untransformer::new(Some(&T));
        assert_eq!(u.apply(&Position::new(11.1, 1.2), Some(0)), Position::new(2.0, 1.0));
        assert_eq!(u.apply(&Position::new(12.0, 3.0), Some(1)), Position::new(2.0, 1.0));
        assert_eq!(u.apply(&Position::new(12.0, 3.0), Some(2)), Position::new(0.0, 0.0));
        assert_eq!(u.apply(&Position::new(12.0, 3.0), None), Position::new(4.0, 2.0));
    }

    #[test]
    fn inverse_breaks_ties_to_even() {
        let t = Transform { scale: [2.0, 2.0], translate: [0.0, 0.0] };
        let mut u = Untransformer::new(Some(&t));
        assert_eq!(u.apply(&Position::new(1.0, 3.0), None), Position::new(0.0, 2.0));
        assert_eq!(u.apply(&Position::new(-1.0, -3.0), None), Position::new(0.0, -2.0));
    }

    #[test]
    fn round_trip_within_half_a_cell() {
        let mut u = Untransformer::new(Some(&T));
        let mut t = Transformer::new(Some(&T));
        let p = Position::new(13.37, 42.1);
        let back = t.apply(&u.apply(&p, None), None);
        assert_relative_eq!(back.x, p.x, epsilon = T.scale[0] / 2.0);
        assert_relative_eq!(back.y, p.y, epsilon = T.scale[1] / 2.0);
    }

    #[test]
    fn trailing_dimensions_survive() {
        let mut p = Position::new(2.0, 1.0);
        p.extra.push(serde_json::json!("z"));
        let out = Transformer::new(Some(&T)).apply(&p, None);
        assert_eq!(out.extra, vec![serde_json::json!("z")]);
    }
}
