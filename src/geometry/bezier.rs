use crate::math::Point2;

use super::Curve;

/// A cubic Bézier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bezier {
    /// Start point.
    pub p0: Point2,
    /// First control point.
    pub c1: Point2,
    /// Second control point.
    pub c2: Point2,
    /// End point.
    pub p3: Point2,
}

impl Bezier {
    /// Creates a new cubic segment.
    #[must_use]
    pub fn new(p0: Point2, c1: Point2, c2: Point2, p3: Point2) -> Self {
        Self { p0, c1, c2, p3 }
    }
}

impl Curve for Bezier {
    fn point_at(&self, t: f64) -> Point2 {
        let s = 1.0 - t;
        let coords = self.p0.coords * (s * s * s)
            + self.c1.coords * (3.0 * s * s * t)
            + self.c2.coords * (3.0 * s * t * t)
            + self.p3.coords * (t * t * t);
        Point2::from(coords)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn endpoints_and_midpoint() {
        let b = Bezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        );
        assert_eq!(b.start_point(), Point2::new(0.0, 0.0));
        assert_eq!(b.end_point(), Point2::new(1.0, 0.0));
        let mid = b.point_at(0.5);
        assert_abs_diff_eq!(mid.x, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(mid.y, 0.75, epsilon = 1e-12);
    }
}
