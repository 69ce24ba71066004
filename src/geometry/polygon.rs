use crate::math::polygon_2d::{point_in_convex_polygon, rotate_to_canonical_start, signed_area_2d};
use crate::math::Point2;

use super::LineSegment;

/// A closed polygon given by its vertices in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<Point2>,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Returns the vertices.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the polygon has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area; positive for counter-clockwise vertex order.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    /// Returns `true` if `p` is inside a convex counter-clockwise polygon.
    #[must_use]
    pub fn contains_convex(&self, p: &Point2) -> bool {
        point_in_convex_polygon(p, &self.points)
    }

    /// The same polygon rotated to start at its lowest-x, lowest-y vertex.
    #[must_use]
    pub fn canonical(&self) -> Self {
        Self::new(rotate_to_canonical_start(&self.points))
    }

    /// Boundary edges, closing back to the first vertex.
    #[must_use]
    pub fn edges(&self) -> Vec<LineSegment> {
        let n = self.points.len();
        if n < 2 {
            return Vec::new();
        }
        (0..n)
            .map(|i| LineSegment::new(self.points[i], self.points[(i + 1) % n]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn square_properties() {
        let square = Polygon::new(vec![
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
        ]);
        assert_abs_diff_eq!(square.signed_area(), 1.0, epsilon = 1e-12);
        assert_eq!(square.edges().len(), 4);
        assert_eq!(square.canonical().points()[0], Point2::new(0.0, 0.0));
        assert!(square.contains_convex(&Point2::new(0.5, 0.5)));
    }
}
