use crate::error::{GeometryError, Result};
use crate::math::distance_2d::{point_to_segment_dist, segment_projection_param};
use crate::math::intersect_2d::{line_line_intersect_2d, segment_segment_intersect_2d};
use crate::math::{normalized, perp_ccw, points_equal, Point2, Vector2};

/// An infinite line defined by a point and a unit direction.
///
/// The parametric form is: `P(t) = point + t * direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    point: Point2,
    direction: Vector2,
}

impl Line {
    /// Creates a new line from a point and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(point: Point2, direction: Vector2) -> Result<Self> {
        let direction = normalized(&direction).ok_or(GeometryError::ZeroVector)?;
        Ok(Self { point, direction })
    }

    /// Creates the line through two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn through(a: Point2, b: Point2) -> Result<Self> {
        Self::new(a, b - a)
    }

    /// Perpendicular bisector of `a` and `b`, directed with `b` on its right.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn bisector(a: Point2, b: Point2) -> Result<Self> {
        Self::new(nalgebra::center(&a, &b), crate::math::perp_cw(&(b - a)))
    }

    /// Returns a point on the line.
    #[must_use]
    pub fn point(&self) -> &Point2 {
        &self.point
    }

    /// Returns the unit direction of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    /// Evaluates the line at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.point + self.direction * t
    }

    /// Signed distance of `p`; positive on the left of the direction.
    #[must_use]
    pub fn signed_distance(&self, p: &Point2) -> f64 {
        (p - self.point).dot(&perp_ccw(&self.direction))
    }

    /// Intersection point with another line, if not parallel.
    #[must_use]
    pub fn intersect(&self, other: &Line) -> Option<Point2> {
        line_line_intersect_2d(&self.point, &self.direction, &other.point, &other.direction)
            .map(|(t, _)| self.point_at(t))
    }
}

/// A bounded line segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Start point.
    pub start: Point2,
    /// End point.
    pub end: Point2,
}

impl LineSegment {
    /// Creates a new segment.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Returns `true` if both endpoints coincide within tolerance.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        points_equal(&self.start, &self.end)
    }

    /// Midpoint of the segment.
    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.start, &self.end)
    }

    /// The same segment traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Minimum distance from `p` to the segment.
    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        point_to_segment_dist(p, &self.start, &self.end)
    }

    /// Parameter in `[0, 1]` of the point closest to `p`.
    #[must_use]
    pub fn project(&self, p: &Point2) -> f64 {
        segment_projection_param(p, &self.start, &self.end)
    }

    /// Intersection point with another segment.
    #[must_use]
    pub fn intersect(&self, other: &LineSegment) -> Option<Point2> {
        segment_segment_intersect_2d(&self.start, &self.end, &other.start, &other.end)
            .map(|(p, _, _)| p)
    }

    /// Returns `true` if both segments connect the same endpoints in either direction.
    #[must_use]
    pub fn same_undirected(&self, other: &LineSegment) -> bool {
        (points_equal(&self.start, &other.start) && points_equal(&self.end, &other.end))
            || (points_equal(&self.start, &other.end) && points_equal(&self.end, &other.start))
    }
}
