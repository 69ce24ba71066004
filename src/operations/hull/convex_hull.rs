use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::math::{compare_points, compare_with_tolerance, orientation, points_equal, Point2};

/// Computes the convex hull of a planar point set (Andrew's monotone chain).
///
/// The hull is returned counter-clockwise, starting at the lowest-x (then
/// lowest-y) point. Collinear boundary points and duplicates are dropped, so
/// a collinear input yields its two extreme points.
pub struct ConvexHull2D<'a> {
    points: &'a [Point2],
}

impl<'a> ConvexHull2D<'a> {
    /// Creates a new `ConvexHull2D` operation.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self { points }
    }

    /// Executes the operation, returning the hull vertices.
    #[must_use]
    #[instrument(skip(self), fields(points = self.points.len()))]
    pub fn execute(&self) -> Vec<Point2> {
        let mut sorted = self.points.to_vec();
        sorted.sort_by(compare_points);
        sorted.dedup_by(|a, b| points_equal(a, b));
        if sorted.len() < 3 {
            return sorted;
        }

        let turns_left = |a: &Point2, b: &Point2, c: &Point2| {
            compare_with_tolerance(orientation(a, b, c), 0.0) == Ordering::Greater
        };

        let mut hull: Vec<Point2> = Vec::with_capacity(2 * sorted.len());
        for p in &sorted {
            while hull.len() > 1 && !turns_left(&hull[hull.len() - 2], &hull[hull.len() - 1], p) {
                hull.pop();
            }
            hull.push(*p);
        }
        hull.pop();
        let lower_len = hull.len() + 1;
        for p in sorted.iter().rev() {
            while hull.len() > lower_len
                && !turns_left(&hull[hull.len() - 2], &hull[hull.len() - 1], p)
            {
                hull.pop();
            }
            hull.push(*p);
        }
        hull.pop();
        debug!(hull = hull.len(), "convex hull built");
        hull
    }
}
