use crate::error::{GeometryError, Result};
use crate::math::{compare_with_tolerance, orientation, Point2};
use std::cmp::Ordering;

/// A full circle in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point2,
    radius: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// A zero radius is accepted; it stands for the circle enclosing a
    /// single point.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is negative or not finite.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "radius",
                value: radius,
                min: 0.0,
                max: f64::MAX,
            }
            .into());
        }
        Ok(Self { center, radius })
    }

    /// Circle having the segment `a -> b` as a diameter.
    #[must_use]
    pub fn with_diameter(a: &Point2, b: &Point2) -> Self {
        Self {
            center: nalgebra::center(a, b),
            radius: (b - a).norm() / 2.0,
        }
    }

    /// Zero-radius circle at `p`.
    #[must_use]
    pub fn point(p: Point2) -> Self {
        Self {
            center: p,
            radius: 0.0,
        }
    }

    /// Circumcircle of three points, or `None` if they are collinear.
    #[must_use]
    pub fn through_three_points(a: &Point2, b: &Point2, c: &Point2) -> Option<Self> {
        if compare_with_tolerance(orientation(a, b, c), 0.0) == Ordering::Equal {
            return None;
        }
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        let a2 = a.coords.norm_squared();
        let b2 = b.coords.norm_squared();
        let c2 = c.coords.norm_squared();
        let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
        let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
        let center = Point2::new(ux, uy);
        Some(Self {
            center,
            radius: (a - center).norm(),
        })
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Lowest point of the circle (minimum y).
    #[must_use]
    pub fn bottom(&self) -> Point2 {
        Point2::new(self.center.x, self.center.y - self.radius)
    }

    /// Returns `true` if `p` lies inside or on the circle, within tolerance.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        compare_with_tolerance((p - self.center).norm(), self.radius) != Ordering::Greater
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn circumcircle_of_right_triangle() {
        let c = Circle::through_three_points(
            &Point2::new(0.0, 0.0),
            &Point2::new(4.0, 0.0),
            &Point2::new(0.0, 3.0),
        )
        .unwrap();
        assert_abs_diff_eq!(c.center().x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.center().y, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(c.radius(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn collinear_points_have_no_circumcircle() {
        assert!(Circle::through_three_points(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 1.0),
            &Point2::new(2.0, 2.0),
        )
        .is_none());
    }

    #[test]
    fn negative_radius_rejected() {
        assert!(Circle::new(Point2::origin(), -1.0).is_err());
        assert!(Circle::new(Point2::origin(), 0.0).is_ok());
    }

    #[test]
    fn containment_and_bottom() {
        let c = Circle::with_diameter(&Point2::new(0.0, 0.0), &Point2::new(0.0, 10.0));
        assert!(c.contains(&Point2::new(5.0, 5.0)));
        assert!(!c.contains(&Point2::new(5.1, 5.0)));
        assert_abs_diff_eq!(c.bottom().y, 0.0);
    }
}
