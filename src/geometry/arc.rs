use crate::error::{GeometryError, Result};
use crate::math::arc_2d::{angle_in_sweep, arc_point_at, arc_to_cubic_pieces, normalize_angle};
use crate::math::{angle_of, Point2, TOLERANCE};

use super::{Bezier, Curve};

/// A circular arc in the plane.
///
/// Defined by a center, radius, start angle and signed sweep (in radians).
/// A positive sweep runs counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    center: Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or the sweep is zero
    /// or exceeds a full turn.
    pub fn new(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Result<Self> {
        if radius < TOLERANCE || !radius.is_finite() {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if sweep.abs() < f64::EPSILON || sweep.abs() > std::f64::consts::TAU + f64::EPSILON {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "sweep",
                value: sweep,
                min: -std::f64::consts::TAU,
                max: std::f64::consts::TAU,
            }
            .into());
        }
        Ok(Self {
            center,
            radius,
            start_angle: normalize_angle(start_angle),
            sweep,
        })
    }

    /// The counter-clockwise arc of the circle `(center, radius)` running
    /// from the direction of `from` to the direction of `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is degenerate or both directions coincide.
    pub fn ccw_between(center: Point2, radius: f64, from: &Point2, to: &Point2) -> Result<Self> {
        let a0 = angle_of(&(from - center));
        let a1 = angle_of(&(to - center));
        let mut sweep = a1 - a0;
        while sweep <= 0.0 {
            sweep += std::f64::consts::TAU;
        }
        Self::new(center, radius, a0, sweep)
    }

    /// The shorter arc of the circle `(center, radius)` between the
    /// directions of `from` and `to`, oriented counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is degenerate or both directions coincide.
    pub fn minor_between(center: Point2, radius: f64, from: &Point2, to: &Point2) -> Result<Self> {
        let ccw = Self::ccw_between(center, radius, from, to)?;
        if ccw.sweep <= std::f64::consts::PI {
            Ok(ccw)
        } else {
            Self::ccw_between(center, radius, to, from)
        }
    }

    /// Returns the center.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the start angle in `(-pi, pi]`.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the signed sweep.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Returns `true` if the direction `angle` falls on the arc.
    #[must_use]
    pub fn contains_angle(&self, angle: f64) -> bool {
        angle_in_sweep(angle, self.start_angle, self.sweep)
    }

    /// Sub-arc between parameters `t0 < t1` in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sub-range is empty.
    pub fn sub_arc(&self, t0: f64, t1: f64) -> Result<Self> {
        Self::new(
            self.center,
            self.radius,
            self.start_angle + self.sweep * t0,
            self.sweep * (t1 - t0),
        )
    }

    /// Cubic Bézier approximation, one piece per quarter turn at most.
    #[must_use]
    pub fn to_beziers(&self) -> Vec<Bezier> {
        arc_to_cubic_pieces(&self.center, self.radius, self.start_angle, self.sweep)
            .into_iter()
            .map(|[p0, c1, c2, p3]| Bezier::new(p0, c1, c2, p3))
            .collect()
    }
}

impl Curve for Arc {
    fn point_at(&self, t: f64) -> Point2 {
        arc_point_at(&self.center, self.radius, self.start_angle, self.sweep, t)
    }

    fn is_closed(&self) -> bool {
        (self.sweep.abs() - std::f64::consts::TAU).abs() < f64::EPSILON
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn minor_arc_picks_short_side() {
        let c = Point2::origin();
        let arc = Arc::minor_between(c, 1.0, &Point2::new(0.0, 1.0), &Point2::new(1.0, 0.0))
            .unwrap();
        assert_abs_diff_eq!(arc.sweep(), FRAC_PI_2, epsilon = 1e-12);
        let start = arc.start_point();
        assert_abs_diff_eq!(start.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arc.end_point().y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn ccw_arc_can_exceed_half_turn() {
        let c = Point2::origin();
        let arc =
            Arc::ccw_between(c, 1.0, &Point2::new(0.0, 1.0), &Point2::new(1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(arc.sweep(), 1.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_arcs_rejected() {
        assert!(Arc::new(Point2::origin(), 0.0, 0.0, 1.0).is_err());
        assert!(Arc::new(Point2::origin(), 1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn sub_arc_and_beziers() {
        let arc = Arc::new(Point2::origin(), 2.0, 0.0, PI).unwrap();
        let half = arc.sub_arc(0.5, 1.0).unwrap();
        assert_abs_diff_eq!(half.start_point().y, 2.0, epsilon = 1e-12);
        let pieces = arc.to_beziers();
        assert_eq!(pieces.len(), 2);
        assert_abs_diff_eq!(pieces[1].p3.x, -2.0, epsilon = 1e-9);
    }
}
