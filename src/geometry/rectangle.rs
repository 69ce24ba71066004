use crate::error::{GeometryError, Result};
use crate::math::arc_2d::angle_to_arc_param;
use crate::math::intersect_2d::{line_circle_intersect_2d, line_line_intersect_2d};
use crate::math::{angle_of, Point2, TOLERANCE};
use crate::operations::hull::ConvexHull2D;

use super::{Arc, Circle, Curve, HalfPlane, LineSegment, PathElement, Polygon};

const PARAM_EPS: f64 = 1e-9;

/// An axis-aligned rectangle used as a viewport for cropping output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    min: Point2,
    max: Point2,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            min: Point2::new(0.0, 0.0),
            max: Point2::new(1000.0, 1000.0),
        }
    }
}

impl Rectangle {
    /// Creates a rectangle from its lower-left corner and size.
    ///
    /// # Errors
    ///
    /// Returns an error if the width or height is negative or not finite.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        for (parameter, value) in [("width", width), ("height", height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(GeometryError::ParameterOutOfRange {
                    parameter,
                    value,
                    min: 0.0,
                    max: f64::MAX,
                }
                .into());
            }
        }
        Ok(Self {
            min: Point2::new(x, y),
            max: Point2::new(x + width, y + height),
        })
    }

    /// Lower-left corner.
    #[must_use]
    pub fn min(&self) -> &Point2 {
        &self.min
    }

    /// Upper-right corner.
    #[must_use]
    pub fn max(&self) -> &Point2 {
        &self.max
    }

    /// Corners in counter-clockwise order starting at the lower-left.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// Boundary edges in counter-clockwise order.
    #[must_use]
    pub fn edges(&self) -> [LineSegment; 4] {
        let c = self.corners();
        [
            LineSegment::new(c[0], c[1]),
            LineSegment::new(c[1], c[2]),
            LineSegment::new(c[2], c[3]),
            LineSegment::new(c[3], c[0]),
        ]
    }

    /// Returns `true` if `p` lies inside or on the boundary, within tolerance.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x - TOLERANCE
            && p.x <= self.max.x + TOLERANCE
            && p.y >= self.min.y - TOLERANCE
            && p.y <= self.max.y + TOLERANCE
    }

    /// Crops any path element, returning the visible pieces.
    ///
    /// Béziers are not split: one is kept only when all control points are
    /// inside.
    #[must_use]
    pub fn crop(&self, element: &PathElement) -> Vec<PathElement> {
        match element {
            PathElement::Segment(s) => self.crop_segment(s).into_iter().map(Into::into).collect(),
            PathElement::Arc(a) => self.crop_arc(a).into_iter().map(Into::into).collect(),
            PathElement::Circle(c) => self.crop_circle(c),
            PathElement::Polygon(p) => self.crop_polygon(p).into_iter().map(Into::into).collect(),
            PathElement::Bezier(b) => {
                if [b.p0, b.c1, b.c2, b.p3].iter().all(|p| self.contains(p)) {
                    vec![element.clone()]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Liang-Barsky clipping of a segment.
    ///
    /// Pieces shorter than the tolerance are dropped.
    #[must_use]
    pub fn crop_segment(&self, segment: &LineSegment) -> Option<LineSegment> {
        let d = segment.end - segment.start;
        let s = segment.start;
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        let checks = [
            (-d.x, s.x - self.min.x),
            (d.x, self.max.x - s.x),
            (-d.y, s.y - self.min.y),
            (d.y, self.max.y - s.y),
        ];
        for (p, q) in checks {
            if p.abs() < f64::EPSILON {
                if q < -TOLERANCE {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
        let cropped = LineSegment::new(s + d * t0, s + d * t1);
        if cropped.length() < TOLERANCE {
            None
        } else {
            Some(cropped)
        }
    }

    /// Crops a circle into the arcs lying inside the rectangle.
    ///
    /// A circle that never crosses the boundary is kept whole when inside.
    #[must_use]
    pub fn crop_circle(&self, circle: &Circle) -> Vec<PathElement> {
        let angles = self.boundary_angles(circle.center(), circle.radius());
        if angles.len() < 2 {
            let sample = angles.first().map_or(0.0, |a| a + std::f64::consts::PI);
            let p = Point2::new(
                circle.center().x + circle.radius() * sample.cos(),
                circle.center().y + circle.radius() * sample.sin(),
            );
            return if self.contains(&p) {
                vec![PathElement::Circle(*circle)]
            } else {
                Vec::new()
            };
        }
        let n = angles.len();
        (0..n)
            .filter_map(|i| {
                let a0 = angles[i];
                let mut a1 = angles[(i + 1) % n];
                if a1 <= a0 {
                    a1 += std::f64::consts::TAU;
                }
                let mid = (a0 + a1) / 2.0;
                let p = Point2::new(
                    circle.center().x + circle.radius() * mid.cos(),
                    circle.center().y + circle.radius() * mid.sin(),
                );
                if self.contains(&p) {
                    Arc::new(*circle.center(), circle.radius(), a0, a1 - a0)
                        .ok()
                        .map(PathElement::Arc)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Crops an arc into its visible sub-arcs.
    #[must_use]
    pub fn crop_arc(&self, arc: &Arc) -> Vec<Arc> {
        let mut params = vec![0.0, 1.0];
        params.extend(
            self.boundary_angles(arc.center(), arc.radius())
                .into_iter()
                .filter_map(|a| angle_to_arc_param(a, arc.start_angle(), arc.sweep())),
        );
        params.sort_by(f64::total_cmp);
        params.dedup_by(|a, b| (*a - *b).abs() < PARAM_EPS);
        params
            .windows(2)
            .filter(|w| self.contains(&arc.point_at((w[0] + w[1]) / 2.0)))
            .filter_map(|w| arc.sub_arc(w[0], w[1]).ok())
            .collect()
    }

    /// Sutherland-Hodgman clipping of a polygon.
    #[must_use]
    pub fn crop_polygon(&self, polygon: &Polygon) -> Option<Polygon> {
        let mut points = polygon.points().to_vec();
        for edge in self.edges() {
            if points.is_empty() {
                break;
            }
            let inside = |p: &Point2| (edge.end - edge.start).perp(&(p - edge.start)) >= -TOLERANCE;
            let input = std::mem::take(&mut points);
            let n = input.len();
            for i in 0..n {
                let cur = input[i];
                let prev = input[(i + n - 1) % n];
                let cur_in = inside(&cur);
                let prev_in = inside(&prev);
                if cur_in != prev_in {
                    if let Some((t, _)) = line_line_intersect_2d(
                        &prev,
                        &(cur - prev),
                        &edge.start,
                        &(edge.end - edge.start),
                    ) {
                        points.push(prev + (cur - prev) * t);
                    }
                }
                if cur_in {
                    points.push(cur);
                }
            }
        }
        if points.len() < 3 {
            None
        } else {
            Some(Polygon::new(points))
        }
    }

    /// The part of a half-plane inside the rectangle, as a convex polygon.
    #[must_use]
    pub fn crop_half_plane(&self, half_plane: &HalfPlane) -> Option<Polygon> {
        let line = half_plane.boundary();
        let mut candidates: Vec<Point2> = self
            .corners()
            .into_iter()
            .filter(|c| half_plane.contains(c))
            .collect();
        for edge in self.edges() {
            if let Some((t, u)) = line_line_intersect_2d(
                &edge.start,
                &(edge.end - edge.start),
                line.point(),
                line.direction(),
            ) {
                if (-PARAM_EPS..=1.0 + PARAM_EPS).contains(&t) {
                    candidates.push(line.point_at(u));
                }
            }
        }
        let hull = ConvexHull2D::new(&candidates).execute();
        if hull.len() < 3 {
            None
        } else {
            Some(Polygon::new(hull))
        }
    }

    /// Angles (sorted, deduplicated) where a circle meets the boundary.
    fn boundary_angles(&self, center: &Point2, radius: f64) -> Vec<f64> {
        let mut angles: Vec<f64> = self
            .edges()
            .iter()
            .flat_map(|edge| {
                let dir = edge.end - edge.start;
                line_circle_intersect_2d(&edge.start, &dir, center, radius)
                    .into_iter()
                    .filter(|t| (-PARAM_EPS..=1.0 + PARAM_EPS).contains(t))
                    .map(move |t| angle_of(&(edge.start + dir * t - center)))
                    .collect::<Vec<_>>()
            })
            .collect();
        angles.sort_by(f64::total_cmp);
        angles.dedup_by(|a, b| (*a - *b).abs() < PARAM_EPS);
        angles
    }
}
