//! Skyum's construction of the farthest-point Voronoi diagram.
//!
//! Hull points are peeled off one at a time, always removing the point
//! whose triangle with its two ring neighbours has the largest
//! circumcircle. The first triangle removed whose middle angle is at most
//! a right angle also fixes the smallest enclosing circle.

use std::cmp::Ordering;
use std::f64::consts::FRAC_PI_2;

use tracing::{debug, instrument, trace};

use crate::error::{DiagramError, Result};
use crate::geometry::{Circle, Triangle};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{compare_with_tolerance, normalized, perp_ccw, Point2, INFINITY};
use crate::topology::{Dcel, HalfEdgeId};
use crate::tree::Tree;

/// Output of a [`Skyum`] run.
#[derive(Debug, Clone, Default)]
pub struct FarthestPointDiagram {
    /// The farthest-point Voronoi diagram; one face per hull point.
    pub diagram: Dcel,
    /// Smallest circle enclosing every hull point, `None` for no points.
    pub smallest_enclosing_circle: Option<Circle>,
}

/// Builds the farthest-point Voronoi diagram of convex-hull points.
///
/// The points are expected in hull order; clockwise input is reversed
/// first.
pub struct Skyum<'a> {
    hull: &'a [Point2],
}

impl<'a> Skyum<'a> {
    /// Creates a new `Skyum` operation.
    #[must_use]
    pub fn new(hull: &'a [Point2]) -> Self {
        Self { hull }
    }

    /// Executes the construction.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge structure becomes inconsistent.
    #[instrument(skip(self), fields(points = self.hull.len()))]
    pub fn execute(&self) -> Result<FarthestPointDiagram> {
        let mut points = self.hull.to_vec();
        if signed_area_2d(&points) < 0.0 {
            points.reverse();
        }

        let result = match points.as_slice() {
            [] => FarthestPointDiagram::default(),
            [p] => {
                let mut diagram = Dcel::new();
                diagram.get_face(*p);
                FarthestPointDiagram {
                    diagram,
                    smallest_enclosing_circle: Some(Circle::point(*p)),
                }
            }
            [a, b] => FarthestPointDiagram {
                diagram: single_bisector(a, b)?,
                smallest_enclosing_circle: Some(Circle::with_diameter(a, b)),
            },
            _ => Peeling::new(&points)?.run()?,
        };
        debug!(
            faces = result.diagram.face_count(),
            edges = result.diagram.edge_count(),
            "farthest-point diagram built"
        );
        Ok(result)
    }
}

/// Unbounded end of the bisector of the hull edge `a -> b`, far on the
/// hull's inner side.
fn far_origin(a: &Point2, b: &Point2) -> Point2 {
    let mid = nalgebra::center(a, b);
    let inward = normalized(&perp_ccw(&(b - a))).unwrap_or_default();
    mid + inward * INFINITY
}

/// Diagram of two points: their bisector, split into two faces.
fn single_bisector(a: &Point2, b: &Point2) -> Result<Dcel> {
    let mut dcel = Dcel::new();
    let fa = dcel.get_face(*a);
    let fb = dcel.get_face(*b);
    let (h, t) = dcel.add_half_edge_pair(Some(fa), Some(fb));
    let start = dcel.get_vertex(far_origin(a, b));
    let end = dcel.get_vertex(far_origin(b, a));
    dcel.set_origin(h, start)?;
    dcel.set_origin(t, end)?;
    dcel.close_open_boundaries()?;
    Ok(dcel)
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    middle: usize,
    radius: f64,
    angle: f64,
    serial: u64,
}

/// Largest circumradius first, then the widest middle angle.
fn candidate_order(a: &Candidate, b: &Candidate) -> Ordering {
    compare_with_tolerance(b.radius, a.radius)
        .then_with(|| compare_with_tolerance(b.angle, a.angle))
        .then_with(|| a.serial.cmp(&b.serial))
}

/// Ring of hull points still to be peeled.
struct Peeling<'p> {
    points: &'p [Point2],
    prev: Vec<usize>,
    next: Vec<usize>,
    /// Half-edge of the bisector between `i` and `next[i]`, on face `i`.
    open: Vec<HalfEdgeId>,
    /// Serial of the live candidate for each ring position.
    live: Vec<Option<u64>>,
    candidates: Tree<Candidate>,
    dcel: Dcel,
    remaining: usize,
    /// Some point still on the ring.
    head: usize,
    serial: u64,
}

impl<'p> Peeling<'p> {
    fn new(points: &'p [Point2]) -> Result<Self> {
        let n = points.len();
        let mut dcel = Dcel::new();
        let faces: Vec<_> = points.iter().map(|p| dcel.get_face(*p)).collect();
        let mut open = Vec::with_capacity(n);
        for i in 0..n {
            let j = (i + 1) % n;
            let (h, _) = dcel.add_half_edge_pair(Some(faces[i]), Some(faces[j]));
            let far = dcel.get_vertex(far_origin(&points[i], &points[j]));
            dcel.set_origin(h, far)?;
            open.push(h);
        }

        let mut peeling = Self {
            points,
            prev: (0..n).map(|i| (i + n - 1) % n).collect(),
            next: (0..n).map(|i| (i + 1) % n).collect(),
            open,
            live: vec![None; n],
            candidates: Tree::new(),
            dcel,
            remaining: n,
            head: 0,
            serial: 0,
        };
        for i in 0..n {
            peeling.refresh(i);
        }
        Ok(peeling)
    }

    fn triangle(&self, middle: usize) -> Triangle {
        Triangle::new(
            self.points[self.prev[middle]],
            self.points[middle],
            self.points[self.next[middle]],
        )
    }

    fn refresh(&mut self, middle: usize) {
        let triangle = self.triangle(middle);
        self.serial += 1;
        let candidate = Candidate {
            middle,
            radius: triangle.radius(),
            angle: triangle.middle_angle(),
            serial: self.serial,
        };
        self.live[middle] = Some(candidate.serial);
        self.candidates.insert(candidate, candidate_order);
    }

    fn run(mut self) -> Result<FarthestPointDiagram> {
        let mut enclosing = None;
        while self.remaining > 2 {
            let candidate = self
                .candidates
                .delete_min()
                .ok_or(DiagramError::CandidatesExhausted {
                    remaining: self.remaining,
                })?;
            if self.live[candidate.middle] != Some(candidate.serial) {
                continue;
            }
            let triangle = self.triangle(candidate.middle);
            if enclosing.is_none()
                && compare_with_tolerance(triangle.middle_angle(), FRAC_PI_2) != Ordering::Greater
            {
                enclosing = Some(*triangle.circumcircle());
            }
            self.remove(candidate.middle, triangle.circumcircle().center())?;
        }

        let enclosing = enclosing.unwrap_or_else(|| {
            Circle::with_diameter(&self.points[self.head], &self.points[self.next[self.head]])
        });

        let mut dcel = self.dcel;
        dcel.close_open_boundaries()?;
        let pruned = dcel.remove_zero_length_edges()?;
        trace!(pruned, "zero-length edges removed");
        Ok(FarthestPointDiagram {
            diagram: dcel,
            smallest_enclosing_circle: Some(enclosing),
        })
    }

    /// Removes ring point `p`, joining the bisectors of its neighbours at
    /// `center`.
    fn remove(&mut self, p: usize, center: &Point2) -> Result<()> {
        let a = self.prev[p];
        let c = self.next[p];
        trace!(p, a, c, x = center.x, y = center.y, "peeling hull point");

        let v = self.dcel.get_vertex(*center);
        let h1 = self.open[a];
        let h2 = self.open[p];
        let t1 = self.dcel.twin(h1)?;
        let t2 = self.dcel.twin(h2)?;
        self.dcel.set_origin(t1, v)?;
        self.dcel.set_origin(t2, v)?;

        let (h3, t3) = if self.remaining == 3 {
            let t3 = self.open[c];
            (self.dcel.twin(t3)?, t3)
        } else {
            let fa = self.dcel.half_edge(h1)?.face;
            let fc = self.dcel.half_edge(t2)?.face;
            self.dcel.add_half_edge_pair(fa, fc)
        };
        self.dcel.set_origin(h3, v)?;
        self.dcel.link(h1, h3)?;
        self.dcel.link(h2, t1)?;
        self.dcel.link(t3, t2)?;

        self.open[a] = h3;
        self.next[a] = c;
        self.prev[c] = a;
        self.live[p] = None;
        self.head = a;
        self.remaining -= 1;
        if self.remaining > 2 {
            self.refresh(a);
            self.refresh(c);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;
    use crate::math::points_equal;
    use crate::operations::hull::ConvexHull2D;
    use approx::assert_abs_diff_eq;

    fn farthest(points: &[(f64, f64)]) -> FarthestPointDiagram {
        let pts: Vec<_> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        let hull = ConvexHull2D::new(&pts).execute();
        Skyum::new(&hull).execute().unwrap()
    }

    #[test]
    fn empty_and_single_point() {
        let empty = farthest(&[]);
        assert_eq!(empty.diagram.face_count(), 0);
        assert!(empty.smallest_enclosing_circle.is_none());

        let single = farthest(&[(3.0, 4.0)]);
        assert_eq!(single.diagram.face_count(), 1);
        assert_eq!(single.diagram.edge_count(), 0);
        let circle = single.smallest_enclosing_circle.unwrap();
        assert_abs_diff_eq!(circle.radius(), 0.0);
    }

    #[test]
    fn two_points_share_one_bisector() {
        let result = farthest(&[(0.0, 0.0), (4.0, 0.0)]);
        assert_eq!(result.diagram.face_count(), 2);
        assert_eq!(result.diagram.edge_count(), 1);
        let seg = result.diagram.line_segments().unwrap()[0];
        assert_abs_diff_eq!(seg.start.x, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(seg.end.x, 2.0, epsilon = 1e-9);
        let circle = result.smallest_enclosing_circle.unwrap();
        assert_abs_diff_eq!(circle.radius(), 2.0);
        result.diagram.check_integrity().unwrap();
    }

    #[test]
    fn plus_configuration() {
        let result = farthest(&[
            (120.0, 20.0),
            (20.0, 120.0),
            (120.0, 120.0),
            (220.0, 120.0),
            (120.0, 220.0),
        ]);
        let circle = result.smallest_enclosing_circle.unwrap();
        assert_abs_diff_eq!(circle.center().x, 120.0, epsilon = 1e-9);
        assert_abs_diff_eq!(circle.center().y, 120.0, epsilon = 1e-9);
        assert_abs_diff_eq!(circle.radius(), 100.0, epsilon = 1e-9);

        let d = &result.diagram;
        assert_eq!(d.face_count(), 4);
        assert_eq!(d.edge_count(), 4);
        d.check_integrity().unwrap();
        let center = Point2::new(120.0, 120.0);
        let view = Rectangle::default();
        for seg in d.line_segments().unwrap() {
            let cropped = view.crop_segment(&seg).unwrap();
            assert!(points_equal(&cropped.start, &center) || points_equal(&cropped.end, &center));
            let dir = cropped.end - cropped.start;
            assert_abs_diff_eq!(dir.x.abs(), dir.y.abs(), epsilon = 1e-6);
        }
    }

    #[test]
    fn obtuse_triangle_uses_longest_side() {
        let result = farthest(&[(0.0, 0.0), (10.0, 0.0), (5.0, 1.0)]);
        let circle = result.smallest_enclosing_circle.unwrap();
        assert_abs_diff_eq!(circle.center().x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(circle.center().y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(circle.radius(), 5.0, epsilon = 1e-9);
        assert_eq!(result.diagram.edge_count(), 3);
        result.diagram.check_integrity().unwrap();
    }

    #[test]
    fn enclosing_circle_contains_all_points() {
        let pts = [
            (10.0, 10.0),
            (90.0, 20.0),
            (60.0, 80.0),
            (30.0, 70.0),
            (50.0, 50.0),
            (5.0, 40.0),
        ];
        let result = farthest(&pts);
        let circle = result.smallest_enclosing_circle.unwrap();
        for (x, y) in pts {
            assert!(circle.contains(&Point2::new(x, y)));
        }
        result.diagram.check_integrity().unwrap();
    }
}
