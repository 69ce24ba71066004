use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::geometry::{Arc, Circle, HalfPlane, LineSegment, PathElement};
use crate::math::distance_2d::farther_endpoint;
use crate::math::intersect_2d::circle_centers_through_points;
use crate::math::{compare_with_tolerance, is_effectively_infinite, Point2};

use super::spectra::{EdgeSpectrum, ShapeSpectra};

/// A disc touching two neighbouring sites.
///
/// Discs of effectively unbounded radius are half-planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlphaDisc {
    Circle(Circle),
    HalfPlane(HalfPlane),
}

/// Vertices and edges of an alpha shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlphaShapeResult {
    pub vertices: Vec<Point2>,
    pub edges: Vec<LineSegment>,
}

/// Evaluates the alpha shape, hull and discs of precomputed spectra.
///
/// Positive alphas select features of the nearest-point diagram, negative
/// ones features of the farthest-point diagram. An `alpha` at or beyond
/// half the `INFINITY` sentinel is treated as unbounded.
pub struct AlphaShape<'a> {
    spectra: &'a ShapeSpectra,
    alpha: f64,
}

impl<'a> AlphaShape<'a> {
    /// Creates a new `AlphaShape` evaluation.
    #[must_use]
    pub fn new(spectra: &'a ShapeSpectra, alpha: f64) -> Self {
        let alpha = if is_effectively_infinite(alpha) {
            f64::INFINITY.copysign(alpha)
        } else {
            alpha
        };
        Self { spectra, alpha }
    }

    /// The alpha value in use.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn is_unbounded(&self) -> bool {
        self.alpha.is_infinite()
    }

    /// Sites and Delaunay edges whose interval holds alpha.
    #[must_use]
    #[instrument(skip(self), fields(alpha = self.alpha))]
    pub fn execute(&self) -> AlphaShapeResult {
        let vertices = self.spectra.vertices_at(self.alpha);
        let mut edges: Vec<LineSegment> = Vec::new();
        for e in self.spectra.edges_at(self.alpha) {
            let sites = e.neighbours.sites;
            if !edges.iter().any(|s| s.same_undirected(&sites)) {
                edges.push(sites);
            }
        }
        debug!(
            vertices = vertices.len(),
            edges = edges.len(),
            "alpha shape evaluated"
        );
        AlphaShapeResult { vertices, edges }
    }

    /// One disc of radius `|alpha|` through both sites of every active edge,
    /// centered on the edge's Voronoi border.
    ///
    /// When both candidate centers lie on the border, the one toward the
    /// border's outer end wins: the side away from the other sites in the
    /// nearest diagram, the side toward them in the farthest one.
    ///
    /// # Errors
    ///
    /// Returns an error if an unbounded disc cannot be oriented.
    pub fn discs(&self) -> Result<Vec<(EdgeSpectrum, AlphaDisc)>> {
        let mut discs = Vec::new();
        for e in self.spectra.edges_at(self.alpha) {
            if let Some(disc) = self.edge_disc(e)? {
                discs.push((*e, disc));
            }
        }
        Ok(discs)
    }

    fn edge_disc(&self, e: &EdgeSpectrum) -> Result<Option<AlphaDisc>> {
        let LineSegment { start: p, end: q } = e.neighbours.sites;
        let border = e.neighbours.border;
        let outer = farther_endpoint(&p, &border.start, &border.end);
        if self.is_unbounded() {
            let disc = AlphaDisc::HalfPlane(HalfPlane::bounded_by(p, q, &outer)?);
            return Ok(Some(disc));
        }

        let radius = self.alpha.abs();
        let centers = circle_centers_through_points(&p, &q, radius);
        let center = centers
            .iter()
            .copied()
            .filter(|c| compare_with_tolerance(border.distance_to(c), 0.0) == Ordering::Equal)
            .min_by(|a, b| (a - outer).norm().total_cmp(&(b - outer).norm()))
            .or_else(|| {
                centers.iter().copied().min_by(|a, b| {
                    border.distance_to(a).total_cmp(&border.distance_to(b))
                })
            });
        center
            .map(|c| Circle::new(c, radius).map(AlphaDisc::Circle))
            .transpose()
    }

    /// Boundary of the alpha hull: the minor arc of each alpha disc
    /// between its two sites, or the straight edge for unbounded discs.
    ///
    /// # Errors
    ///
    /// Returns an error if an arc is degenerate.
    #[instrument(skip(self), fields(alpha = self.alpha))]
    pub fn hull(&self, arcs_as_beziers: bool) -> Result<Vec<PathElement>> {
        let mut pieces = Vec::new();
        for (e, disc) in self.discs()? {
            let LineSegment { start: p, end: q } = e.neighbours.sites;
            match disc {
                AlphaDisc::HalfPlane(_) => {
                    pieces.push(PathElement::Segment(e.neighbours.sites));
                }
                AlphaDisc::Circle(c) => {
                    let arc = Arc::minor_between(*c.center(), c.radius(), &p, &q)?;
                    if arcs_as_beziers {
                        pieces.extend(arc.to_beziers().into_iter().map(PathElement::from));
                    } else {
                        pieces.push(PathElement::Arc(arc));
                    }
                }
            }
        }
        debug!(pieces = pieces.len(), "alpha hull evaluated");
        Ok(pieces)
    }

    /// Largest disc through both sites of every active nearest-diagram
    /// edge: centered at the border end farther from the sites, or a
    /// half-plane when that end is effectively at infinity.
    ///
    /// Only positive alphas have biggest discs; edges whose interval ends
    /// at or below zero are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if an unbounded disc cannot be oriented.
    pub fn biggest_discs(&self) -> Result<Vec<AlphaDisc>> {
        if self.alpha <= 0.0 {
            return Ok(Vec::new());
        }
        self.spectra
            .edges_at(self.alpha)
            .filter(|e| e.interval.max > 0.0)
            .map(|e| -> Result<AlphaDisc> {
                let LineSegment { start: p, end: q } = e.neighbours.sites;
                let border = e.neighbours.border;
                let far = farther_endpoint(&p, &border.start, &border.end);
                let radius = (far - p).norm();
                if is_effectively_infinite(radius) {
                    Ok(AlphaDisc::HalfPlane(HalfPlane::bounded_by(p, q, &far)?))
                } else {
                    Ok(AlphaDisc::Circle(Circle::new(far, radius)?))
                }
            })
            .collect()
    }
}
