//! The full computation: both diagrams, their duals, and the alpha shape,
//! cropped to a viewport.

use tracing::{debug, info_span, instrument};

use crate::error::{GeometryError, Result};
use crate::geometry::{Circle, LineSegment, PathElement, Polygon, Rectangle};
use crate::math::{Point2, MAX_COORDINATE};
use crate::topology::Dcel;

use super::alpha::{AlphaDisc, AlphaShape, ComputeShapeSpectra};
use super::hull::ConvexHull2D;
use super::voronoi::{compute_delaunay, Fortune, Skyum};

/// Parameters of a [`ComputeAlpha`] run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputeParams {
    /// Signed alpha; positive values use the nearest-point diagram,
    /// negative ones the farthest-point diagram.
    pub alpha: f64,
    /// Every output path is cropped to this rectangle.
    pub viewport: Rectangle,
    /// Also emit the biggest disc of every active edge.
    pub biggest_discs: bool,
    /// Emit alpha-hull arcs as cubic Bézier pieces.
    pub arcs_as_beziers: bool,
}

impl Default for ComputeParams {
    fn default() -> Self {
        Self {
            alpha: f64::INFINITY,
            viewport: Rectangle::default(),
            biggest_discs: false,
            arcs_as_beziers: false,
        }
    }
}

/// Everything a renderer draws, already cropped to the viewport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlphaComputation {
    pub convex_hull: Vec<PathElement>,
    pub nearest_diagram: Vec<PathElement>,
    pub farthest_diagram: Vec<PathElement>,
    pub delaunay_nearest: Vec<PathElement>,
    pub delaunay_farthest: Vec<PathElement>,
    pub significant_alphas: Vec<f64>,
    /// Sites belonging to the alpha shape.
    pub alpha_shape_vertices: Vec<Point2>,
    /// Edges of the alpha shape.
    pub alpha_shape: Vec<PathElement>,
    pub alpha_hull: Vec<PathElement>,
    /// Not cropped; `None` only for an empty point set.
    pub smallest_enclosing_circle: Option<Circle>,
    pub alpha_discs: Vec<PathElement>,
    /// Empty unless [`ComputeParams::biggest_discs`] is set.
    pub biggest_discs: Vec<PathElement>,
}

/// Runs the whole pipeline on a point set.
///
/// Every call builds its own diagrams; nothing is shared between runs.
pub struct ComputeAlpha<'a> {
    points: &'a [Point2],
    params: ComputeParams,
}

impl<'a> ComputeAlpha<'a> {
    /// Creates a new `ComputeAlpha` operation with default parameters.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self {
            points,
            params: ComputeParams::default(),
        }
    }

    /// Sets custom parameters.
    #[must_use]
    pub fn with_params(mut self, params: ComputeParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the alpha value.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.params.alpha = alpha;
        self
    }

    /// Sets the viewport.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Rectangle) -> Self {
        self.params.viewport = viewport;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.params.alpha.is_nan() {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "alpha",
                value: self.params.alpha,
                min: f64::NEG_INFINITY,
                max: f64::INFINITY,
            }
            .into());
        }
        for p in self.points {
            for value in [p.x, p.y] {
                if !value.is_finite() || value.abs() >= MAX_COORDINATE {
                    return Err(GeometryError::ParameterOutOfRange {
                        parameter: "coordinate",
                        value,
                        min: -MAX_COORDINATE,
                        max: MAX_COORDINATE,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Executes the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] for a NaN alpha or a
    /// coordinate that is not finite or reaches `MAX_COORDINATE`, and a
    /// topology error if a diagram comes out inconsistent.
    #[instrument(skip(self), fields(points = self.points.len(), alpha = self.params.alpha))]
    pub fn execute(&self) -> Result<AlphaComputation> {
        self.validate()?;
        let view = &self.params.viewport;

        let hull = ConvexHull2D::new(self.points).execute();
        let nearest = Fortune::new(self.points).execute()?;
        let farthest = Skyum::new(&hull).execute()?;

        let spectra = ComputeShapeSpectra::new(&nearest, &farthest.diagram).execute()?;
        let shape = AlphaShape::new(&spectra, self.params.alpha);
        let shape_result = shape.execute();

        let _crop = info_span!("crop").entered();
        let mut out = AlphaComputation {
            convex_hull: crop_hull(view, &hull),
            nearest_diagram: crop_diagram(view, &nearest)?,
            farthest_diagram: crop_diagram(view, &farthest.diagram)?,
            delaunay_nearest: crop_segments(view, compute_delaunay(&nearest)?),
            delaunay_farthest: crop_segments(view, compute_delaunay(&farthest.diagram)?),
            significant_alphas: spectra.significant_alphas.clone(),
            alpha_shape_vertices: shape_result
                .vertices
                .into_iter()
                .filter(|p| view.contains(p))
                .collect(),
            alpha_shape: crop_segments(view, shape_result.edges),
            alpha_hull: crop_alpha_hull(view, &shape.hull(false)?, self.params.arcs_as_beziers),
            smallest_enclosing_circle: farthest.smallest_enclosing_circle,
            alpha_discs: crop_discs(view, shape.discs()?.into_iter().map(|(_, d)| d)),
            biggest_discs: Vec::new(),
        };
        if self.params.biggest_discs {
            out.biggest_discs = crop_discs(view, shape.biggest_discs()?);
        }
        debug!(
            nearest = out.nearest_diagram.len(),
            farthest = out.farthest_diagram.len(),
            shape = out.alpha_shape.len(),
            hull = out.alpha_hull.len(),
            "computation cropped"
        );
        Ok(out)
    }
}

/// Runs [`ComputeAlpha`] with the given alpha and viewport.
///
/// # Errors
///
/// See [`ComputeAlpha::execute`].
pub fn compute(points: &[Point2], alpha: f64, viewport: Rectangle) -> Result<AlphaComputation> {
    ComputeAlpha::new(points)
        .with_alpha(alpha)
        .with_viewport(viewport)
        .execute()
}

fn crop_segments(
    view: &Rectangle,
    segments: impl IntoIterator<Item = LineSegment>,
) -> Vec<PathElement> {
    segments
        .into_iter()
        .filter_map(|s| view.crop_segment(&s))
        .map(PathElement::Segment)
        .collect()
}

fn crop_diagram(view: &Rectangle, diagram: &Dcel) -> Result<Vec<PathElement>> {
    Ok(crop_segments(view, diagram.line_segments()?))
}

fn crop_hull(view: &Rectangle, hull: &[Point2]) -> Vec<PathElement> {
    match hull {
        [] | [_] => Vec::new(),
        [a, b] => crop_segments(view, [LineSegment::new(*a, *b)]),
        _ => view
            .crop_polygon(&Polygon::new(hull.to_vec()))
            .map(PathElement::Polygon)
            .into_iter()
            .collect(),
    }
}

/// Visible sub-arcs are converted to Béziers after cropping.
fn crop_alpha_hull(
    view: &Rectangle,
    pieces: &[PathElement],
    arcs_as_beziers: bool,
) -> Vec<PathElement> {
    pieces
        .iter()
        .flat_map(|piece| view.crop(piece))
        .flat_map(|piece| match piece {
            PathElement::Arc(arc) if arcs_as_beziers => arc
                .to_beziers()
                .into_iter()
                .map(PathElement::from)
                .collect(),
            other => vec![other],
        })
        .collect()
}

fn crop_discs(view: &Rectangle, discs: impl IntoIterator<Item = AlphaDisc>) -> Vec<PathElement> {
    discs
        .into_iter()
        .flat_map(|disc| match disc {
            AlphaDisc::Circle(c) => view.crop_circle(&c),
            AlphaDisc::HalfPlane(h) => view
                .crop_half_plane(&h)
                .map(PathElement::Polygon)
                .into_iter()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::VoronoiError;

    fn points(raw: &[(f64, f64)]) -> Vec<Point2> {
        raw.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let out = ComputeAlpha::new(&[]).execute().unwrap();
        assert_eq!(out, AlphaComputation::default());
    }

    #[test]
    fn single_point() {
        let pts = points(&[(50.0, 50.0)]);
        let out = ComputeAlpha::new(&pts).execute().unwrap();
        assert!(out.nearest_diagram.is_empty());
        assert!(out.convex_hull.is_empty());
        assert_eq!(out.alpha_shape_vertices.len(), 1);
        let circle = out.smallest_enclosing_circle.unwrap();
        assert!(circle.radius().abs() < 1e-12);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        for bad in [f64::NAN, f64::INFINITY, MAX_COORDINATE] {
            let pts = points(&[(0.0, 0.0), (bad, 1.0)]);
            let err = ComputeAlpha::new(&pts).execute().unwrap_err();
            assert!(matches!(
                err,
                VoronoiError::Geometry(GeometryError::ParameterOutOfRange { .. })
            ));
        }
        let pts = points(&[(0.0, 0.0)]);
        assert!(ComputeAlpha::new(&pts).with_alpha(f64::NAN).execute().is_err());
    }

    #[test]
    fn triangle_at_default_alpha() {
        let pts = points(&[(100.0, 100.0), (300.0, 100.0), (200.0, 250.0)]);
        let out = ComputeAlpha::new(&pts).execute().unwrap();
        assert_eq!(out.convex_hull.len(), 1);
        assert_eq!(out.nearest_diagram.len(), 3);
        assert_eq!(out.farthest_diagram.len(), 3);
        assert_eq!(out.delaunay_nearest.len(), 3);
        assert_eq!(out.delaunay_farthest.len(), 3);
        assert_eq!(out.alpha_shape.len(), 3);
        assert_eq!(out.alpha_hull.len(), 3);
        assert_eq!(out.alpha_discs.len(), 3);
        assert!(out.biggest_discs.is_empty());
        let circle = out.smallest_enclosing_circle.unwrap();
        for p in &pts {
            assert!(circle.contains(p));
        }
    }

    #[test]
    fn biggest_discs_on_request() {
        let pts = points(&[(100.0, 100.0), (300.0, 100.0), (200.0, 250.0)]);
        let params = ComputeParams {
            biggest_discs: true,
            ..ComputeParams::default()
        };
        let out = ComputeAlpha::new(&pts).with_params(params).execute().unwrap();
        assert_eq!(out.biggest_discs.len(), 3);
        assert!(out
            .biggest_discs
            .iter()
            .all(|p| matches!(p, PathElement::Polygon(_))));
    }

    #[test]
    fn no_biggest_discs_for_negative_alpha() {
        let pts = points(&[(100.0, 100.0), (300.0, 100.0), (200.0, 250.0)]);
        let params = ComputeParams {
            alpha: f64::NEG_INFINITY,
            biggest_discs: true,
            ..ComputeParams::default()
        };
        let out = ComputeAlpha::new(&pts).with_params(params).execute().unwrap();
        assert_eq!(out.alpha_shape.len(), 3);
        assert!(out.biggest_discs.is_empty());
    }

    #[test]
    fn bezier_hull_survives_a_cutting_viewport() {
        let pts = points(&[(100.0, 100.0), (300.0, 100.0), (200.0, 250.0)]);
        let view = Rectangle::new(0.0, 0.0, 200.0, 400.0).unwrap();
        let arcs = ComputeAlpha::new(&pts)
            .with_alpha(150.0)
            .with_viewport(view)
            .execute()
            .unwrap()
            .alpha_hull;
        assert!(!arcs.is_empty());

        let params = ComputeParams {
            alpha: 150.0,
            viewport: view,
            arcs_as_beziers: true,
            ..ComputeParams::default()
        };
        let beziers = ComputeAlpha::new(&pts)
            .with_params(params)
            .execute()
            .unwrap()
            .alpha_hull;
        assert!(beziers.len() >= arcs.len());
        for piece in &beziers {
            let PathElement::Bezier(b) = piece else {
                panic!("expected a bezier piece");
            };
            assert!(view.contains(&b.p0) && view.contains(&b.p3));
        }
    }
}
