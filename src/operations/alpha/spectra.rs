use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::math::{
    compare_with_tolerance, is_effectively_infinite, points_equal, Point2, TOLERANCE,
};
use crate::operations::voronoi::{
    compute_voronoi_cells, compute_voronoi_neighbours, VoronoiCell, VoronoiNeighbours,
};
use crate::topology::Dcel;

/// Which diagram a spectrum entry was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    /// The nearest-point diagram; its alphas are non-negative.
    Closest,
    /// The farthest-point diagram; its alphas are non-positive.
    Farthest,
}

/// Closed range of alpha values over which a feature belongs to the shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaInterval {
    /// Lower bound, possibly `-inf`.
    pub min: f64,
    /// Upper bound, possibly `+inf`.
    pub max: f64,
}

impl AlphaInterval {
    /// Interval `[min, max]` of a nearest-diagram record.
    #[must_use]
    pub fn closest(min_distance: f64, max_distance: f64) -> Self {
        Self {
            min: min_distance,
            max: if is_effectively_infinite(max_distance) {
                f64::INFINITY
            } else {
                max_distance
            },
        }
    }

    /// Interval `[-max, -min]` of a farthest-diagram record.
    #[must_use]
    pub fn farthest(min_distance: f64, max_distance: f64) -> Self {
        Self {
            min: if is_effectively_infinite(max_distance) {
                f64::NEG_INFINITY
            } else {
                -max_distance
            },
            max: -min_distance,
        }
    }

    /// Interval of a record from the given diagram.
    #[must_use]
    pub fn of(kind: DiagramKind, min_distance: f64, max_distance: f64) -> Self {
        match kind {
            DiagramKind::Closest => Self::closest(min_distance, max_distance),
            DiagramKind::Farthest => Self::farthest(min_distance, max_distance),
        }
    }

    /// Inclusive membership under tolerance.
    #[must_use]
    pub fn contains(&self, alpha: f64) -> bool {
        compare_with_tolerance(alpha, self.min) != Ordering::Less
            && compare_with_tolerance(alpha, self.max) != Ordering::Greater
    }
}

/// Alpha range of one site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSpectrum {
    pub kind: DiagramKind,
    pub cell: VoronoiCell,
    pub interval: AlphaInterval,
}

/// Alpha range of one pair of neighbouring sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSpectrum {
    pub kind: DiagramKind,
    pub neighbours: VoronoiNeighbours,
    pub interval: AlphaInterval,
}

/// Per-feature alpha intervals of both diagrams.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeSpectra {
    pub vertices: Vec<VertexSpectrum>,
    pub edges: Vec<EdgeSpectrum>,
    /// Every interval endpoint, sorted and deduplicated under tolerance.
    pub significant_alphas: Vec<f64>,
}

/// Derives the shape spectra from the nearest- and farthest-point diagrams.
pub struct ComputeShapeSpectra<'a> {
    closest: &'a Dcel,
    farthest: &'a Dcel,
}

impl<'a> ComputeShapeSpectra<'a> {
    /// Creates a new `ComputeShapeSpectra` operation.
    #[must_use]
    pub fn new(closest: &'a Dcel, farthest: &'a Dcel) -> Self {
        Self { closest, farthest }
    }

    /// Executes the derivation.
    ///
    /// # Errors
    ///
    /// Returns an error if either diagram has an open face boundary or an
    /// edge without origin.
    #[instrument(skip_all)]
    pub fn execute(&self) -> Result<ShapeSpectra> {
        let mut spectra = ShapeSpectra::default();
        for (kind, diagram) in [
            (DiagramKind::Closest, self.closest),
            (DiagramKind::Farthest, self.farthest),
        ] {
            for cell in compute_voronoi_cells(diagram)? {
                spectra.vertices.push(VertexSpectrum {
                    kind,
                    interval: AlphaInterval::of(kind, cell.min_distance, cell.max_distance),
                    cell,
                });
            }
            for neighbours in compute_voronoi_neighbours(diagram)? {
                spectra.edges.push(EdgeSpectrum {
                    kind,
                    interval: AlphaInterval::of(
                        kind,
                        neighbours.min_distance,
                        neighbours.max_distance,
                    ),
                    neighbours,
                });
            }
        }

        let intervals = spectra
            .vertices
            .iter()
            .map(|v| v.interval)
            .chain(spectra.edges.iter().map(|e| e.interval));
        spectra.significant_alphas = significant_alphas(intervals);
        debug!(
            vertices = spectra.vertices.len(),
            edges = spectra.edges.len(),
            alphas = spectra.significant_alphas.len(),
            "shape spectra computed"
        );
        Ok(spectra)
    }
}

/// Sorted interval endpoints with near-equal values merged.
#[must_use]
pub fn significant_alphas(intervals: impl IntoIterator<Item = AlphaInterval>) -> Vec<f64> {
    let mut alphas: Vec<f64> = intervals
        .into_iter()
        .flat_map(|i| [i.min, i.max])
        .filter(|a| !a.is_nan())
        .collect();
    alphas.sort_by(f64::total_cmp);
    alphas.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE || a == b);
    alphas
}

impl ShapeSpectra {
    /// Sites whose interval holds `alpha`, each site once.
    #[must_use]
    pub fn vertices_at(&self, alpha: f64) -> Vec<Point2> {
        let mut sites: Vec<Point2> = Vec::new();
        for v in self.vertices.iter().filter(|v| v.interval.contains(alpha)) {
            if !sites.iter().any(|s| points_equal(s, &v.cell.site)) {
                sites.push(v.cell.site);
            }
        }
        sites
    }

    /// Edges whose interval holds `alpha`.
    pub fn edges_at(&self, alpha: f64) -> impl Iterator<Item = &EdgeSpectrum> {
        self.edges
            .iter()
            .filter(move |e| e.interval.contains(alpha))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::hull::ConvexHull2D;
    use crate::operations::voronoi::{Fortune, Skyum};
    use approx::assert_abs_diff_eq;

    fn spectra_of(points: &[(f64, f64)]) -> ShapeSpectra {
        let pts: Vec<_> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        let closest = Fortune::new(&pts).execute().unwrap();
        let hull = ConvexHull2D::new(&pts).execute();
        let farthest = Skyum::new(&hull).execute().unwrap().diagram;
        ComputeShapeSpectra::new(&closest, &farthest).execute().unwrap()
    }

    #[test]
    fn interval_signs() {
        let c = AlphaInterval::closest(2.0, 2.0e6);
        assert_abs_diff_eq!(c.min, 2.0);
        assert!(c.max.is_infinite() && c.max > 0.0);
        let f = AlphaInterval::farthest(2.0, 5.0);
        assert_abs_diff_eq!(f.min, -5.0);
        assert_abs_diff_eq!(f.max, -2.0);
        let f = AlphaInterval::farthest(2.0, 2.0e6);
        assert!(f.min.is_infinite() && f.min < 0.0);
    }

    #[test]
    fn membership_is_inclusive() {
        let i = AlphaInterval::closest(1.0, 3.0);
        assert!(i.contains(1.0));
        assert!(i.contains(3.0 + TOLERANCE / 2.0));
        assert!(!i.contains(3.1));
        let open = AlphaInterval::closest(1.0, f64::INFINITY);
        assert!(open.contains(f64::INFINITY));
        assert!(!open.contains(f64::NEG_INFINITY));
    }

    #[test]
    fn significant_alphas_are_merged() {
        let alphas = significant_alphas([
            AlphaInterval::closest(1.0, 3.0),
            AlphaInterval::closest(1.0 + TOLERANCE / 10.0, f64::INFINITY),
            AlphaInterval::farthest(1.0, f64::INFINITY),
        ]);
        assert_eq!(alphas.len(), 5);
        assert!(alphas[0].is_infinite());
        assert_abs_diff_eq!(alphas[1], -1.0);
        assert_abs_diff_eq!(alphas[2], 1.0);
        assert_abs_diff_eq!(alphas[3], 3.0);
        assert!(alphas[4].is_infinite());
    }

    #[test]
    fn square_spectra() {
        let spectra = spectra_of(&[(20.0, 20.0), (220.0, 20.0), (220.0, 220.0), (20.0, 220.0)]);
        assert_eq!(spectra.vertices.len(), 8);
        assert_eq!(spectra.edges.len(), 8);
        let alphas = &spectra.significant_alphas;
        assert_eq!(alphas.len(), 4);
        assert_abs_diff_eq!(alphas[1], -100.0 * 2f64.sqrt(), epsilon = 1e-6);
        assert_abs_diff_eq!(alphas[2], 100.0, epsilon = 1e-6);
        for e in &spectra.edges {
            for bound in [e.interval.min, e.interval.max] {
                assert!(alphas
                    .iter()
                    .any(|a| compare_with_tolerance(*a, bound) == Ordering::Equal));
            }
        }
    }
}
