//! Delaunay dual and distance records of a Voronoi diagram.
//!
//! These work on either kind of diagram: faces are sites, and every edge
//! separates the two sites whose faces lie on its sides.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::geometry::LineSegment;
use crate::math::distance_2d::point_to_segment_min_max;
use crate::math::{Point2, INFINITY};
use crate::topology::{Dcel, FaceId};

/// Two sites sharing a Voronoi border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiNeighbours {
    /// The Delaunay edge between the two sites.
    pub sites: LineSegment,
    /// The Voronoi edge separating them.
    pub border: LineSegment,
    /// Smallest distance from either site to the border.
    pub min_distance: f64,
    /// Largest distance from either site to the border.
    pub max_distance: f64,
}

/// A site and the extent of its region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiCell {
    /// The site owning the face.
    pub site: Point2,
    /// Smallest site-to-border distance over all borders.
    pub min_distance: f64,
    /// Largest site-to-border distance over all borders.
    pub max_distance: f64,
}

/// Pairs of faces adjacent across an edge, each pair once.
fn adjacent_faces(diagram: &Dcel) -> Result<BTreeSet<(FaceId, FaceId)>> {
    let mut pairs = BTreeSet::new();
    for (face, _) in diagram.faces() {
        for he in diagram.face_boundary(face)? {
            let twin = diagram.twin(he)?;
            if let Some(other) = diagram.half_edge(twin)?.face {
                if other != face {
                    pairs.insert((face.min(other), face.max(other)));
                }
            }
        }
    }
    Ok(pairs)
}

/// Straight-line dual of a diagram: one segment per pair of adjacent sites.
///
/// # Errors
///
/// Returns an error if a face boundary is not a closed cycle.
#[instrument(skip_all, fields(faces = diagram.face_count()))]
pub fn compute_delaunay(diagram: &Dcel) -> Result<Vec<LineSegment>> {
    let segments: Vec<_> = adjacent_faces(diagram)?
        .into_iter()
        .map(|(a, b)| -> Result<LineSegment> {
            Ok(LineSegment::new(
                diagram.face(a)?.center,
                diagram.face(b)?.center,
            ))
        })
        .collect::<Result<_>>()?;
    debug!(edges = segments.len(), "delaunay graph derived");
    Ok(segments)
}

/// One record per undirected edge of a diagram.
///
/// # Errors
///
/// Returns an error if an edge lacks a face on either side or an origin.
#[instrument(skip_all, fields(edges = diagram.edge_count()))]
pub fn compute_voronoi_neighbours(diagram: &Dcel) -> Result<Vec<VoronoiNeighbours>> {
    let mut records = Vec::with_capacity(diagram.edge_count());
    for (id, he) in diagram.half_edges() {
        if id > he.twin {
            continue;
        }
        let (Some(f), Some(g)) = (he.face, diagram.half_edge(he.twin)?.face) else {
            continue;
        };
        let p = diagram.face(f)?.center;
        let q = diagram.face(g)?.center;
        let (a, b) = diagram.endpoints(id)?;
        let (min_p, max_p) = point_to_segment_min_max(&p, &a, &b);
        let (min_q, max_q) = point_to_segment_min_max(&q, &a, &b);
        records.push(VoronoiNeighbours {
            sites: LineSegment::new(p, q),
            border: LineSegment::new(a, b),
            min_distance: min_p.min(min_q),
            max_distance: max_p.max(max_q),
        });
    }
    Ok(records)
}

/// One record per face of a diagram.
///
/// A face without borders (a lone site) spans every distance from zero to
/// [`INFINITY`].
///
/// # Errors
///
/// Returns an error if a face boundary is not a closed cycle.
#[instrument(skip_all, fields(faces = diagram.face_count()))]
pub fn compute_voronoi_cells(diagram: &Dcel) -> Result<Vec<VoronoiCell>> {
    let mut cells = Vec::with_capacity(diagram.face_count());
    for (face, data) in diagram.faces() {
        let site = data.center;
        let mut min_distance = f64::INFINITY;
        let mut max_distance = f64::NEG_INFINITY;
        for he in diagram.face_boundary(face)? {
            let (a, b) = diagram.endpoints(he)?;
            let (lo, hi) = point_to_segment_min_max(&site, &a, &b);
            min_distance = min_distance.min(lo);
            max_distance = max_distance.max(hi);
        }
        if max_distance < min_distance {
            min_distance = 0.0;
            max_distance = INFINITY;
        }
        cells.push(VoronoiCell {
            site,
            min_distance,
            max_distance,
        });
    }
    Ok(cells)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::is_effectively_infinite;
    use crate::operations::voronoi::Fortune;
    use approx::assert_abs_diff_eq;

    fn nearest(points: &[(f64, f64)]) -> Dcel {
        let pts: Vec<_> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        Fortune::new(&pts).execute().unwrap()
    }

    #[test]
    fn triangle_dual_is_the_triangle() {
        let d = nearest(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)]);
        let edges = compute_delaunay(&d).unwrap();
        assert_eq!(edges.len(), 3);
        let expected = LineSegment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        assert!(edges.iter().any(|e| e.same_undirected(&expected)));
    }

    #[test]
    fn square_dual_has_no_diagonal() {
        let d = nearest(&[(20.0, 20.0), (220.0, 20.0), (220.0, 220.0), (20.0, 220.0)]);
        let edges = compute_delaunay(&d).unwrap();
        assert_eq!(edges.len(), 4);
        for e in &edges {
            assert_abs_diff_eq!(e.length(), 200.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn neighbour_distances() {
        let d = nearest(&[(0.0, 0.0), (4.0, 0.0)]);
        let records = compute_voronoi_neighbours(&d).unwrap();
        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_abs_diff_eq!(r.min_distance, 2.0, epsilon = 1e-9);
        assert!(is_effectively_infinite(r.max_distance));
    }

    #[test]
    fn cocircular_borders_meet_at_center() {
        let d = nearest(&[(-1.0, 0.0), (0.0, 1.0), (1.0, 0.0), (0.0, -1.0)]);
        let records = compute_voronoi_neighbours(&d).unwrap();
        assert_eq!(records.len(), 4);
        for r in &records {
            assert!(r.min_distance > 0.5);
            assert!(is_effectively_infinite(r.max_distance));
        }
    }

    #[test]
    fn cells_of_lone_and_paired_sites() {
        let lone = nearest(&[(5.0, 5.0)]);
        let cells = compute_voronoi_cells(&lone).unwrap();
        assert_eq!(cells.len(), 1);
        assert_abs_diff_eq!(cells[0].min_distance, 0.0);
        assert_abs_diff_eq!(cells[0].max_distance, INFINITY);

        let pair = nearest(&[(0.0, 0.0), (4.0, 0.0)]);
        let cells = compute_voronoi_cells(&pair).unwrap();
        assert_eq!(cells.len(), 2);
        for c in cells {
            assert_abs_diff_eq!(c.min_distance, 2.0, epsilon = 1e-9);
            assert!(is_effectively_infinite(c.max_distance));
        }
    }
}
