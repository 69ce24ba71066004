//! Property-based tests for diagram invariants using the `proptest` crate.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use spade::{DelaunayTriangulation, Point2 as SpadePoint2, Triangulation};

use voronoi_alpha::math::{points_equal, Point2};
use voronoi_alpha::operations::hull::ConvexHull2D;
use voronoi_alpha::operations::voronoi::{compute_delaunay, Fortune, Skyum};

/// Between 3 and 24 points in the default viewport.
fn arb_points() -> impl Strategy<Value = Vec<Point2>> {
    prop::collection::vec((0.0f64..1000.0, 0.0f64..1000.0), 3..24)
        .prop_map(|raw| raw.into_iter().map(|(x, y)| Point2::new(x, y)).collect())
}

fn distinct(points: &[Point2]) -> usize {
    let mut seen: Vec<Point2> = Vec::new();
    for p in points {
        if !seen.iter().any(|s| points_equal(s, p)) {
            seen.push(*p);
        }
    }
    seen.len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn nearest_diagram_is_a_valid_subdivision(points in arb_points()) {
        let diagram = Fortune::new(&points).execute().unwrap();
        prop_assert!(diagram.check_integrity().is_ok());
        prop_assert_eq!(diagram.face_count(), distinct(&points));
        for (id, he) in diagram.half_edges() {
            prop_assert_eq!(diagram.half_edge(he.twin).unwrap().twin, id);
        }
    }

    #[test]
    fn farthest_diagram_is_a_valid_subdivision(points in arb_points()) {
        let hull = ConvexHull2D::new(&points).execute();
        let result = Skyum::new(&hull).execute().unwrap();
        prop_assert!(result.diagram.check_integrity().is_ok());
        prop_assert_eq!(result.diagram.face_count(), hull.len());
        let circle = result.smallest_enclosing_circle.unwrap();
        for p in &points {
            prop_assert!(circle.contains(p));
        }
    }

    #[test]
    fn nearest_delaunay_edges_are_spade_edges(points in arb_points()) {
        let ours = compute_delaunay(&Fortune::new(&points).execute().unwrap()).unwrap();
        let mut reference: DelaunayTriangulation<SpadePoint2<f64>> = DelaunayTriangulation::new();
        for p in &points {
            reference.insert(SpadePoint2::new(p.x, p.y)).unwrap();
        }
        for edge in &ours {
            let found = reference.undirected_edges().any(|e| {
                let [a, b] = e.vertices();
                let a = Point2::new(a.position().x, a.position().y);
                let b = Point2::new(b.position().x, b.position().y);
                (points_equal(&a, &edge.start) && points_equal(&b, &edge.end))
                    || (points_equal(&a, &edge.end) && points_equal(&b, &edge.start))
            });
            prop_assert!(found, "edge {:?} is not a Delaunay edge", edge);
        }
    }
}
