use super::{Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Rotates a closed polygon so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

/// Returns `true` if `p` lies inside or on a convex counter-clockwise polygon.
#[must_use]
pub fn point_in_convex_polygon(p: &Point2, points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        (b - a).perp(&(p - a)) >= -TOLERANCE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn ccw_square_has_positive_area() {
        assert_abs_diff_eq!(signed_area_2d(&unit_square()), 1.0, epsilon = 1e-12);
        let mut cw = unit_square();
        cw.reverse();
        assert_abs_diff_eq!(signed_area_2d(&cw), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn canonical_start_is_bottom_left() {
        let mut pts = unit_square();
        pts.rotate_left(2);
        let rotated = rotate_to_canonical_start(&pts);
        assert_eq!(rotated, unit_square());
    }

    #[test]
    fn convex_containment() {
        let sq = unit_square();
        assert!(point_in_convex_polygon(&Point2::new(0.5, 0.5), &sq));
        assert!(point_in_convex_polygon(&Point2::new(1.0, 0.5), &sq));
        assert!(!point_in_convex_polygon(&Point2::new(1.5, 0.5), &sq));
    }
}
