use super::Point2;

/// Returns the parameter in `[0, 1]` of the point on segment `a -> b`
/// closest to `p`.
#[must_use]
pub fn segment_projection_param(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < 1e-20 {
        return 0.0;
    }
    ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0)
}

/// Returns the minimum distance from `p` to the segment `a -> b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let t = segment_projection_param(p, a, b);
    let closest = a + (b - a) * t;
    (p - closest).norm()
}

/// Returns `(min, max)` distance from `p` to the segment `a -> b`.
///
/// The minimum is the perpendicular-foot distance when the foot falls on the
/// segment, otherwise the distance to the nearer endpoint. The maximum is the
/// distance to the farther endpoint.
#[must_use]
pub fn point_to_segment_min_max(p: &Point2, a: &Point2, b: &Point2) -> (f64, f64) {
    let min = point_to_segment_dist(p, a, b);
    let max = (p - a).norm().max((p - b).norm());
    (min, max)
}

/// Returns the endpoint of `a -> b` farther from `p`.
#[must_use]
pub fn farther_endpoint(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    if (p - a).norm_squared() >= (p - b).norm_squared() {
        *a
    } else {
        *b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TOL: f64 = 1e-10;

    // ── point_to_segment_dist tests ──

    #[test]
    fn segment_dist_perpendicular_projection() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let d = point_to_segment_dist(
            &Point2::new(1.0, 1.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert_abs_diff_eq!(d, 1.0, epsilon = TOL);
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        // Point (-1, 0) to segment (0,0)→(2,0). Closest at (0,0), dist = 1.
        let d = point_to_segment_dist(
            &Point2::new(-1.0, 0.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert_abs_diff_eq!(d, 1.0, epsilon = TOL);
    }

    #[test]
    fn segment_dist_degenerate() {
        let a = Point2::new(3.0, 4.0);
        let d = point_to_segment_dist(&Point2::origin(), &a, &a);
        assert_abs_diff_eq!(d, 5.0, epsilon = TOL);
    }

    // ── min/max tests ──

    #[test]
    fn min_max_foot_inside() {
        let (min, max) = point_to_segment_min_max(
            &Point2::new(0.0, 0.0),
            &Point2::new(-3.0, 4.0),
            &Point2::new(6.0, 4.0),
        );
        assert_abs_diff_eq!(min, 4.0, epsilon = TOL);
        assert_abs_diff_eq!(max, 52.0_f64.sqrt(), epsilon = TOL);
    }

    #[test]
    fn min_max_foot_outside() {
        let (min, max) = point_to_segment_min_max(
            &Point2::new(0.0, 0.0),
            &Point2::new(3.0, 4.0),
            &Point2::new(6.0, 8.0),
        );
        assert_abs_diff_eq!(min, 5.0, epsilon = TOL);
        assert_abs_diff_eq!(max, 10.0, epsilon = TOL);
    }

    #[test]
    fn farther_endpoint_picks_far_side() {
        let far = farther_endpoint(
            &Point2::origin(),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 5.0),
        );
        assert_eq!(far, Point2::new(0.0, 5.0));
    }
}
