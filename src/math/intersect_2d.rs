use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    if cross.abs() < f64::EPSILON * d1.norm().max(1.0) * d2.norm().max(1.0) {
        return None;
    }
    let d = p2 - p1;
    let t = d.perp(d2) / cross;
    let u = d.perp(d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Use a small epsilon to include endpoints.
    let eps = 1e-9;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Intersection parameters of the line `origin + t * dir` with a circle.
///
/// Returns zero, one (tangent) or two parameters in increasing order.
#[must_use]
pub fn line_circle_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    center: &Point2,
    radius: f64,
) -> Vec<f64> {
    let a = dir.norm_squared();
    if a < f64::EPSILON {
        return Vec::new();
    }
    // Substitute parametric line into circle equation:
    // |origin + t*dir - center|² = r²
    let f = origin - center;
    let b = 2.0 * f.dot(dir);
    let c = f.norm_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return Vec::new();
    }
    let disc_sqrt = discriminant.sqrt();
    if disc_sqrt < f64::EPSILON {
        // Tangent case: single root.
        return vec![-b / (2.0 * a)];
    }
    vec![(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
}

/// Centers of the circles of the given `radius` passing through both `p` and `q`.
///
/// Returns two centers, one center when `radius` equals half the chord, and
/// none when the chord is longer than the diameter or the points coincide.
#[must_use]
pub fn circle_centers_through_points(p: &Point2, q: &Point2, radius: f64) -> Vec<Point2> {
    let chord = q - p;
    let half = chord.norm() / 2.0;
    if half < f64::EPSILON || radius < half - TOLERANCE {
        return Vec::new();
    }
    let mid = nalgebra::center(p, q);
    let h = (radius * radius - half * half).max(0.0).sqrt();
    if h < TOLERANCE {
        return vec![mid];
    }
    let normal = Vector2::new(-chord.y, chord.x) / (2.0 * half);
    vec![mid + normal * h, mid - normal * h]
}
