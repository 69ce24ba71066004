pub mod arc_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

use std::cmp::Ordering;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global tolerance for floating-point comparisons.
///
/// Sweep-line and circumcircle arithmetic routinely produces values that
/// differ only by rounding noise; values closer than this compare equal.
pub const TOLERANCE: f64 = 1e-5;

/// Sentinel standing in for unbounded distances and ray lengths.
///
/// Values at or beyond `INFINITY / 2` are classified as effectively
/// unbounded, so input coordinates must stay well below this magnitude.
pub const INFINITY: f64 = 1e6;

/// Largest accepted input coordinate magnitude.
pub const MAX_COORDINATE: f64 = INFINITY / 10.0;

/// Three-way comparison treating `|x - y| < TOLERANCE` as equal.
#[must_use]
pub fn compare_with_tolerance(x: f64, y: f64) -> Ordering {
    compare_with(x, y, TOLERANCE)
}

/// Three-way comparison treating `|x - y| < tol` as equal.
///
/// Identical values (including equal infinities) are always equal.
#[must_use]
pub fn compare_with(x: f64, y: f64, tol: f64) -> Ordering {
    if x == y || (x - y).abs() < tol {
        Ordering::Equal
    } else if x < y {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Returns `true` if `value` is at or beyond half the [`INFINITY`] sentinel.
#[must_use]
pub fn is_effectively_infinite(value: f64) -> bool {
    value.abs() >= INFINITY / 2.0
}

/// Lexicographic (x, then y) comparison of two points under tolerance.
#[must_use]
pub fn compare_points(a: &Point2, b: &Point2) -> Ordering {
    compare_with_tolerance(a.x, b.x).then_with(|| compare_with_tolerance(a.y, b.y))
}

/// Returns `true` if both coordinates agree within tolerance.
#[must_use]
pub fn points_equal(a: &Point2, b: &Point2) -> bool {
    compare_points(a, b) == Ordering::Equal
}

/// Orientation determinant of the turn `a -> b -> c`.
///
/// Positive for a left (counter-clockwise) turn, negative for a right
/// (clockwise) turn and zero for collinear points.
#[must_use]
pub fn orientation(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b - a).perp(&(c - b))
}

/// Rotates `v` by 90 degrees clockwise.
#[must_use]
pub fn perp_cw(v: &Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}

/// Rotates `v` by 90 degrees counter-clockwise.
#[must_use]
pub fn perp_ccw(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Rotates `v` clockwise by `angle` radians.
#[must_use]
pub fn rotate_cw(v: &Vector2, angle: f64) -> Vector2 {
    nalgebra::Rotation2::new(-angle) * v
}

/// Normalizes `v`, returning `None` for a zero-length vector.
#[must_use]
pub fn normalized(v: &Vector2) -> Option<Vector2> {
    let len = v.norm();
    if len < f64::EPSILON {
        None
    } else {
        Some(v / len)
    }
}

/// Angle of `v` measured counter-clockwise from the positive x axis.
#[must_use]
pub fn angle_of(v: &Vector2) -> f64 {
    v.y.atan2(v.x)
}

/// Unsigned angle at `vertex` between the rays towards `a` and `b`, in `[0, pi]`.
#[must_use]
pub fn angle_at(vertex: &Point2, a: &Point2, b: &Point2) -> f64 {
    let u = a - vertex;
    let v = b - vertex;
    u.perp(&v).abs().atan2(u.dot(&v))
}
