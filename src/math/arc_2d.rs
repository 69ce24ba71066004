/// 2D arc math utilities.
///
/// Arcs are described by center, radius, start angle and signed sweep:
/// - `sweep > 0`: counter-clockwise arc
/// - `sweep < 0`: clockwise arc
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::{Point2, Vector2};

/// Normalizes an angle into `(-pi, pi]`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Checks if an angle falls within an arc's angular range.
#[must_use]
pub fn angle_in_sweep(angle: f64, start_angle: f64, sweep: f64) -> bool {
    let eps = 1e-10;
    let mut delta = angle - start_angle;

    if sweep > 0.0 {
        while delta < -eps {
            delta += TAU;
        }
        while delta > TAU + eps {
            delta -= TAU;
        }
        delta >= -eps && delta <= sweep + eps
    } else {
        while delta > eps {
            delta -= TAU;
        }
        while delta < -TAU - eps {
            delta += TAU;
        }
        delta <= eps && delta >= sweep - eps
    }
}

/// Maps an absolute angle to the arc parameter in `[0, 1]`, if it lies on the arc.
#[must_use]
pub fn angle_to_arc_param(angle: f64, start_angle: f64, sweep: f64) -> Option<f64> {
    if sweep.abs() < f64::EPSILON || !angle_in_sweep(angle, start_angle, sweep) {
        return None;
    }
    let mut delta = angle - start_angle;
    if sweep > 0.0 {
        while delta < 0.0 {
            delta += TAU;
        }
    } else {
        while delta > 0.0 {
            delta -= TAU;
        }
    }
    Some((delta / sweep).clamp(0.0, 1.0))
}

/// Cubic Bézier control points approximating an arc.
///
/// The arc is split into pieces of at most 90 degrees; each piece yields
/// `[p0, c1, c2, p3]`.
#[must_use]
pub fn arc_to_cubic_pieces(
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> Vec<[Point2; 4]> {
    if radius <= 0.0 || sweep.abs() < f64::EPSILON {
        return Vec::new();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    #[allow(clippy::cast_precision_loss)]
    let step = sweep / count as f64;
    // Control distance for a circular piece of angle `step`.
    let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;

    (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let a0 = start_angle + step * i as f64;
            let a1 = a0 + step;
            let p0 = arc_point_at(center, radius, a0, 1.0, 0.0);
            let p3 = arc_point_at(center, radius, a1, 1.0, 0.0);
            let t0 = Vector2::new(-a0.sin(), a0.cos());
            let t1 = Vector2::new(-a1.sin(), a1.cos());
            [p0, p0 + t0 * k, p3 - t1 * k, p3]
        })
        .collect()
}
