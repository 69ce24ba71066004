use std::cell::OnceCell;

use crate::math::{angle_at, Point2};

use super::Circle;

/// Three points with a lazily computed circumcircle and middle angle.
///
/// For collinear points the circumcircle falls back to the circle on the
/// longest pair as diameter.
#[derive(Debug, Clone)]
pub struct Triangle {
    a: Point2,
    b: Point2,
    c: Point2,
    circle: OnceCell<Circle>,
    middle_angle: OnceCell<f64>,
}

impl Triangle {
    /// Creates a triangle `a, b, c` where `b` is the middle vertex.
    #[must_use]
    pub fn new(a: Point2, b: Point2, c: Point2) -> Self {
        Self {
            a,
            b,
            c,
            circle: OnceCell::new(),
            middle_angle: OnceCell::new(),
        }
    }

    /// Returns the vertices in order.
    #[must_use]
    pub fn points(&self) -> [Point2; 3] {
        [self.a, self.b, self.c]
    }

    /// Circumcircle, computed on first access.
    #[must_use]
    pub fn circumcircle(&self) -> &Circle {
        self.circle.get_or_init(|| {
            Circle::through_three_points(&self.a, &self.b, &self.c).unwrap_or_else(|| {
                let pairs = [(self.a, self.b), (self.b, self.c), (self.a, self.c)];
                let (p, q) = pairs
                    .into_iter()
                    .fold((self.a, self.a), |best, pair| {
                        if (pair.1 - pair.0).norm() > (best.1 - best.0).norm() {
                            pair
                        } else {
                            best
                        }
                    });
                Circle::with_diameter(&p, &q)
            })
        })
    }

    /// Circumradius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.circumcircle().radius()
    }

    /// Interior angle at the middle vertex `b`, in `[0, pi]`.
    #[must_use]
    pub fn middle_angle(&self) -> f64 {
        *self
            .middle_angle
            .get_or_init(|| angle_at(&self.b, &self.a, &self.c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn right_angle_in_middle() {
        let t = Triangle::new(
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 3.0),
        );
        assert_abs_diff_eq!(t.middle_angle(), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(t.radius(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn collinear_falls_back_to_longest_pair() {
        let t = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(4.0, 0.0),
        );
        assert_abs_diff_eq!(t.radius(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.circumcircle().center().x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.middle_angle(), PI, epsilon = 1e-12);
    }
}
