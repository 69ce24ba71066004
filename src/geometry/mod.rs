mod arc;
mod bezier;
mod circle;
mod half_plane;
mod line;
mod path;
mod polygon;
mod rectangle;
mod triangle;

pub use arc::Arc;
pub use bezier::Bezier;
pub use circle::Circle;
pub use half_plane::HalfPlane;
pub use line::{Line, LineSegment};
pub use path::PathElement;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use triangle::Triangle;

use crate::math::Point2;

/// Trait for parametric planar curves.
pub trait Curve {
    /// Evaluates the curve at parameter `t` in `[0, 1]`.
    fn point_at(&self, t: f64) -> Point2;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;

    /// Point at parameter 0.
    fn start_point(&self) -> Point2 {
        self.point_at(0.0)
    }

    /// Point at parameter 1.
    fn end_point(&self) -> Point2 {
        self.point_at(1.0)
    }
}

impl Curve for LineSegment {
    fn point_at(&self, t: f64) -> Point2 {
        self.start + (self.end - self.start) * t
    }

    fn is_closed(&self) -> bool {
        false
    }
}

impl Curve for Circle {
    fn point_at(&self, t: f64) -> Point2 {
        let angle = std::f64::consts::TAU * t;
        Point2::new(
            self.center().x + self.radius() * angle.cos(),
            self.center().y + self.radius() * angle.sin(),
        )
    }

    fn is_closed(&self) -> bool {
        true
    }
}
