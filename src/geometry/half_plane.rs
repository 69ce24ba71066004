use crate::error::Result;
use crate::math::{Point2, Vector2, TOLERANCE};

use super::Line;

/// The closed region on the left of a directed boundary line.
///
/// Unbounded alpha discs degenerate into half-planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane {
    boundary: Line,
}

impl HalfPlane {
    /// Half-plane on the left of the line through `point` along `direction`.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction is zero-length.
    pub fn new(point: Point2, direction: Vector2) -> Result<Self> {
        Ok(Self {
            boundary: Line::new(point, direction)?,
        })
    }

    /// Half-plane bounded by the line through `a` and `b` that contains `inside`.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` and `b` coincide.
    pub fn bounded_by(a: Point2, b: Point2, inside: &Point2) -> Result<Self> {
        let hp = Self::new(a, b - a)?;
        if hp.boundary.signed_distance(inside) < 0.0 {
            Self::new(b, a - b)
        } else {
            Ok(hp)
        }
    }

    /// Returns the directed boundary line.
    #[must_use]
    pub fn boundary(&self) -> &Line {
        &self.boundary
    }

    /// Returns `true` if `p` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        self.boundary.signed_distance(p) >= -TOLERANCE
    }
}
