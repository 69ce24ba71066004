use crate::math::Point2;

use super::{Arc, Bezier, Circle, Curve, LineSegment, Polygon};

/// One drawable piece of output.
#[derive(Debug, Clone, PartialEq)]
pub enum PathElement {
    /// A straight segment.
    Segment(LineSegment),
    /// A circular arc.
    Arc(Arc),
    /// A full circle.
    Circle(Circle),
    /// A cubic Bézier piece.
    Bezier(Bezier),
    /// A closed polygon.
    Polygon(Polygon),
}

impl PathElement {
    /// First point of the element, if it has one.
    #[must_use]
    pub fn start_point(&self) -> Option<Point2> {
        match self {
            Self::Segment(s) => Some(s.start),
            Self::Arc(a) => Some(a.start_point()),
            Self::Circle(c) => Some(c.start_point()),
            Self::Bezier(b) => Some(b.p0),
            Self::Polygon(p) => p.points().first().copied(),
        }
    }
}

impl From<LineSegment> for PathElement {
    fn from(s: LineSegment) -> Self {
        Self::Segment(s)
    }
}

impl From<Arc> for PathElement {
    fn from(a: Arc) -> Self {
        Self::Arc(a)
    }
}

impl From<Circle> for PathElement {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Bezier> for PathElement {
    fn from(b: Bezier) -> Self {
        Self::Bezier(b)
    }
}

impl From<Polygon> for PathElement {
    fn from(p: Polygon) -> Self {
        Self::Polygon(p)
    }
}
