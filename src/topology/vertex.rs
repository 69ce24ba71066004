use crate::math::Point2;

use super::half_edge::HalfEdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in a diagram.
    pub struct VertexId;
}

/// Data associated with a diagram vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The position of the vertex.
    pub point: Point2,
    /// One half-edge leaving this vertex.
    pub incident_edge: Option<HalfEdgeId>,
}

impl VertexData {
    /// Creates an isolated vertex at the given point.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            incident_edge: None,
        }
    }
}
