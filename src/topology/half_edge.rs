use super::face::FaceId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a half-edge in a diagram.
    pub struct HalfEdgeId;
}

/// A directed half-edge.
///
/// Half-edges always come in twinned pairs. While a diagram is under
/// construction the origin, links and face may still be unknown.
#[derive(Debug, Clone)]
pub struct HalfEdgeData {
    /// Vertex this half-edge leaves from.
    pub origin: Option<VertexId>,
    /// The oppositely oriented half-edge of the same edge.
    pub twin: HalfEdgeId,
    /// Next half-edge around `face`.
    pub next: Option<HalfEdgeId>,
    /// Previous half-edge around `face`.
    pub prev: Option<HalfEdgeId>,
    /// Face bounded by this half-edge.
    pub face: Option<FaceId>,
}

impl HalfEdgeData {
    pub(crate) fn unlinked(face: Option<FaceId>) -> Self {
        Self {
            origin: None,
            twin: HalfEdgeId::default(),
            next: None,
            prev: None,
            face,
        }
    }
}
