use crate::math::Point2;

use super::half_edge::HalfEdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a face (a site's region) in a diagram.
    pub struct FaceId;
}

/// Data associated with a diagram face.
///
/// Every face belongs to exactly one input site, its `center`.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The site owning this region.
    pub center: Point2,
    /// One half-edge on the outer boundary.
    pub outer_component: Option<HalfEdgeId>,
    /// One half-edge per hole boundary.
    pub inner_components: Vec<HalfEdgeId>,
}

impl FaceData {
    /// Creates a face for the given site with no boundary yet.
    #[must_use]
    pub fn new(center: Point2) -> Self {
        Self {
            center,
            outer_component: None,
            inner_components: Vec::new(),
        }
    }
}
