pub mod face;
pub mod half_edge;
pub mod vertex;

pub use face::{FaceData, FaceId};
pub use half_edge::{HalfEdgeData, HalfEdgeId};
pub use vertex::{VertexData, VertexId};

use crate::error::TopologyError;
use crate::geometry::LineSegment;
use crate::math::{points_equal, Point2};
use slotmap::SlotMap;
use tracing::{debug, trace};

/// Doubly connected edge list holding one planar subdivision.
///
/// Entities reference each other via typed IDs (generational indices), so
/// the cyclic next/prev/twin graph can be relinked freely while a diagram is
/// being swept. Vertex coordinates and face centers act as keys: the `get_*`
/// lookups reuse an existing entity within [`TOLERANCE`](crate::math::TOLERANCE)
/// instead of duplicating it.
#[derive(Debug, Default, Clone)]
pub struct Dcel {
    vertices: SlotMap<VertexId, VertexData>,
    faces: SlotMap<FaceId, FaceData>,
    half_edges: SlotMap<HalfEdgeId, HalfEdgeData>,
}

impl Dcel {
    /// Creates a new, empty diagram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a new vertex and returns its ID.
    pub fn add_vertex(&mut self, point: Point2) -> VertexId {
        self.vertices.insert(VertexData::new(point))
    }

    /// Finds the vertex at `point`, within tolerance.
    #[must_use]
    pub fn find_vertex(&self, point: &Point2) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|(_, v)| points_equal(&v.point, point))
            .map(|(id, _)| id)
    }

    /// Returns the vertex at `point`, creating it if absent.
    pub fn get_vertex(&mut self, point: Point2) -> VertexId {
        match self.find_vertex(&point) {
            Some(id) => id,
            None => self.add_vertex(point),
        }
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the diagram.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Returns a mutable reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the diagram.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData, TopologyError> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // --- Face operations ---

    /// Inserts a new face for the site `center` and returns its ID.
    pub fn add_face(&mut self, center: Point2) -> FaceId {
        self.faces.insert(FaceData::new(center))
    }

    /// Finds the face whose site is `center`, within tolerance.
    #[must_use]
    pub fn find_face(&self, center: &Point2) -> Option<FaceId> {
        self.faces
            .iter()
            .find(|(_, f)| points_equal(&f.center, center))
            .map(|(id, _)| id)
    }

    /// Returns the face for the site `center`, creating it if absent.
    pub fn get_face(&mut self, center: Point2) -> FaceId {
        match self.find_face(&center) {
            Some(id) => id,
            None => self.add_face(center),
        }
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the diagram.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Returns a mutable reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the diagram.
    pub fn face_mut(&mut self, id: FaceId) -> Result<&mut FaceData, TopologyError> {
        self.faces
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Iterates over all faces.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &FaceData)> {
        self.faces.iter()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    // --- Half-edge operations ---

    /// Allocates a twinned pair of half-edges bounding `face` and `twin_face`.
    ///
    /// A face without an outer component adopts its new half-edge.
    pub fn add_half_edge_pair(
        &mut self,
        face: Option<FaceId>,
        twin_face: Option<FaceId>,
    ) -> (HalfEdgeId, HalfEdgeId) {
        let a = self.half_edges.insert(HalfEdgeData::unlinked(face));
        let b = self.half_edges.insert(HalfEdgeData {
            twin: a,
            ..HalfEdgeData::unlinked(twin_face)
        });
        self.half_edges[a].twin = b;
        for (he, f) in [(a, face), (b, twin_face)] {
            if let Some(fd) = f.and_then(|f| self.faces.get_mut(f)) {
                fd.outer_component.get_or_insert(he);
            }
        }
        (a, b)
    }

    /// Returns a reference to the half-edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the diagram.
    pub fn half_edge(&self, id: HalfEdgeId) -> Result<&HalfEdgeData, TopologyError> {
        self.half_edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("half-edge".into()))
    }

    /// Returns a mutable reference to the half-edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the diagram.
    pub fn half_edge_mut(&mut self, id: HalfEdgeId) -> Result<&mut HalfEdgeData, TopologyError> {
        self.half_edges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("half-edge".into()))
    }

    /// Iterates over all half-edges.
    pub fn half_edges(&self) -> impl Iterator<Item = (HalfEdgeId, &HalfEdgeData)> {
        self.half_edges.iter()
    }

    /// Number of half-edges.
    #[must_use]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.half_edges.len() / 2
    }

    /// Returns the twin of a half-edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge is not found.
    pub fn twin(&self, id: HalfEdgeId) -> Result<HalfEdgeId, TopologyError> {
        Ok(self.half_edge(id)?.twin)
    }

    /// Position of a half-edge's origin, if assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge or its origin vertex is not found.
    pub fn origin_point(&self, id: HalfEdgeId) -> Result<Option<Point2>, TopologyError> {
        match self.half_edge(id)?.origin {
            Some(v) => Ok(Some(self.vertex(v)?.point)),
            None => Ok(None),
        }
    }

    /// Both endpoints of a half-edge.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::MissingOrigin`] if either end is unassigned.
    pub fn endpoints(&self, id: HalfEdgeId) -> Result<(Point2, Point2), TopologyError> {
        let start = self
            .origin_point(id)?
            .ok_or_else(|| TopologyError::MissingOrigin(format!("{id:?}")))?;
        let twin = self.twin(id)?;
        let end = self
            .origin_point(twin)?
            .ok_or_else(|| TopologyError::MissingOrigin(format!("{twin:?}")))?;
        Ok((start, end))
    }

    /// Assigns the origin of a half-edge.
    ///
    /// # Errors
    ///
    /// Returns an error if either entity is not found.
    pub fn set_origin(&mut self, he: HalfEdgeId, vertex: VertexId) -> Result<(), TopologyError> {
        self.vertex_mut(vertex)?.incident_edge.get_or_insert(he);
        self.half_edge_mut(he)?.origin = Some(vertex);
        Ok(())
    }

    /// Links `from.next = to` and `to.prev = from`.
    ///
    /// # Errors
    ///
    /// Returns an error if either half-edge is not found.
    pub fn link(&mut self, from: HalfEdgeId, to: HalfEdgeId) -> Result<(), TopologyError> {
        self.half_edge(to)?;
        self.half_edge_mut(from)?.next = Some(to);
        self.half_edge_mut(to)?.prev = Some(from);
        Ok(())
    }

    /// Finds the half-edge running from `from` to `to`.
    #[must_use]
    pub fn get_half_edge(&self, from: &Point2, to: &Point2) -> Option<HalfEdgeId> {
        self.half_edges
            .keys()
            .find(|&id| {
                self.endpoints(id)
                    .is_ok_and(|(a, b)| points_equal(&a, from) && points_equal(&b, to))
            })
    }

    /// One segment per undirected edge.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::MissingOrigin`] if any edge is still open.
    pub fn line_segments(&self) -> Result<Vec<LineSegment>, TopologyError> {
        self.half_edges
            .iter()
            .filter(|(id, he)| *id < he.twin)
            .map(|(id, _)| {
                let (a, b) = self.endpoints(id)?;
                Ok(LineSegment::new(a, b))
            })
            .collect()
    }

    /// The half-edge cycle of a face, starting at its outer component.
    ///
    /// # Errors
    ///
    /// Returns an error if the boundary is open or does not return to its start.
    pub fn face_boundary(&self, face: FaceId) -> Result<Vec<HalfEdgeId>, TopologyError> {
        let Some(start) = self.face(face)?.outer_component else {
            return Ok(Vec::new());
        };
        let mut cycle = vec![start];
        let mut cur = start;
        loop {
            let next = self
                .half_edge(cur)?
                .next
                .ok_or_else(|| TopologyError::InvalidTopology("open face boundary".into()))?;
            if next == start {
                return Ok(cycle);
            }
            if cycle.len() >= self.half_edges.len() {
                return Err(TopologyError::InvalidTopology(
                    "face boundary does not close".into(),
                ));
            }
            cycle.push(next);
            cur = next;
        }
    }

    /// Removes every edge whose endpoints coincide, merging the endpoints.
    ///
    /// Returns the number of removed edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge links are inconsistent.
    pub fn remove_zero_length_edges(&mut self) -> Result<usize, TopologyError> {
        let degenerate: Vec<HalfEdgeId> = self
            .half_edges
            .iter()
            .filter(|(id, he)| *id < he.twin)
            .filter(|(id, _)| {
                self.endpoints(*id)
                    .is_ok_and(|(a, b)| points_equal(&a, &b))
            })
            .map(|(id, _)| id)
            .collect();

        for &he in &degenerate {
            let twin = self.twin(he)?;
            self.unchain(he)?;
            self.unchain(twin)?;

            let keep = self.half_edge(he)?.origin;
            let drop = self.half_edge(twin)?.origin;
            if let (Some(keep), Some(drop)) = (keep, drop) {
                if keep != drop {
                    for data in self.half_edges.values_mut() {
                        if data.origin == Some(drop) {
                            data.origin = Some(keep);
                        }
                    }
                    self.vertices.remove(drop);
                }
            }
            self.half_edges.remove(he);
            self.half_edges.remove(twin);
            trace!(?he, ?twin, "removed zero-length edge");
        }

        if !degenerate.is_empty() {
            self.refresh_incident_edges();
        }
        debug!(removed = degenerate.len(), "pruned zero-length edges");
        Ok(degenerate.len())
    }

    /// Closes every face whose boundary is a set of open chains.
    ///
    /// Each chain ends with a half-edge running out to infinity and starts
    /// with one coming back; the ends are linked so the boundary becomes a
    /// single cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if a chain loops without ever ending.
    pub fn close_open_boundaries(&mut self) -> Result<(), TopologyError> {
        let face_ids: Vec<FaceId> = self.faces.keys().collect();
        for face in face_ids {
            let heads: Vec<HalfEdgeId> = self
                .half_edges
                .iter()
                .filter(|(_, he)| he.face == Some(face) && he.prev.is_none())
                .map(|(id, _)| id)
                .collect();
            if heads.is_empty() {
                continue;
            }
            let mut tails = Vec::with_capacity(heads.len());
            for &head in &heads {
                let mut cur = head;
                let mut steps = 0;
                while let Some(next) = self.half_edge(cur)?.next {
                    cur = next;
                    steps += 1;
                    if steps > self.half_edges.len() {
                        return Err(TopologyError::InvalidTopology(
                            "open chain does not end".into(),
                        ));
                    }
                }
                tails.push(cur);
            }
            for (i, &tail) in tails.iter().enumerate() {
                self.link(tail, heads[(i + 1) % heads.len()])?;
            }
            let fd = self.face_mut(face)?;
            fd.outer_component.get_or_insert(heads[0]);
            trace!(?face, chains = heads.len(), "closed face boundary");
        }
        Ok(())
    }

    /// Validates the half-edge structure.
    ///
    /// Checks that twins are mutual, next/prev links agree and stay within one
    /// face, every face boundary is a closed cycle, and vertex back-references
    /// point at half-edges leaving that vertex.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidTopology`] describing the first violation.
    pub fn check_integrity(&self) -> Result<(), TopologyError> {
        let invalid = |msg: &str| Err(TopologyError::InvalidTopology(msg.into()));
        for (id, he) in &self.half_edges {
            let twin = self.half_edge(he.twin)?;
            if he.twin == id || twin.twin != id {
                return invalid("twin links are not mutual");
            }
            if let Some(next) = he.next {
                let nd = self.half_edge(next)?;
                if nd.prev != Some(id) {
                    return invalid("next/prev links disagree");
                }
                if nd.face != he.face {
                    return invalid("boundary cycle changes face");
                }
            }
            if let Some(prev) = he.prev {
                if self.half_edge(prev)?.next != Some(id) {
                    return invalid("prev/next links disagree");
                }
            }
            if let Some(origin) = he.origin {
                self.vertex(origin)?;
            }
        }
        for (fid, _) in &self.faces {
            for he in self.face_boundary(fid)? {
                if self.half_edge(he)?.face != Some(fid) {
                    return invalid("face boundary holds a foreign half-edge");
                }
            }
        }
        for (_, v) in &self.vertices {
            if let Some(he) = v.incident_edge {
                let origin = self.half_edge(he)?.origin;
                if origin.and_then(|o| self.vertices.get(o)).map(|o| o.point) != Some(v.point) {
                    return invalid("vertex incident edge leaves another vertex");
                }
            }
        }
        Ok(())
    }

    /// Detaches a half-edge from its boundary cycle.
    fn unchain(&mut self, he: HalfEdgeId) -> Result<(), TopologyError> {
        let data = self.half_edge(he)?.clone();
        let prev = data.prev.filter(|&p| p != he);
        let next = data.next.filter(|&n| n != he);
        if let Some(p) = prev {
            self.half_edge_mut(p)?.next = next;
        }
        if let Some(n) = next {
            self.half_edge_mut(n)?.prev = prev;
        }
        if let Some(face) = data.face {
            let fd = self.face_mut(face)?;
            if fd.outer_component == Some(he) {
                fd.outer_component = next.or(prev);
            }
            fd.inner_components.retain(|&c| c != he);
        }
        let data = self.half_edge_mut(he)?;
        data.next = None;
        data.prev = None;
        Ok(())
    }

    fn refresh_incident_edges(&mut self) {
        for v in self.vertices.values_mut() {
            v.incident_edge = None;
        }
        for (id, he) in &self.half_edges {
            if let Some(v) = he.origin.and_then(|o| self.vertices.get_mut(o)) {
                v.incident_edge.get_or_insert(id);
            }
        }
        self.vertices.retain(|_, v| v.incident_edge.is_some());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Triangle a(0,0), b(4,0), c(0,4) with an inner face and an unowned outside.
    fn triangle() -> (Dcel, FaceId, [HalfEdgeId; 3]) {
        let mut d = Dcel::new();
        let f = d.add_face(Point2::new(1.0, 1.0));
        let a = d.get_vertex(Point2::new(0.0, 0.0));
        let b = d.get_vertex(Point2::new(4.0, 0.0));
        let c = d.get_vertex(Point2::new(0.0, 4.0));
        let (ab, ba) = d.add_half_edge_pair(Some(f), None);
        let (bc, cb) = d.add_half_edge_pair(Some(f), None);
        let (ca, ac) = d.add_half_edge_pair(Some(f), None);
        for (he, v) in [(ab, a), (ba, b), (bc, b), (cb, c), (ca, c), (ac, a)] {
            d.set_origin(he, v).unwrap();
        }
        d.link(ab, bc).unwrap();
        d.link(bc, ca).unwrap();
        d.link(ca, ab).unwrap();
        d.link(ac, cb).unwrap();
        d.link(cb, ba).unwrap();
        d.link(ba, ac).unwrap();
        (d, f, [ab, bc, ca])
    }

    #[test]
    fn vertices_and_faces_are_keyed_by_position() {
        let mut d = Dcel::new();
        let v = d.get_vertex(Point2::new(1.0, 2.0));
        assert_eq!(d.get_vertex(Point2::new(1.0 + 1e-7, 2.0)), v);
        assert_ne!(d.get_vertex(Point2::new(1.1, 2.0)), v);
        let f = d.get_face(Point2::new(5.0, 5.0));
        assert_eq!(d.get_face(Point2::new(5.0, 5.0)), f);
        assert_eq!(d.vertex_count(), 2);
        assert_eq!(d.face_count(), 1);
    }

    #[test]
    fn twins_are_mutual() {
        let mut d = Dcel::new();
        let (a, b) = d.add_half_edge_pair(None, None);
        assert_eq!(d.twin(a).unwrap(), b);
        assert_eq!(d.twin(b).unwrap(), a);
        assert_eq!(d.edge_count(), 1);
    }

    #[test]
    fn triangle_is_consistent() {
        let (d, f, [ab, bc, ca]) = triangle();
        d.check_integrity().unwrap();
        assert_eq!(d.face_boundary(f).unwrap(), vec![ab, bc, ca]);
        assert_eq!(d.line_segments().unwrap().len(), 3);
        let found = d.get_half_edge(&Point2::new(0.0, 0.0), &Point2::new(4.0, 0.0));
        assert_eq!(found, Some(ab));
    }

    #[test]
    fn open_edge_has_no_segment() {
        let mut d = Dcel::new();
        let (a, _) = d.add_half_edge_pair(None, None);
        let v = d.add_vertex(Point2::origin());
        d.set_origin(a, v).unwrap();
        assert!(matches!(
            d.line_segments(),
            Err(TopologyError::MissingOrigin(_))
        ));
    }

    #[test]
    fn zero_length_edge_is_pruned() {
        let mut d = Dcel::new();
        let f = d.add_face(Point2::new(1.0, 1.0));
        let a = d.add_vertex(Point2::new(0.0, 0.0));
        let b = d.add_vertex(Point2::new(4.0, 0.0));
        let b2 = d.add_vertex(Point2::new(4.0, 1e-7));
        let c = d.add_vertex(Point2::new(0.0, 4.0));
        let (ab, ba) = d.add_half_edge_pair(Some(f), None);
        let (bb, bb_twin) = d.add_half_edge_pair(Some(f), None);
        let (bc, cb) = d.add_half_edge_pair(Some(f), None);
        let (ca, ac) = d.add_half_edge_pair(Some(f), None);
        for (he, v) in [
            (ab, a),
            (ba, b),
            (bb, b),
            (bb_twin, b2),
            (bc, b2),
            (cb, c),
            (ca, c),
            (ac, a),
        ] {
            d.set_origin(he, v).unwrap();
        }
        d.link(ab, bb).unwrap();
        d.link(bb, bc).unwrap();
        d.link(bc, ca).unwrap();
        d.link(ca, ab).unwrap();
        d.link(ac, cb).unwrap();
        d.link(cb, bb_twin).unwrap();
        d.link(bb_twin, ba).unwrap();
        d.link(ba, ac).unwrap();
        d.check_integrity().unwrap();

        assert_eq!(d.remove_zero_length_edges().unwrap(), 1);
        d.check_integrity().unwrap();
        assert_eq!(d.vertex_count(), 3);
        assert_eq!(d.face_boundary(f).unwrap().len(), 3);
        let segments = d.line_segments().unwrap();
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| !s.is_degenerate()));
    }

    #[test]
    fn open_chains_are_closed() {
        let mut d = Dcel::new();
        let p = d.add_face(Point2::new(0.0, 0.0));
        let q = d.add_face(Point2::new(2.0, 0.0));
        let (e, t) = d.add_half_edge_pair(Some(q), Some(p));
        let top = d.add_vertex(Point2::new(1.0, 1e6));
        let bottom = d.add_vertex(Point2::new(1.0, -1e6));
        d.set_origin(e, top).unwrap();
        d.set_origin(t, bottom).unwrap();
        assert!(d.face_boundary(p).is_err());

        d.close_open_boundaries().unwrap();
        d.check_integrity().unwrap();
        assert_eq!(d.face_boundary(p).unwrap(), vec![t]);
        assert_eq!(d.face_boundary(q).unwrap(), vec![e]);
    }
}
