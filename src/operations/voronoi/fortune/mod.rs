//! Fortune's sweep-line construction of the nearest-point Voronoi diagram.
//!
//! The sweep line moves downward (decreasing y). Sites above it are
//! enclosed by the beach line, a sequence of parabolic arcs separated by
//! breakpoints that trace the Voronoi edges. Every run owns its own
//! [`SweepState`]; nothing is shared between calls.

mod beach_line;
mod events;

use std::cmp::Ordering;

use slotmap::SlotMap;
use tracing::{debug, instrument, trace};

use crate::error::{DiagramError, Result};
use crate::geometry::Circle;
use crate::math::{
    compare_points, compare_with_tolerance, is_effectively_infinite, orientation, points_equal,
    Point2, INFINITY,
};
use crate::topology::{Dcel, HalfEdgeId};
use crate::tree::Tree;

use beach_line::{
    breakpoint_direction, ArcData, ArcId, BeachLineNode, BeachOrder, BreakpointData,
    BreakpointId,
};
use events::{event_order, EventKind, SweepEvent};

/// Builds the nearest-point Voronoi diagram of a point set.
///
/// Every face of the resulting [`Dcel`] is centered on one distinct input
/// site. Unbounded edges end at vertices `INFINITY` away, and every face
/// boundary is closed into a cycle.
pub struct Fortune<'a> {
    sites: &'a [Point2],
}

impl<'a> Fortune<'a> {
    /// Creates a new `Fortune` operation.
    #[must_use]
    pub fn new(sites: &'a [Point2]) -> Self {
        Self { sites }
    }

    /// Executes the sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge structure becomes inconsistent.
    #[instrument(skip(self), fields(sites = self.sites.len()))]
    pub fn execute(&self) -> Result<Dcel> {
        let mut state = SweepState::default();
        state.run(self.sites)?;
        let dcel = state.finish()?;
        debug!(
            faces = dcel.face_count(),
            edges = dcel.edge_count(),
            vertices = dcel.vertex_count(),
            "nearest-point diagram built"
        );
        Ok(dcel)
    }
}

/// Working state of one sweep.
#[derive(Default)]
struct SweepState {
    dcel: Dcel,
    arcs: SlotMap<ArcId, ArcData>,
    breakpoints: SlotMap<BreakpointId, BreakpointData>,
    queue: Tree<SweepEvent>,
    beach_line: Tree<BeachLineNode>,
    sweep_y: f64,
    serial: u64,
}

impl SweepState {
    fn next_serial(&mut self) -> u64 {
        self.serial += 1;
        self.serial
    }

    fn order(&self) -> BeachOrder<'_> {
        BeachOrder {
            arcs: &self.arcs,
            breakpoints: &self.breakpoints,
            sweep_y: self.sweep_y,
        }
    }

    fn run(&mut self, sites: &[Point2]) -> Result<()> {
        let mut sorted = sites.to_vec();
        sorted.sort_by(compare_points);
        sorted.dedup_by(|a, b| points_equal(a, b));
        for site in sorted {
            let serial = self.next_serial();
            self.queue.insert(SweepEvent::site(site, serial), event_order);
        }

        while let Some(event) = self.queue.delete_min() {
            self.sweep_y = event.point.y;
            match event.kind {
                EventKind::Site => self.handle_site(event.point)?,
                EventKind::Circle { arc, center } => {
                    self.handle_circle(arc, center, event.serial)?;
                }
            }
        }
        Ok(())
    }

    fn insert_node(&mut self, node: BeachLineNode) {
        let order = BeachOrder {
            arcs: &self.arcs,
            breakpoints: &self.breakpoints,
            sweep_y: self.sweep_y,
        };
        self.beach_line.insert(node, |a, b| order.compare(*a, *b));
    }

    fn remove_node(&mut self, node: BeachLineNode) -> bool {
        let order = BeachOrder {
            arcs: &self.arcs,
            breakpoints: &self.breakpoints,
            sweep_y: self.sweep_y,
        };
        self.beach_line
            .delete(|n| order.compare(node, *n))
            .is_some()
    }

    /// Rebuilds the beach-line tree from the arc/breakpoint links.
    fn rebuild_beach_line(&mut self) {
        let mut rebuilt = Tree::new();
        let mut cur = self
            .arcs
            .iter()
            .find(|(_, a)| a.left.is_none())
            .map(|(id, _)| id);
        while let Some(arc) = cur {
            rebuilt.insert(BeachLineNode::Arc(arc), |_, _| Ordering::Greater);
            cur = self.arcs[arc].right.map(|bp| {
                rebuilt.insert(BeachLineNode::Breakpoint(bp), |_, _| Ordering::Greater);
                self.breakpoints[bp].right
            });
            if rebuilt.len() > self.arcs.len() + self.breakpoints.len() {
                break;
            }
        }
        trace!(nodes = rebuilt.len(), "beach line rebuilt from links");
        self.beach_line = rebuilt;
    }

    fn new_breakpoint(&mut self, left: ArcId, right: ArcId, edge: HalfEdgeId) -> BreakpointId {
        let serial = self.next_serial();
        let bp = self.breakpoints.insert(BreakpointData {
            left,
            right,
            edge,
            serial,
        });
        self.arcs[left].right = Some(bp);
        self.arcs[right].left = Some(bp);
        bp
    }

    fn handle_site(&mut self, site: Point2) -> Result<()> {
        trace!(x = site.x, y = site.y, "site event");
        let order = self.order();
        let found = self
            .beach_line
            .get_closest(|n| order.locate(&site, *n))
            .copied();
        let target = match found {
            None => {
                let face = self.dcel.get_face(site);
                let arc = self.arcs.insert(ArcData::new(site, face));
                self.insert_node(BeachLineNode::Arc(arc));
                return Ok(());
            }
            Some(BeachLineNode::Arc(arc)) => arc,
            Some(BeachLineNode::Breakpoint(bp)) => {
                if order.locate(&site, BeachLineNode::Breakpoint(bp)) == Ordering::Less {
                    self.breakpoints[bp].left
                } else {
                    self.breakpoints[bp].right
                }
            }
        };

        let arc = &self.arcs[target];
        if compare_with_tolerance(arc.site.y, self.sweep_y) == Ordering::Equal
            && arc.right.is_none()
        {
            self.append_arc(target, site)
        } else {
            self.split_arc(target, site);
            Ok(())
        }
    }

    /// Sites level with the rightmost arc's site extend the beach line to
    /// the right, separated by a vertical breakpoint.
    fn append_arc(&mut self, target: ArcId, site: Point2) -> Result<()> {
        let p = self.arcs[target].site;
        let face = self.dcel.get_face(site);
        let (edge, _) = self
            .dcel
            .add_half_edge_pair(Some(face), Some(self.arcs[target].face));
        let mid = nalgebra::center(&p, &site);
        let top = self
            .dcel
            .get_vertex(mid - breakpoint_direction(&p, &site) * INFINITY);
        self.dcel.set_origin(edge, top)?;

        let arc = self.arcs.insert(ArcData::new(site, face));
        let bp = self.new_breakpoint(target, arc, edge);
        self.insert_node(BeachLineNode::Breakpoint(bp));
        self.insert_node(BeachLineNode::Arc(arc));
        Ok(())
    }

    /// Splits the arc above `site` around a new arc for the site.
    fn split_arc(&mut self, target: ArcId, site: Point2) {
        let removed = self.remove_node(BeachLineNode::Arc(target));
        let Some(old) = self.arcs.remove(target) else {
            return;
        };

        let face = self.dcel.get_face(site);
        let (site_edge, old_edge) = self.dcel.add_half_edge_pair(Some(face), Some(old.face));

        let left = self.arcs.insert(ArcData {
            right: None,
            event: None,
            ..old.clone()
        });
        let mid = self.arcs.insert(ArcData::new(site, face));
        let right = self.arcs.insert(ArcData {
            left: None,
            event: None,
            ..old.clone()
        });
        if let Some(lb) = old.left {
            self.breakpoints[lb].right = left;
        }
        if let Some(rb) = old.right {
            self.breakpoints[rb].left = right;
        }
        let lbp = self.new_breakpoint(left, mid, site_edge);
        let rbp = self.new_breakpoint(mid, right, old_edge);

        if removed {
            for node in [
                BeachLineNode::Arc(left),
                BeachLineNode::Breakpoint(lbp),
                BeachLineNode::Arc(mid),
                BeachLineNode::Breakpoint(rbp),
                BeachLineNode::Arc(right),
            ] {
                self.insert_node(node);
            }
        } else {
            self.rebuild_beach_line();
        }

        self.check_circle_event(left);
        self.check_circle_event(right);
    }

    /// Queues the event at which `arc` would vanish, if its neighbours converge.
    fn check_circle_event(&mut self, arc: ArcId) {
        let data = &self.arcs[arc];
        let (Some(lb), Some(rb)) = (data.left, data.right) else {
            return;
        };
        let a = self.arcs[self.breakpoints[lb].left].site;
        let b = data.site;
        let c = self.arcs[self.breakpoints[rb].right].site;
        if points_equal(&a, &c) {
            return;
        }
        if compare_with_tolerance(orientation(&a, &b, &c), 0.0) != Ordering::Less {
            return;
        }
        let Some(circle) = Circle::through_three_points(&a, &b, &c) else {
            return;
        };
        let serial = self.next_serial();
        let event = SweepEvent::circle(arc, *circle.center(), circle.radius(), serial);
        if compare_with_tolerance(event.point.y, self.sweep_y) == Ordering::Greater {
            return;
        }
        trace!(serial, y = event.point.y, "circle event queued");
        self.arcs[arc].event = Some(serial);
        self.queue.insert(event, event_order);
    }

    fn handle_circle(&mut self, arc: ArcId, center: Point2, serial: u64) -> Result<()> {
        let Some(data) = self.arcs.get(arc) else {
            return Ok(());
        };
        if data.event != Some(serial) {
            trace!(serial, "stale circle event skipped");
            return Ok(());
        }
        let (Some(lb), Some(rb)) = (data.left, data.right) else {
            return Ok(());
        };
        trace!(serial, x = center.x, y = center.y, "circle event");
        let left = self.breakpoints[lb].left;
        let right = self.breakpoints[rb].right;

        let removed = self.remove_node(BeachLineNode::Arc(arc))
            & self.remove_node(BeachLineNode::Breakpoint(lb))
            & self.remove_node(BeachLineNode::Breakpoint(rb));

        let vertex = self.dcel.get_vertex(center);
        self.arcs[left].event = None;
        self.arcs[right].event = None;

        let left_edge = self.breakpoints[lb].edge;
        let right_edge = self.breakpoints[rb].edge;
        let left_twin = self.dcel.twin(left_edge)?;
        let right_twin = self.dcel.twin(right_edge)?;
        self.dcel.set_origin(left_twin, vertex)?;
        self.dcel.set_origin(right_twin, vertex)?;

        let (new_edge, new_twin) = self
            .dcel
            .add_half_edge_pair(Some(self.arcs[right].face), Some(self.arcs[left].face));
        self.dcel.set_origin(new_edge, vertex)?;
        self.dcel.link(left_edge, right_twin)?;
        self.dcel.link(right_edge, new_edge)?;
        self.dcel.link(new_twin, left_twin)?;

        self.breakpoints.remove(lb);
        self.breakpoints.remove(rb);
        self.arcs.remove(arc);
        let bp = self.new_breakpoint(left, right, new_edge);
        if removed {
            self.insert_node(BeachLineNode::Breakpoint(bp));
        } else {
            self.rebuild_beach_line();
        }

        self.check_circle_event(left);
        self.check_circle_event(right);
        Ok(())
    }

    /// Extends unfinished edges to infinity and tidies the diagram.
    fn finish(mut self) -> Result<Dcel> {
        let mut rays = Vec::with_capacity(self.breakpoints.len());
        for bp in self.breakpoints.values() {
            let p = self.arcs[bp.left].site;
            let q = self.arcs[bp.right].site;
            let mid = nalgebra::center(&p, &q);
            let twin = self.dcel.twin(bp.edge)?;
            if self.dcel.half_edge(twin)?.origin.is_some() {
                continue;
            }
            let start = self
                .dcel
                .origin_point(bp.edge)?
                .filter(|o| !is_effectively_infinite((o - mid).norm()))
                .unwrap_or(mid);
            rays.push((twin, start + breakpoint_direction(&p, &q) * INFINITY));
        }
        for (twin, far) in rays {
            let vertex = self.dcel.get_vertex(far);
            self.dcel.set_origin(twin, vertex)?;
        }

        let unfinished = self
            .dcel
            .half_edges()
            .filter(|(_, he)| he.origin.is_none())
            .count();
        if unfinished > 0 {
            return Err(DiagramError::UnfinishedEdges(unfinished).into());
        }
        self.dcel.close_open_boundaries()?;
        self.dcel.remove_zero_length_edges()?;
        Ok(self.dcel)
    }
}
