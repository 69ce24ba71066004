//! Beach-line entities and their ordering at a given sweep position.

use std::cmp::Ordering;

use slotmap::SlotMap;

use crate::math::{compare_with_tolerance, normalized, perp_cw, Point2, Vector2, TOLERANCE};
use crate::topology::{FaceId, HalfEdgeId};

slotmap::new_key_type! {
    /// Identifier of a parabolic arc on the beach line.
    pub(super) struct ArcId;
    /// Identifier of a breakpoint between two arcs.
    pub(super) struct BreakpointId;
}

/// Sweep distance used to estimate how fast a breakpoint moves sideways.
const VELOCITY_STEP: f64 = 1e-3;

/// A parabolic arc belonging to one site.
#[derive(Debug, Clone)]
pub(super) struct ArcData {
    pub site: Point2,
    pub face: FaceId,
    pub left: Option<BreakpointId>,
    pub right: Option<BreakpointId>,
    /// Serial of the pending circle event that would remove this arc.
    pub event: Option<u64>,
}

impl ArcData {
    pub fn new(site: Point2, face: FaceId) -> Self {
        Self {
            site,
            face,
            left: None,
            right: None,
            event: None,
        }
    }
}

/// The meeting point of two neighbouring arcs.
///
/// `edge` is the half-edge bounding the right arc's face, pointing in the
/// direction the breakpoint travels.
#[derive(Debug, Clone)]
pub(super) struct BreakpointData {
    pub left: ArcId,
    pub right: ArcId,
    pub edge: HalfEdgeId,
    pub serial: u64,
}

/// A beach-line tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BeachLineNode {
    Arc(ArcId),
    Breakpoint(BreakpointId),
}

/// Direction in which the breakpoint between `left` and `right` travels.
pub(super) fn breakpoint_direction(left: &Point2, right: &Point2) -> Vector2 {
    normalized(&perp_cw(&(right - left))).unwrap_or_else(Vector2::zeros)
}

/// x-coordinate where the arc of `left` meets the arc of `right` when the
/// sweep line is at `sweep_y`.
pub(super) fn breakpoint_x(left: &Point2, right: &Point2, sweep_y: f64) -> f64 {
    let (p, q) = (left, right);
    let mid = (p.x + q.x) / 2.0;
    if compare_with_tolerance(p.y, q.y) == Ordering::Equal {
        return mid;
    }
    let p_on_sweep = compare_with_tolerance(p.y, sweep_y) == Ordering::Equal;
    let q_on_sweep = compare_with_tolerance(q.y, sweep_y) == Ordering::Equal;
    match (p_on_sweep, q_on_sweep) {
        (true, true) => return mid,
        (true, false) => return p.x,
        (false, true) => return q.x,
        (false, false) => {}
    }

    // Difference of the two parabolas, a*x^2 + b*x + c, crosses from
    // negative to positive at the breakpoint.
    let dp = 2.0 * (p.y - sweep_y);
    let dq = 2.0 * (q.y - sweep_y);
    let a = 1.0 / dp - 1.0 / dq;
    let b = -2.0 * (p.x / dp - q.x / dq);
    let c = (p.x * p.x + p.y * p.y - sweep_y * sweep_y) / dp
        - (q.x * q.x + q.y * q.y - sweep_y * sweep_y) / dq;
    let sqrt_d = (b * b - 4.0 * a * c).max(0.0).sqrt();
    if b > 0.0 {
        -2.0 * c / (b + sqrt_d)
    } else {
        (-b + sqrt_d) / (2.0 * a)
    }
}

/// Beach-line order at a fixed sweep position.
///
/// Borrows the arc and breakpoint arenas so the tree can be mutated while the
/// comparator reads them.
pub(super) struct BeachOrder<'s> {
    pub arcs: &'s SlotMap<ArcId, ArcData>,
    pub breakpoints: &'s SlotMap<BreakpointId, BreakpointData>,
    pub sweep_y: f64,
}

impl BeachOrder<'_> {
    fn sites(&self, bp: BreakpointId) -> (Point2, Point2) {
        let data = &self.breakpoints[bp];
        (self.arcs[data.left].site, self.arcs[data.right].site)
    }

    pub fn x_at(&self, bp: BreakpointId, sweep_y: f64) -> f64 {
        let (p, q) = self.sites(bp);
        breakpoint_x(&p, &q, sweep_y)
    }

    fn x(&self, bp: BreakpointId) -> f64 {
        self.x_at(bp, self.sweep_y)
    }

    fn velocity(&self, bp: BreakpointId) -> f64 {
        (self.x_at(bp, self.sweep_y - VELOCITY_STEP) - self.x(bp)) / VELOCITY_STEP
    }

    /// Total order of two beach-line nodes.
    pub fn compare(&self, x: BeachLineNode, y: BeachLineNode) -> Ordering {
        if x == y {
            return Ordering::Equal;
        }
        match (x, y) {
            // An arc sits immediately right of its left breakpoint.
            (BeachLineNode::Arc(a), _) => match self.arcs[a].left {
                None => Ordering::Less,
                Some(lb) if BeachLineNode::Breakpoint(lb) == y => Ordering::Greater,
                Some(lb) => self.compare(BeachLineNode::Breakpoint(lb), y),
            },
            (_, BeachLineNode::Arc(_)) => self.compare(y, x).reverse(),
            (BeachLineNode::Breakpoint(bx), BeachLineNode::Breakpoint(by)) => {
                self.compare_breakpoints(bx, by)
            }
        }
    }

    fn compare_breakpoints(&self, x: BreakpointId, y: BreakpointId) -> Ordering {
        if x == y {
            return Ordering::Equal;
        }
        let (dx, dy) = (&self.breakpoints[x], &self.breakpoints[y]);
        if dx.right == dy.left {
            return Ordering::Less;
        }
        if dy.right == dx.left {
            return Ordering::Greater;
        }
        let at = self.x(x);
        match compare_with_tolerance(at, self.x(y)) {
            Ordering::Equal => {}
            ord => return ord,
        }
        if self.reaches_right(x, y, at) {
            return Ordering::Less;
        }
        if self.reaches_right(y, x, at) {
            return Ordering::Greater;
        }
        compare_with_tolerance(self.velocity(x), self.velocity(y))
            .then_with(|| dx.serial.cmp(&dy.serial))
    }

    /// Walks right from `from` through breakpoints located at `at`, looking for `to`.
    fn reaches_right(&self, from: BreakpointId, to: BreakpointId, at: f64) -> bool {
        let mut cur = from;
        for _ in 0..self.breakpoints.len() {
            let Some(next) = self.arcs[self.breakpoints[cur].right].right else {
                return false;
            };
            if next == to {
                return true;
            }
            if compare_with_tolerance(self.x(next), at) != Ordering::Equal {
                return false;
            }
            cur = next;
        }
        false
    }

    /// Where a new site at `site` lies relative to a node.
    ///
    /// A site level with a breakpoint belongs to the breakpoint's right arc.
    pub fn locate(&self, site: &Point2, node: BeachLineNode) -> Ordering {
        match node {
            BeachLineNode::Breakpoint(bp) => {
                if site.x < self.x(bp) - TOLERANCE {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            BeachLineNode::Arc(a) => {
                let arc = &self.arcs[a];
                if arc.left.is_some_and(|l| site.x < self.x(l) - TOLERANCE) {
                    Ordering::Less
                } else if arc.right.is_some_and(|r| site.x >= self.x(r) - TOLERANCE) {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            }
        }
    }
}
