use std::cmp::Ordering;

use crate::math::{compare_with_tolerance, Point2};

use super::beach_line::ArcId;

/// What happens when the sweep reaches an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum EventKind {
    /// A new site enters the beach line.
    Site,
    /// The arc vanishes; its neighbours' breakpoints meet at `center`.
    Circle { arc: ArcId, center: Point2 },
}

/// An entry of the sweep's event queue.
///
/// Circle events are invalidated lazily: an arc remembers the serial of its
/// pending event, and a popped event whose serial no longer matches is skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SweepEvent {
    pub point: Point2,
    pub kind: EventKind,
    pub serial: u64,
}

impl SweepEvent {
    pub fn site(point: Point2, serial: u64) -> Self {
        Self {
            point,
            kind: EventKind::Site,
            serial,
        }
    }

    /// Circle event fired when the sweep reaches the bottom of the circle.
    pub fn circle(arc: ArcId, center: Point2, radius: f64, serial: u64) -> Self {
        Self {
            point: Point2::new(center.x, center.y - radius),
            kind: EventKind::Circle { arc, center },
            serial,
        }
    }

    fn is_circle(&self) -> bool {
        matches!(self.kind, EventKind::Circle { .. })
    }
}

/// Queue order: higher y first, then lower x, circle before site, then serial.
pub(super) fn event_order(a: &SweepEvent, b: &SweepEvent) -> Ordering {
    compare_with_tolerance(b.point.y, a.point.y)
        .then_with(|| compare_with_tolerance(a.point.x, b.point.x))
        .then_with(|| b.is_circle().cmp(&a.is_circle()))
        .then_with(|| a.serial.cmp(&b.serial))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    use super::super::beach_line::ArcData;

    fn some_arc() -> ArcId {
        let mut arcs: SlotMap<ArcId, ArcData> = SlotMap::with_key();
        arcs.insert(ArcData::new(Point2::origin(), Default::default()))
    }

    #[test]
    fn higher_events_come_first() {
        let high = SweepEvent::site(Point2::new(5.0, 10.0), 1);
        let low = SweepEvent::site(Point2::new(0.0, 1.0), 0);
        assert_eq!(event_order(&high, &low), Ordering::Less);
    }

    #[test]
    fn ties_break_on_x_then_kind_then_serial() {
        let left = SweepEvent::site(Point2::new(0.0, 1.0), 5);
        let right = SweepEvent::site(Point2::new(1.0, 1.0 + 1e-7), 0);
        assert_eq!(event_order(&left, &right), Ordering::Less);

        let circle = SweepEvent::circle(some_arc(), Point2::new(1.0, 3.0), 2.0, 9);
        assert_eq!(event_order(&circle, &right), Ordering::Less);

        let again = SweepEvent::site(Point2::new(1.0, 1.0), 1);
        assert_eq!(event_order(&right, &again), Ordering::Less);
    }
}
