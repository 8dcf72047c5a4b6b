//! Lanes and roads.

use gt_core::{Direction, LaneId, Point, Rect, RoadId};

/// A strip of road carrying one-directional traffic.
#[derive(Clone, Debug, PartialEq)]
pub struct Lane {
    pub id:        LaneId,
    pub road:      RoadId,
    pub rect:      Rect,
    /// Direction vehicles in this lane travel.
    pub direction: Direction,
}

impl Lane {
    #[inline]
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// A group of parallel lanes.
#[derive(Clone, Debug, PartialEq)]
pub struct Road {
    pub id:    RoadId,
    pub rect:  Rect,
    /// Member lanes in ascending id order.
    pub lanes: Vec<LaneId>,
}
