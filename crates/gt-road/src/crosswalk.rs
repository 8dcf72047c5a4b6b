//! Crosswalks and their incoming-vehicle slots.

use gt_core::{AgentId, CrosswalkId, Direction, LaneId, Rect};

/// What the road layer needs to know about a vehicle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VehicleFootprint {
    pub agent:     AgentId,
    pub lane:      LaneId,
    pub rect:      Rect,
    pub direction: Direction,
}

/// The nearest vehicle approaching a crosswalk in one lane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IncomingVehicle {
    pub agent:     AgentId,
    pub rect:      Rect,
    pub direction: Direction,
    /// Distance from the vehicle's leading edge to the crosswalk's near edge
    /// along the vehicle's direction of travel.  Zero once the vehicle has
    /// reached the crosswalk.
    pub gap:       f64,
}

/// A rectangular region where pedestrians cross one or more lanes.
///
/// `incoming` holds one slot per entry of `overlap_lanes` (same order).  A
/// `None` slot means no vehicle is approaching in that lane.
#[derive(Clone, Debug)]
pub struct Crosswalk {
    pub id:            CrosswalkId,
    pub rect:          Rect,
    /// Ids of the lanes this crosswalk overlaps, ascending.
    pub overlap_lanes: Vec<LaneId>,
    incoming:          Vec<Option<IncomingVehicle>>,
}

impl Crosswalk {
    pub(crate) fn new(id: CrosswalkId, rect: Rect, overlap_lanes: Vec<LaneId>) -> Self {
        let incoming = vec![None; overlap_lanes.len()];
        Self { id, rect, overlap_lanes, incoming }
    }

    /// Incoming-vehicle slots as of the last refresh.
    #[inline]
    pub fn incoming(&self) -> &[Option<IncomingVehicle>] {
        &self.incoming
    }

    /// Slot for `lane`, or `None` when the lane is not an overlap lane or no
    /// vehicle is approaching in it.
    pub fn incoming_in(&self, lane: LaneId) -> Option<&IncomingVehicle> {
        let slot = self.overlap_lanes.iter().position(|&l| l == lane)?;
        self.incoming[slot].as_ref()
    }

    /// Recompute every slot from the current vehicle footprints.
    ///
    /// A vehicle qualifies for a lane's slot when it is in that lane and has
    /// not yet cleared the crosswalk, i.e. its trailing edge is still short
    /// of the crosswalk's far edge in the vehicle's direction of travel.
    /// The qualifying vehicle with the smallest gap wins; ties go to the
    /// lowest `AgentId`.
    pub fn refresh_incoming(&mut self, vehicles: &[VehicleFootprint]) {
        let slots: Vec<Option<IncomingVehicle>> = self
            .overlap_lanes
            .iter()
            .map(|&lane| nearest_incoming(&self.rect, lane, vehicles))
            .collect();
        self.incoming = slots;
    }
}

/// Distance from a vehicle's leading edge to the near edge of `crossing`,
/// along the vehicle's direction of travel.
///
/// Zero while the vehicle overlaps the crossing; `None` once its trailing
/// edge has passed the far edge.
pub fn approach_gap(crossing: &Rect, vehicle: &Rect, direction: Direction) -> Option<f64> {
    // Project onto the travel axis so "ahead" is always "larger".
    let sign = if direction.is_positive() { 1.0 } else { -1.0 };
    let far = sign * crossing.leading_edge(direction);
    let near = sign * crossing.trailing_edge(direction);
    if sign * vehicle.trailing_edge(direction) >= far {
        return None;
    }
    Some((near - sign * vehicle.leading_edge(direction)).max(0.0))
}

fn nearest_incoming(
    crossing: &Rect,
    lane:     LaneId,
    vehicles: &[VehicleFootprint],
) -> Option<IncomingVehicle> {
    let mut best: Option<IncomingVehicle> = None;
    for v in vehicles.iter().filter(|v| v.lane == lane) {
        let Some(gap) = approach_gap(crossing, &v.rect, v.direction) else {
            continue;
        };
        let better = match &best {
            None => true,
            Some(b) => gap < b.gap || (gap == b.gap && v.agent < b.agent),
        };
        if better {
            best = Some(IncomingVehicle { agent: v.agent, rect: v.rect, direction: v.direction, gap });
        }
    }
    best
}
