//! Read-only simulation state passed to every decision hook.

use std::collections::BTreeMap;

use gt_agent::Vehicle;
use gt_core::{AgentId, Tick};
use gt_road::RoadNetwork;

/// A read-only snapshot of the environment captured at the start of a tick.
///
/// Every hook called during one decision phase sees the same snapshot, so
/// the outcome does not depend on the order agents are visited in.  The
/// network's incoming-vehicle slots are refreshed before the snapshot is
/// taken.
pub struct SimContext<'a> {
    /// Tick being decided.
    pub tick: Tick,

    /// Lanes, crosswalks, and their incoming-vehicle slots.
    pub network: &'a RoadNetwork,

    /// Every vehicle, by id.
    pub vehicles: &'a BTreeMap<AgentId, Vehicle>,

    pub world_width:  f64,
    pub world_height: f64,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn new(tick: Tick, network: &'a RoadNetwork, vehicles: &'a BTreeMap<AgentId, Vehicle>) -> Self {
        Self {
            tick,
            network,
            vehicles,
            world_width: network.width,
            world_height: network.height,
        }
    }
}
