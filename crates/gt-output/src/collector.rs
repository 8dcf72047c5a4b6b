//! `MetricCollector` — records agent tracks through `SimObserver` callbacks.

use std::collections::BTreeMap;

use gt_agent::AgentRegistry;
use gt_core::{AgentId, Corner, Point, Tick};
use gt_sim::SimObserver;

/// Footprint reference points recorded for every vehicle.
pub const VEHICLE_CORNERS: [Corner; 3] = [Corner::TopLeft, Corner::BottomRight, Corner::Center];

/// Pedestrian tracks keyed by agent.
pub type PedTracks = BTreeMap<AgentId, Vec<Point>>;

/// Vehicle tracks keyed by agent, then by footprint reference point.
pub type VehicleTracks = BTreeMap<AgentId, BTreeMap<Corner, Vec<Point>>>;

/// Samples every pedestrian point and every vehicle's reference corners once
/// on reset and then after each observed step.
///
/// Storage is unbounded and cleared on every reset, so one collector holds
/// exactly one episode.  Each track also keeps the tick of every point, so
/// agents added or removed mid-episode line up with the right samples.
#[derive(Clone, Debug, Default)]
pub struct MetricCollector {
    ticks:     Vec<Tick>,
    ped:       PedTracks,
    veh:       VehicleTracks,
    ped_ticks: BTreeMap<AgentId, Vec<Tick>>,
    veh_ticks: BTreeMap<AgentId, Vec<Tick>>,
}

impl MetricCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample of every registered agent.
    pub fn record(&mut self, tick: Tick, agents: &AgentRegistry) {
        self.ticks.push(tick);
        for (&id, ped) in agents.pedestrians() {
            self.ped.entry(id).or_default().push(ped.position());
            self.ped_ticks.entry(id).or_default().push(tick);
        }
        for (&id, vehicle) in agents.vehicles() {
            let rect = vehicle.rect();
            let corners = self.veh.entry(id).or_default();
            for corner in VEHICLE_CORNERS {
                corners.entry(corner).or_default().push(rect.corner(corner));
            }
            self.veh_ticks.entry(id).or_default().push(tick);
        }
    }

    pub fn clear(&mut self) {
        self.ticks.clear();
        self.ped.clear();
        self.veh.clear();
        self.ped_ticks.clear();
        self.veh_ticks.clear();
    }

    /// Recorded `(pedestrian, vehicle)` tracks.
    pub fn positions(&self) -> (&PedTracks, &VehicleTracks) {
        (&self.ped, &self.veh)
    }

    /// Tick of every recorded sample, in recording order.
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Tick of every point in `id`'s pedestrian track; empty if unseen.
    pub fn pedestrian_ticks(&self, id: AgentId) -> &[Tick] {
        self.ped_ticks.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Tick of every point in `id`'s vehicle tracks; empty if unseen.
    pub fn vehicle_ticks(&self, id: AgentId) -> &[Tick] {
        self.veh_ticks.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Number of samples recorded this episode.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

impl SimObserver for MetricCollector {
    fn on_reset(&mut self, agents: &AgentRegistry) {
        self.clear();
        self.record(Tick::ZERO, agents);
    }

    fn on_step_end(&mut self, tick: Tick, agents: &AgentRegistry) {
        self.record(tick, agents);
    }
}
