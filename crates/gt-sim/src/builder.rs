//! Fluent builder for constructing a [`TrafficEnv`].

use log::info;

use gt_agent::{Agent, AgentRegistry, Pedestrian, Vehicle};
use gt_core::SimConfig;
use gt_road::RoadNetwork;

use crate::env::check_vehicle_lane;
use crate::{SimError, SimResult, TrafficEnv};

/// Fluent builder for [`TrafficEnv`].
///
/// # Required inputs
///
/// - [`SimConfig`] — max steps, seed, snapshot interval
/// - [`RoadNetwork`] — e.g. [`scenario::two_lane_road`][crate::scenario::two_lane_road]
///
/// # Optional inputs
///
/// | Method               | Default        |
/// |----------------------|----------------|
/// | `.pedestrian(p)`     | no pedestrians |
/// | `.vehicle(v)`        | no vehicles    |
///
/// # Example
///
/// ```rust,ignore
/// let mut env = EnvBuilder::new(config, scenario::two_lane_road()?)
///     .pedestrian(Pedestrian::stop_go(AgentId(0), kerb, Direction::South, 3.0, 50.0))
///     .vehicle(car)
///     .build()?;
/// ```
pub struct EnvBuilder {
    config:      SimConfig,
    network:     RoadNetwork,
    agents:      Vec<Agent>,
}

impl EnvBuilder {
    pub fn new(config: SimConfig, network: RoadNetwork) -> Self {
        Self {
            config,
            network,
            agents:      Vec::new(),
        }
    }

    pub fn pedestrian(mut self, ped: Pedestrian) -> Self {
        self.agents.push(Agent::from(ped));
        self
    }

    pub fn vehicle(mut self, vehicle: Vehicle) -> Self {
        self.agents.push(Agent::from(vehicle));
        self
    }

    /// Validate the world, every agent, and every vehicle's lane, then
    /// return an environment at tick 0.
    pub fn build(self) -> SimResult<TrafficEnv> {
        let (w, h) = (self.network.width, self.network.height);
        if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
            return Err(SimError::Config(format!("world extent {w} x {h} must be positive")));
        }
        if self.config.max_steps == 0 {
            return Err(SimError::Config("max_steps must be at least 1".into()));
        }

        let mut agents = AgentRegistry::new();
        for agent in self.agents {
            if let Agent::Vehicle(vehicle) = &agent {
                check_vehicle_lane(&self.network, vehicle)?;
            }
            agents.add(agent)?;
        }

        info!(
            "built {w} x {h} environment: {} lanes, {} crosswalks, {} agents",
            self.network.lanes.len(),
            self.network.crosswalks.len(),
            agents.len(),
        );
        Ok(TrafficEnv::new(self.config, self.network, agents))
    }
}
