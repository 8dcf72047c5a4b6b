//! The `TrafficEnv` struct and its step loop.

use std::collections::BTreeMap;

use log::{debug, info};

use gt_agent::{AgentRegistry, Pedestrian, Vehicle};
use gt_behavior::{Action, SimContext, Verb, ped_hook, vehicle_hook};
use gt_core::{AgentId, Point, Rect, SimClock, SimConfig, SimRng, Tick};
use gt_road::{Crosswalk, Lane, RoadNetwork};

use crate::{NoopObserver, SimError, SimObserver, SimResult};

// ── Step results ──────────────────────────────────────────────────────────────

/// Agent positions after a step or reset.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub tick:        Tick,
    pub pedestrians: Vec<(AgentId, Point)>,
    pub vehicles:    Vec<(AgentId, Rect)>,
}

/// Diagnostics for one step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepInfo {
    /// Every action applied this step, ascending by agent.
    pub actions:    Vec<Action>,
    /// `(pedestrian, vehicle)` pairs whose footprints overlap after the step.
    pub collisions: Vec<(AgentId, AgentId)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub observation: Observation,
    /// `-1.0` per collision this step.
    pub reward:      f64,
    pub done:        bool,
    pub info:        StepInfo,
}

// ── TrafficEnv ────────────────────────────────────────────────────────────────

/// A road network populated with pedestrians and vehicles.
///
/// Create via [`EnvBuilder`][crate::EnvBuilder].  The environment owns its
/// [`SimRng`]; nothing in an episode touches process-wide state.
pub struct TrafficEnv {
    pub config:  SimConfig,
    pub clock:   SimClock,
    pub network: RoadNetwork,

    agents:  AgentRegistry,
    /// Every agent as it was when registered; `reset` restores this.
    initial: AgentRegistry,
    rng:     SimRng,
}

impl TrafficEnv {
    pub(crate) fn new(config: SimConfig, network: RoadNetwork, agents: AgentRegistry) -> Self {
        let rng = SimRng::new(config.seed);
        let mut env = Self {
            config,
            clock: SimClock::new(),
            network,
            initial: agents.clone(),
            agents,
            rng,
        };
        env.refresh_incoming();
        env
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> f64 {
        self.network.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.network.height
    }

    #[inline]
    pub fn tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn crosswalks(&self) -> &[Crosswalk] {
        &self.network.crosswalks
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.network.lanes
    }

    pub fn agents(&self) -> &AgentRegistry {
        &self.agents
    }

    pub fn ped_agents(&self) -> &BTreeMap<AgentId, Pedestrian> {
        self.agents.pedestrians()
    }

    pub fn vehicle_agents(&self) -> &BTreeMap<AgentId, Vehicle> {
        self.agents.vehicles()
    }

    /// The environment's generator.  Reseeded from `config.seed` on reset.
    pub fn rng(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    // ── Agent management ──────────────────────────────────────────────────

    pub fn add_ped_agent(&mut self, ped: Pedestrian) -> SimResult<AgentId> {
        let id = self.agents.add_pedestrian(ped)?;
        self.initial.add_pedestrian(ped)?;
        Ok(id)
    }

    /// Register a vehicle.  Its lane must exist and belong to its road.
    pub fn add_vehicle_agent(&mut self, vehicle: Vehicle) -> SimResult<AgentId> {
        check_vehicle_lane(&self.network, &vehicle)?;
        let id = self.agents.add_vehicle(vehicle)?;
        self.initial.add_vehicle(vehicle)?;
        self.refresh_incoming();
        Ok(id)
    }

    pub fn remove_ped_agent(&mut self, id: AgentId) -> SimResult<Pedestrian> {
        let ped = self.agents.remove_pedestrian(id)?;
        self.initial.remove_pedestrian(id)?;
        Ok(ped)
    }

    pub fn remove_vehicle_agent(&mut self, id: AgentId) -> SimResult<Vehicle> {
        let vehicle = self.agents.remove_vehicle(id)?;
        self.initial.remove_vehicle(id)?;
        self.refresh_incoming();
        Ok(vehicle)
    }

    // ── Episode control ───────────────────────────────────────────────────

    /// Restore every agent to its registration state, rewind the clock, and
    /// reseed the generator.
    pub fn reset(&mut self) -> Observation {
        self.reset_with(&mut NoopObserver)
    }

    /// [`reset`](Self::reset), then report the initial state to `observer`.
    pub fn reset_with<O: SimObserver>(&mut self, observer: &mut O) -> Observation {
        self.agents = self.initial.clone();
        self.clock.reset();
        self.rng = SimRng::new(self.config.seed);
        self.refresh_incoming();
        info!(
            "environment reset: {} pedestrians, {} vehicles, seed {}",
            self.agents.pedestrians().len(),
            self.agents.vehicles().len(),
            self.config.seed,
        );
        observer.on_reset(&self.agents);
        self.observation()
    }

    /// Advance one step.  `actions` override the decision hook of the agents
    /// they name; every other agent decides for itself.
    pub fn step(&mut self, actions: &[Action]) -> SimResult<StepOutcome> {
        self.step_with(actions, &mut NoopObserver)
    }

    /// [`step`](Self::step) with observer callbacks.
    pub fn step_with<O: SimObserver>(
        &mut self,
        actions:  &[Action],
        observer: &mut O,
    ) -> SimResult<StepOutcome> {
        let now = self.clock.current_tick;
        let overrides = self.collect_overrides(actions)?;

        observer.on_tick_start(now);

        // ── Phase 1: incoming-vehicle slots ───────────────────────────────
        self.refresh_incoming();

        // ── Phase 2: decisions against the tick-start snapshot ────────────
        let verbs = self.decide(now, &overrides);

        // ── Phase 3: apply in ascending AgentId ───────────────────────────
        let mut applied = Vec::with_capacity(verbs.len());
        for (agent, verb) in verbs {
            self.apply(agent, verb);
            applied.push(Action::new(agent, verb));
        }

        // ── Phase 4: collisions ───────────────────────────────────────────
        let collisions = self.collisions();
        for &(ped, veh) in &collisions {
            debug!("{now}: pedestrian {ped} collided with vehicle {veh}");
        }

        // ── Phase 5: advance ──────────────────────────────────────────────
        self.clock.advance();
        let after = self.clock.current_tick;
        let interval = self.config.snapshot_interval;
        if interval > 0 && after.0 % interval == 0 {
            observer.on_step_end(after, &self.agents);
        }

        let reward = if collisions.is_empty() { 0.0 } else { -(collisions.len() as f64) };
        Ok(StepOutcome {
            observation: self.observation(),
            reward,
            done:        self.is_done(),
            info:        StepInfo { actions: applied, collisions },
        })
    }

    /// Step with no supplied actions until the episode is done.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while !self.is_done() {
            self.step_with(&[], observer)?;
        }
        info!("episode finished at {}", self.clock.current_tick);
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores `done`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step_with(&[], observer)?;
        }
        Ok(())
    }

    /// `true` once `max_steps` steps ran or every pedestrian left the world.
    pub fn is_done(&self) -> bool {
        if self.clock.current_tick >= self.config.end_tick() {
            return true;
        }
        let peds = self.agents.pedestrians();
        !peds.is_empty() && peds.values().all(|p| !self.network.in_bounds(p.position()))
    }

    pub fn observation(&self) -> Observation {
        Observation {
            tick:        self.clock.current_tick,
            pedestrians: self.agents.pedestrians().values().map(|p| (p.id(), p.position())).collect(),
            vehicles:    self.agents.vehicles().values().map(|v| (v.id(), v.rect())).collect(),
        }
    }

    // ── Step internals ────────────────────────────────────────────────────

    fn refresh_incoming(&mut self) {
        let footprints = self.agents.footprints();
        self.network.refresh_incoming(&footprints);
    }

    fn collect_overrides(&self, actions: &[Action]) -> SimResult<BTreeMap<AgentId, Verb>> {
        let mut overrides = BTreeMap::new();
        for action in actions {
            if !self.agents.contains(action.agent) {
                return Err(gt_agent::AgentError::NotFound(action.agent).into());
            }
            if overrides.insert(action.agent, action.verb).is_some() {
                return Err(SimError::DuplicateAction(action.agent));
            }
        }
        Ok(overrides)
    }

    /// Collect one verb per agent.  Hooks only read the snapshot; stop/go
    /// pedestrians additionally update their own `steps_planned`.
    fn decide(&mut self, now: Tick, overrides: &BTreeMap<AgentId, Verb>) -> BTreeMap<AgentId, Verb> {
        let (pedestrians, vehicles) = self.agents.split_mut();
        let ctx = SimContext::new(now, &self.network, vehicles);

        let mut verbs: BTreeMap<AgentId, Verb> = vehicles
            .iter()
            .map(|(&id, v)| {
                let verb = match overrides.get(&id) {
                    Some(&verb) => verb,
                    None => vehicle_hook(v.model)(v, &ctx),
                };
                (id, verb)
            })
            .collect();

        #[cfg(not(feature = "parallel"))]
        let ped_verbs: Vec<(AgentId, Verb)> = pedestrians
            .iter_mut()
            .map(|(&id, p)| (id, decide_pedestrian(p, &ctx, overrides.get(&id).copied())))
            .collect();

        #[cfg(feature = "parallel")]
        let ped_verbs: Vec<(AgentId, Verb)> = {
            use rayon::prelude::*;
            pedestrians
                .par_iter_mut()
                .map(|(&id, p)| (id, decide_pedestrian(p, &ctx, overrides.get(&id).copied())))
                .collect()
        };

        verbs.extend(ped_verbs);
        verbs
    }

    fn apply(&mut self, agent: AgentId, verb: Verb) {
        if let Some(ped) = self.agents.pedestrian_mut(agent) {
            match verb {
                Verb::Stop => {}
                Verb::Accelerate => {
                    ped.core.adjust_speed(1.0);
                    ped.core.advance();
                }
                Verb::Slowdown => {
                    ped.core.adjust_speed(-1.0);
                    ped.core.advance();
                }
                // Pedestrians have no lane; a lane change is a plain step.
                Verb::Keep | Verb::LaneLeft | Verb::LaneRight => ped.core.advance(),
            }
            return;
        }

        let Some(vehicle) = self.agents.vehicle_mut(agent) else {
            return;
        };
        match verb {
            Verb::Stop => return,
            Verb::Keep => {}
            Verb::Accelerate => vehicle.core.adjust_speed(1.0),
            Verb::Slowdown => vehicle.core.adjust_speed(-1.0),
            Verb::LaneLeft | Verb::LaneRight => {
                let heading = vehicle.core.direction;
                let side = if verb == Verb::LaneLeft { heading.left() } else { heading.right() };
                let target = self
                    .network
                    .adjacent_lane(vehicle.in_lane, side)
                    .and_then(|id| self.network.lane(id));
                match target {
                    Some(lane) => vehicle.shift_to_lane(lane.id, &lane.rect),
                    None => debug!("vehicle {agent}: no lane on the {side} side, keeping lane"),
                }
            }
        }
        vehicle.core.advance();
    }

    fn collisions(&self) -> Vec<(AgentId, AgentId)> {
        let vehicles = self.agents.vehicles();
        self.agents
            .pedestrians()
            .values()
            .flat_map(move |p| {
                let pos = p.position();
                vehicles
                    .values()
                    .filter(move |v| v.rect().contains(pos))
                    .map(move |v| (p.id(), v.id()))
            })
            .collect()
    }
}

fn decide_pedestrian(ped: &mut Pedestrian, ctx: &SimContext<'_>, forced: Option<Verb>) -> Verb {
    match forced {
        Some(verb) => verb,
        None => ped_hook(ped.model)(ped, ctx),
    }
}

/// The vehicle's lane must exist and belong to the vehicle's road.
pub(crate) fn check_vehicle_lane(network: &RoadNetwork, vehicle: &Vehicle) -> SimResult<()> {
    let lane = network
        .lane(vehicle.in_lane)
        .ok_or(gt_road::RoadError::UnknownLane(vehicle.in_lane))?;
    if network.road(vehicle.in_road).is_none() {
        return Err(gt_road::RoadError::UnknownRoad(vehicle.in_road).into());
    }
    if lane.road != vehicle.in_road {
        return Err(SimError::Config(format!(
            "vehicle {}: lane {} belongs to {}, not {}",
            vehicle.id(),
            lane.id,
            lane.road,
            vehicle.in_road,
        )));
    }
    Ok(())
}
