//! `AgentRegistry`: every agent of one environment, keyed by id.
//!
//! Both kinds live in `BTreeMap`s so iteration is always in ascending
//! `AgentId` order.  The step loop relies on this for reproducible episodes.

use std::collections::BTreeMap;

use gt_core::AgentId;
use gt_road::VehicleFootprint;

use crate::{Agent, AgentCore, AgentError, AgentResult, Pedestrian, Vehicle};

/// Owns all pedestrians and vehicles.  Ids are unique across both kinds.
#[derive(Clone, Debug, Default)]
pub struct AgentRegistry {
    pedestrians: BTreeMap<AgentId, Pedestrian>,
    vehicles:    BTreeMap<AgentId, Vehicle>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pedestrians.len() + self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pedestrians.is_empty() && self.vehicles.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: AgentId) -> bool {
        self.pedestrians.contains_key(&id) || self.vehicles.contains_key(&id)
    }

    // ── Registration ──────────────────────────────────────────────────────

    pub fn add(&mut self, agent: Agent) -> AgentResult<AgentId> {
        match agent {
            Agent::Pedestrian(p) => self.add_pedestrian(p),
            Agent::Vehicle(v) => self.add_vehicle(v),
        }
    }

    /// Validate and register a pedestrian.
    pub fn add_pedestrian(&mut self, ped: Pedestrian) -> AgentResult<AgentId> {
        let id = ped.id();
        self.check_new(id)?;
        ped.validate()?;
        self.pedestrians.insert(id, ped);
        Ok(id)
    }

    /// Validate and register a vehicle.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> AgentResult<AgentId> {
        let id = vehicle.id();
        self.check_new(id)?;
        vehicle.validate()?;
        self.vehicles.insert(id, vehicle);
        Ok(id)
    }

    pub fn remove_pedestrian(&mut self, id: AgentId) -> AgentResult<Pedestrian> {
        self.pedestrians.remove(&id).ok_or(AgentError::NotFound(id))
    }

    pub fn remove_vehicle(&mut self, id: AgentId) -> AgentResult<Vehicle> {
        self.vehicles.remove(&id).ok_or(AgentError::NotFound(id))
    }

    fn check_new(&self, id: AgentId) -> AgentResult<()> {
        if id == AgentId::INVALID || self.contains(id) {
            return Err(AgentError::DuplicateId(id));
        }
        Ok(())
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Kinematic core of an agent of either kind.
    pub fn get(&self, id: AgentId) -> Option<&AgentCore> {
        self.pedestrians
            .get(&id)
            .map(|p| &p.core)
            .or_else(|| self.vehicles.get(&id).map(|v| &v.core))
    }

    pub fn pedestrian(&self, id: AgentId) -> Option<&Pedestrian> {
        self.pedestrians.get(&id)
    }

    pub fn pedestrian_mut(&mut self, id: AgentId) -> Option<&mut Pedestrian> {
        self.pedestrians.get_mut(&id)
    }

    pub fn vehicle(&self, id: AgentId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    pub fn vehicle_mut(&mut self, id: AgentId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(&id)
    }

    pub fn pedestrians(&self) -> &BTreeMap<AgentId, Pedestrian> {
        &self.pedestrians
    }

    pub fn vehicles(&self) -> &BTreeMap<AgentId, Vehicle> {
        &self.vehicles
    }

    /// Mutable pedestrians alongside read-only vehicles, for the decision
    /// phase where pedestrian hooks update their own plan state.
    pub fn split_mut(&mut self) -> (&mut BTreeMap<AgentId, Pedestrian>, &BTreeMap<AgentId, Vehicle>) {
        (&mut self.pedestrians, &self.vehicles)
    }

    pub fn pedestrians_mut(&mut self) -> impl Iterator<Item = &mut Pedestrian> {
        self.pedestrians.values_mut()
    }

    pub fn vehicles_mut(&mut self) -> impl Iterator<Item = &mut Vehicle> {
        self.vehicles.values_mut()
    }

    /// Road-layer view of every vehicle, in ascending id order.
    pub fn footprints(&self) -> Vec<VehicleFootprint> {
        self.vehicles.values().map(Vehicle::footprint).collect()
    }
}
