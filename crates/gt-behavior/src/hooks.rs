//! Decision hook types and dispatch.

use gt_agent::{PedModel, Pedestrian, Vehicle, VehicleModel};

use crate::{SimContext, Verb, stop_go};

/// Decides a pedestrian's verb for this tick.  May update the pedestrian's
/// own plan state (`steps_planned`) and nothing else.
pub type PedHook = fn(&mut Pedestrian, &SimContext<'_>) -> Verb;

/// Decides a vehicle's verb for this tick.
pub type VehicleHook = fn(&Vehicle, &SimContext<'_>) -> Verb;

/// The hook selected by a pedestrian's model tag.
pub fn ped_hook(model: PedModel) -> PedHook {
    match model {
        PedModel::StopGo => stop_go::decide,
        PedModel::Walk => walk,
    }
}

/// The hook selected by a vehicle's model tag.
pub fn vehicle_hook(model: VehicleModel) -> VehicleHook {
    match model {
        VehicleModel::Cruise => cruise,
        VehicleModel::Parked => parked,
    }
}

pub fn walk(_ped: &mut Pedestrian, _ctx: &SimContext<'_>) -> Verb {
    Verb::Keep
}

pub fn cruise(_vehicle: &Vehicle, _ctx: &SimContext<'_>) -> Verb {
    Verb::Keep
}

pub fn parked(_vehicle: &Vehicle, _ctx: &SimContext<'_>) -> Verb {
    Verb::Stop
}
