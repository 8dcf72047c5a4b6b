//! The stop/go crossing rule.
//!
//! A pedestrian is either *planning* (`steps_planned == 0`) or *committed*
//! (`steps_planned > 0`).  While planning it looks up the crosswalk ahead,
//! the overlap lane nearest to it, and the vehicle approaching in that lane.
//! The distance from that vehicle's leading edge to the crosswalk, along the
//! vehicle's travel axis, is the clearance; once it exceeds `min_time_to_cross` the pedestrian commits to
//! enough steps to cover the crossing and walks them without re-checking.

use log::debug;

use gt_agent::Pedestrian;

use crate::{SimContext, Verb};

/// Clearance the pedestrian currently has, in world units.
///
/// `f64::INFINITY` when there is no crosswalk ahead, no overlap lane can be
/// resolved, or no vehicle is approaching in that lane.  A vehicle already
/// on the crosswalk gives zero.
pub fn clearance(ped: &Pedestrian, ctx: &SimContext<'_>) -> f64 {
    let pos = ped.position();
    let dir = ped.core.direction;
    let Some(cw_id) = ctx.network.crosswalk_ahead(pos, dir) else {
        return f64::INFINITY;
    };
    let Some(cw) = ctx.network.crosswalk(cw_id) else {
        return f64::INFINITY;
    };
    let Some(lane) = ctx.network.closest_overlap_lane(cw_id, pos) else {
        return f64::INFINITY;
    };
    match cw.incoming_in(lane) {
        Some(incoming) => incoming.gap,
        None => f64::INFINITY,
    }
}

/// Width of the road the pedestrian is about to cross: the crosswalk's
/// extent along the pedestrian's heading, or the world extent when no
/// crosswalk is ahead.
pub fn road_width(ped: &Pedestrian, ctx: &SimContext<'_>) -> f64 {
    let dir = ped.core.direction;
    ctx.network
        .crosswalk_ahead(ped.position(), dir)
        .and_then(|id| ctx.network.crosswalk(id))
        .map(|cw| cw.rect.extent_along(dir))
        .unwrap_or_else(|| if dir.is_horizontal() { ctx.world_width } else { ctx.world_height })
}

/// Steps a planning pedestrian would commit to now, or `None` if it has to
/// keep waiting.
///
/// Commits only when clearance strictly exceeds `min_time_to_cross` and the
/// pedestrian can move; the plan is `ceil(road_width / speed)`, at least 1.
pub fn plan(ped: &Pedestrian, ctx: &SimContext<'_>) -> Option<u32> {
    let speed = ped.core.speed;
    if !(speed > 0.0) {
        return None;
    }
    if clearance(ped, ctx) <= ped.min_time_to_cross {
        return None;
    }
    let steps = (road_width(ped, ctx) / speed).ceil();
    Some(if steps >= 1.0 { steps.min(u32::MAX as f64) as u32 } else { 1 })
}

/// Stop/go hook.  Arms a plan when possible, then walks one committed step.
pub fn decide(ped: &mut Pedestrian, ctx: &SimContext<'_>) -> Verb {
    if ped.steps_planned == 0 {
        if let Some(steps) = plan(ped, ctx) {
            debug!("{} {}: committing to {steps} crossing steps", ctx.tick, ped.id());
            ped.steps_planned = steps;
        }
    }
    if ped.steps_planned > 0 {
        ped.steps_planned -= 1;
        Verb::Keep
    } else {
        Verb::Stop
    }
}
