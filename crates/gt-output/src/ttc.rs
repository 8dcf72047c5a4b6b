//! Time-to-collision samples.

use log::warn;
use serde::{Deserialize, Serialize};

use gt_core::{AgentId, Corner, Direction, Point};

use crate::MetricCollector;

/// Column names of the exported table, in order.
pub const COLUMNS: [&str; 5] = ["pedX", "pedY", "vehX", "vehY", "TTC"];

/// One row of the exported table: where the pedestrian and the vehicle's
/// front were at one sample, and how many steps until they meet.
///
/// `ttc` is `None` (an empty CSV field) when the vehicle is stationary or
/// already past the pedestrian.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TtcSample {
    #[serde(rename = "pedX")]
    pub ped_x: f64,
    #[serde(rename = "pedY")]
    pub ped_y: f64,
    #[serde(rename = "vehX")]
    pub veh_x: f64,
    #[serde(rename = "vehY")]
    pub veh_y: f64,
    #[serde(rename = "TTC")]
    pub ttc:   Option<f64>,
}

/// Whole steps until the vehicle's front reaches the pedestrian along the
/// vehicle's axis of travel.
///
/// `None` when the vehicle is not moving or its front is already past the
/// pedestrian.
pub fn time_to_collision(
    ped:           Point,
    vehicle_front: Point,
    vehicle_speed: f64,
    direction:     Direction,
) -> Option<f64> {
    if !(vehicle_speed > 0.0) {
        return None;
    }
    let sign = if direction.is_positive() { 1.0 } else { -1.0 };
    let gap = sign * (ped.along(direction) - vehicle_front.along(direction));
    if gap < 0.0 {
        return None;
    }
    Some((gap / vehicle_speed).ceil())
}

/// Midpoint of the footprint edge facing `direction`.
fn front_point(top_left: Point, bottom_right: Point, center: Point, direction: Direction) -> Point {
    match direction {
        Direction::East  => Point::new(bottom_right.x, center.y),
        Direction::West  => Point::new(top_left.x, center.y),
        Direction::South => Point::new(center.x, bottom_right.y),
        Direction::North => Point::new(center.x, top_left.y),
    }
}

/// Build one row per tick at which both `ped` and `veh` were recorded, in
/// recording order.
///
/// Missing tracks yield no rows.
pub fn episode_samples(
    collector: &MetricCollector,
    ped:       AgentId,
    veh:       AgentId,
    speed:     f64,
    direction: Direction,
) -> Vec<TtcSample> {
    let (peds, vehs) = collector.positions();
    let (Some(ped_track), Some(corners)) = (peds.get(&ped), vehs.get(&veh)) else {
        warn!("no recorded tracks for pedestrian {ped} / vehicle {veh}");
        return Vec::new();
    };
    let (Some(tl), Some(br), Some(center)) = (
        corners.get(&Corner::TopLeft),
        corners.get(&Corner::BottomRight),
        corners.get(&Corner::Center),
    ) else {
        return Vec::new();
    };
    let veh_ticks = collector.vehicle_ticks(veh);

    collector
        .pedestrian_ticks(ped)
        .iter()
        .zip(ped_track)
        .filter_map(|(tick, &p)| {
            // Ticks are recorded in ascending order within an episode.
            let j = veh_ticks.binary_search(tick).ok()?;
            let front = front_point(*tl.get(j)?, *br.get(j)?, *center.get(j)?, direction);
            Some(TtcSample {
                ped_x: p.x,
                ped_y: p.y,
                veh_x: front.x,
                veh_y: front.y,
                ttc:   time_to_collision(p, front, speed, direction),
            })
        })
        .collect()
}
