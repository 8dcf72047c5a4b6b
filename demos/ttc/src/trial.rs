//! Trial configuration and the random pedestrian/vehicle placement.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use gt_agent::{Pedestrian, Vehicle};
use gt_core::{AgentId, Direction, LaneId, Point, RoadId, SimConfig, SimRng};
use gt_road::Lane;

/// Kerb cells beside the crosswalk of the two-lane road and the heading
/// that crosses from each.
pub const KERBS: [(Point, Direction); 2] = [
    (Point::new(900.0, 25.0), Direction::South),
    (Point::new(900.0, 275.0), Direction::North),
];

/// A clamped normal distribution, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub mean:    f64,
    pub std_dev: f64,
    pub min:     f64,
    pub max:     f64,
}

/// Everything a batch of trials needs.  Missing JSON fields take the
/// defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    pub sim:               SimConfig,
    pub trials:            u32,
    /// Distance from the car's front to the pedestrian along the road.
    pub dist_ahead:        Band,
    /// Distance from the kerb to the car's centre line.
    pub dist_lateral:      Band,
    pub tiles_per_metre:   f64,
    pub vehicle_width:     f64,
    pub vehicle_height:    f64,
    /// `Some` switches pedestrians to the stop/go rule with this threshold.
    pub min_time_to_cross: Option<f64>,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            sim:               SimConfig { max_steps: 2, seed: 0, snapshot_interval: 1 },
            trials:            500,
            dist_ahead:        Band { mean: 40.0, std_dev: 12.0, min: 5.0, max: 75.0 },
            dist_lateral:      Band { mean: 6.3, std_dev: 1.9, min: 0.6, max: 12.0 },
            tiles_per_metre:   10.0,
            vehicle_width:     100.0,
            vehicle_height:    50.0,
            min_time_to_cross: None,
        }
    }
}

impl TrialConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.sim.snapshot_interval != 1 {
            bail!("snapshot_interval must be 1 so every step is sampled");
        }
        for (name, band) in [("dist_ahead", &self.dist_ahead), ("dist_lateral", &self.dist_lateral)] {
            if !(band.min <= band.max) {
                bail!("{name}: min {} exceeds max {}", band.min, band.max);
            }
        }
        if !(self.tiles_per_metre > 0.0 && self.vehicle_width > 0.0 && self.vehicle_height > 0.0) {
            bail!("tiles_per_metre and vehicle size must be positive");
        }
        Ok(())
    }

    pub fn sampler(&self) -> Result<Sampler> {
        let normal = |b: &Band| Normal::new(b.mean, b.std_dev).context("invalid normal distribution");
        Ok(Sampler {
            ahead:           normal(&self.dist_ahead)?,
            lateral:         normal(&self.dist_lateral)?,
            ahead_band:      self.dist_ahead,
            lateral_band:    self.dist_lateral,
            tiles_per_metre: self.tiles_per_metre,
        })
    }
}

/// Draws trial placements.
pub struct Sampler {
    ahead:           Normal<f64>,
    lateral:         Normal<f64>,
    ahead_band:      Band,
    lateral_band:    Band,
    tiles_per_metre: f64,
}

impl Sampler {
    pub fn sample(&self, rng: &mut SimRng) -> Placement {
        let ahead = self.ahead.sample(rng.inner()).clamp(self.ahead_band.min, self.ahead_band.max);
        let lateral = self.lateral.sample(rng.inner()).clamp(self.lateral_band.min, self.lateral_band.max);
        let kerb = rng.gen_range(0..KERBS.len());
        Placement::new(
            (ahead * self.tiles_per_metre).round(),
            (lateral * self.tiles_per_metre).round(),
            kerb,
        )
    }
}

/// One trial's geometry, in tiles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    pub dist_ahead:    f64,
    pub dist_lateral:  f64,
    pub kerb:          usize,
    /// Both agents cover their distance in three steps.
    pub vehicle_speed: f64,
    pub ped_speed:     f64,
}

impl Placement {
    pub fn new(dist_ahead: f64, dist_lateral: f64, kerb: usize) -> Self {
        Self {
            dist_ahead,
            dist_lateral,
            kerb,
            vehicle_speed: (dist_ahead / 3.0).ceil(),
            ped_speed: (dist_lateral / 3.0).ceil(),
        }
    }

    /// Midpoint of the car's front edge.
    pub fn vehicle_front(&self) -> Point {
        let (kerb, heading) = KERBS[self.kerb % KERBS.len()];
        let lateral = if heading == Direction::South { self.dist_lateral } else { -self.dist_lateral };
        Point::new(kerb.x - self.dist_ahead, kerb.y + lateral)
    }

    /// Build the pedestrian and the East-bound car.  The car joins the
    /// lane under its front, or the first lane when none is.
    pub fn agents(
        &self,
        cfg:   &TrialConfig,
        ped:   AgentId,
        veh:   AgentId,
        lanes: &[Lane],
    ) -> Result<(Pedestrian, Vehicle)> {
        let (kerb, heading) = KERBS[self.kerb % KERBS.len()];
        let pedestrian = match cfg.min_time_to_cross {
            Some(min) => Pedestrian::stop_go(ped, kerb, heading, self.ped_speed, min),
            None => Pedestrian::walker(ped, kerb, heading, self.ped_speed),
        };

        let front = self.vehicle_front();
        let (road, lane) = lanes
            .iter()
            .find(|l| l.rect.contains(front))
            .or_else(|| lanes.first())
            .map(|l| (l.road, l.id))
            .unwrap_or((RoadId(0), LaneId(0)));
        let origin = Point::new(front.x - cfg.vehicle_width, front.y - cfg.vehicle_height / 2.0);
        let vehicle = Vehicle::new(veh, origin, Direction::East, cfg.vehicle_width, cfg.vehicle_height, road, lane)?
            .with_speed(self.vehicle_speed);
        Ok((pedestrian, vehicle))
    }
}
