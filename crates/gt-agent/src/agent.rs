//! Agent data: the shared kinematic core and the two agent kinds.
//!
//! Speeds are world units per tick.  A pedestrian's position is a point; a
//! vehicle's position is the top-left corner of its footprint, whose size
//! is fixed at construction.

use gt_core::{AgentId, Direction, LaneId, Point, Rect, RoadId};
use gt_road::VehicleFootprint;

use crate::{AgentError, AgentResult};

// ── AgentCore ─────────────────────────────────────────────────────────────────

/// State every agent carries regardless of kind.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentCore {
    pub id:        AgentId,
    pub position:  Point,
    pub direction: Direction,
    pub speed:     f64,
    pub max_speed: f64,
}

impl AgentCore {
    /// A core whose `max_speed` starts equal to `speed`.
    pub fn new(id: AgentId, position: Point, direction: Direction, speed: f64) -> Self {
        Self { id, position, direction, speed, max_speed: speed }
    }

    /// Check `0 <= speed <= max_speed`.
    pub fn validate(&self) -> AgentResult<()> {
        let ok = self.speed.is_finite()
            && self.max_speed.is_finite()
            && self.speed >= 0.0
            && self.speed <= self.max_speed;
        if ok {
            Ok(())
        } else {
            Err(AgentError::InvalidSpeed {
                agent:     self.id,
                speed:     self.speed,
                max_speed: self.max_speed,
            })
        }
    }

    /// Move `speed` units along `direction`.
    #[inline]
    pub fn advance(&mut self) {
        self.position = self.position.offset(self.direction, self.speed);
    }

    /// Change speed by `delta`, clamped to `[0, max_speed]`.
    #[inline]
    pub fn adjust_speed(&mut self, delta: f64) {
        self.speed = (self.speed + delta).clamp(0.0, self.max_speed);
    }
}

// ── Pedestrian ────────────────────────────────────────────────────────────────

/// Which decision hook drives a pedestrian.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PedModel {
    /// Waits at the kerb until the incoming gap is large enough, then
    /// commits to a fixed number of crossing steps.
    StopGo,
    /// Walks at constant speed, ignoring traffic.
    Walk,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pedestrian {
    pub core:              AgentCore,
    pub model:             PedModel,
    /// Remaining committed crossing steps.  Zero while planning.
    pub steps_planned:     u32,
    /// Clearance (world units) that must be exceeded before committing.
    pub min_time_to_cross: f64,
}

impl Pedestrian {
    /// A pedestrian using the stop/go crossing rule.
    pub fn stop_go(
        id:                AgentId,
        position:          Point,
        direction:         Direction,
        speed:             f64,
        min_time_to_cross: f64,
    ) -> Self {
        Self {
            core: AgentCore::new(id, position, direction, speed),
            model: PedModel::StopGo,
            steps_planned: 0,
            min_time_to_cross,
        }
    }

    /// A pedestrian that never stops.
    pub fn walker(id: AgentId, position: Point, direction: Direction, speed: f64) -> Self {
        Self {
            core: AgentCore::new(id, position, direction, speed),
            model: PedModel::Walk,
            steps_planned: 0,
            min_time_to_cross: 0.0,
        }
    }

    /// Set the speed, raising `max_speed` if needed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.core.speed = speed;
        self.core.max_speed = self.core.max_speed.max(speed);
        self
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.core.max_speed = max_speed;
        self
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.core.id
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.core.position
    }

    /// `true` while the pedestrian has committed crossing steps left.
    #[inline]
    pub fn is_committed(&self) -> bool {
        self.steps_planned > 0
    }

    pub fn validate(&self) -> AgentResult<()> {
        self.core.validate()
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// Which decision hook drives a vehicle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleModel {
    /// Keeps its lane and speed.
    Cruise,
    /// Never moves.
    Parked,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    /// `core.position` is the footprint's top-left corner.
    pub core:    AgentCore,
    pub in_road: RoadId,
    pub in_lane: LaneId,
    pub model:   VehicleModel,
    /// Footprint anchored at the origin; translated by `core.position`.
    shape:       Rect,
}

impl Vehicle {
    /// A stationary cruising vehicle with its top-left corner at `origin`.
    ///
    /// Fails with [`AgentError::InvalidSize`] unless both dimensions are
    /// positive and finite.
    pub fn new(
        id:        AgentId,
        origin:    Point,
        direction: Direction,
        width:     f64,
        height:    f64,
        in_road:   RoadId,
        in_lane:   LaneId,
    ) -> AgentResult<Self> {
        let invalid = AgentError::InvalidSize { agent: id, width, height };
        if !(width > 0.0 && height > 0.0) {
            return Err(invalid);
        }
        let shape = Rect::from_origin_size(Point::default(), width, height).map_err(|_| invalid)?;
        Ok(Self {
            core: AgentCore::new(id, origin, direction, 0.0),
            in_road,
            in_lane,
            model: VehicleModel::Cruise,
            shape,
        })
    }

    /// Set the speed, raising `max_speed` if needed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.core.speed = speed;
        self.core.max_speed = self.core.max_speed.max(speed);
        self
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.core.max_speed = max_speed;
        self
    }

    pub fn with_model(mut self, model: VehicleModel) -> Self {
        self.model = model;
        self
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.core.id
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.shape.width()
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.shape.height()
    }

    /// Current footprint.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.shape.translated(self.core.position.x, self.core.position.y)
    }

    pub fn footprint(&self) -> VehicleFootprint {
        VehicleFootprint {
            agent:     self.core.id,
            lane:      self.in_lane,
            rect:      self.rect(),
            direction: self.core.direction,
        }
    }

    /// Move into `lane`, aligning the footprint's cross-axis edge with the
    /// lane's.  Travel-axis position is unchanged.
    pub fn shift_to_lane(&mut self, lane: LaneId, lane_rect: &Rect) {
        let tl = lane_rect.top_left();
        if self.core.direction.is_horizontal() {
            self.core.position.y = tl.y;
        } else {
            self.core.position.x = tl.x;
        }
        self.in_lane = lane;
    }

    pub fn validate(&self) -> AgentResult<()> {
        self.core.validate()
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// Either kind of agent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Agent {
    Pedestrian(Pedestrian),
    Vehicle(Vehicle),
}

impl Agent {
    pub fn core(&self) -> &AgentCore {
        match self {
            Agent::Pedestrian(p) => &p.core,
            Agent::Vehicle(v) => &v.core,
        }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.core().id
    }

    pub fn validate(&self) -> AgentResult<()> {
        match self {
            Agent::Pedestrian(p) => p.validate(),
            Agent::Vehicle(v) => v.validate(),
        }
    }
}

impl From<Pedestrian> for Agent {
    fn from(p: Pedestrian) -> Self {
        Agent::Pedestrian(p)
    }
}

impl From<Vehicle> for Agent {
    fn from(v: Vehicle) -> Self {
        Agent::Vehicle(v)
    }
}
