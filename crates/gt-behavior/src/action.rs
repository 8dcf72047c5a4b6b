//! Agent actions.

use gt_core::AgentId;

/// What an agent does this tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Move `speed` units along the current direction.
    Keep,
    /// Stay in place.
    Stop,
    /// Speed up by one unit (capped at `max_speed`), then move.
    Accelerate,
    /// Slow down by one unit (floored at zero), then move.
    Slowdown,
    /// Vehicles only: move to the adjacent lane on the left, then move.
    LaneLeft,
    /// Vehicles only: move to the adjacent lane on the right, then move.
    LaneRight,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Keep       => "keep",
            Verb::Stop       => "stop",
            Verb::Accelerate => "accelerate",
            Verb::Slowdown   => "slowdown",
            Verb::LaneLeft   => "lane_left",
            Verb::LaneRight  => "lane_right",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verb addressed to one agent.  At most one per agent per step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Action {
    pub agent: AgentId,
    pub verb:  Verb,
}

impl Action {
    #[inline]
    pub fn new(agent: AgentId, verb: Verb) -> Self {
        Self { agent, verb }
    }
}
