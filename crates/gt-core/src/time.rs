//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter; one tick is one call to
//! the environment's `step`.  Agent speeds are expressed in world units per
//! tick, so no wall-clock mapping is needed.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Episode clock.  Advanced once per step, rewound on reset.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self { current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    #[inline]
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_tick)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Per-episode configuration.
///
/// Typically loaded from JSON by the application crate and passed to the
/// environment builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Episode length.  `step` reports `done` once this many steps ran.
    pub max_steps: u64,

    /// Master RNG seed.  The same seed always produces identical episodes.
    pub seed: u64,

    /// Call `SimObserver::on_step_end` every N steps.  1 = every step;
    /// 0 disables step observation entirely.
    pub snapshot_interval: u64,
}

impl SimConfig {
    /// The tick at which the episode ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.max_steps)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { max_steps: 100, seed: 0, snapshot_interval: 1 }
    }
}
