//! Environment observer trait for progress reporting and data collection.

use gt_agent::AgentRegistry;
use gt_core::Tick;

/// Callbacks invoked by the environment at key points of an episode.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — collision counter
///
/// ```rust,ignore
/// struct Collisions(usize);
///
/// impl SimObserver for Collisions {
///     fn on_step_end(&mut self, _tick: Tick, agents: &AgentRegistry) {
///         // inspect agents ...
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after the environment was reset, with the initial agent state.
    fn on_reset(&mut self, _agents: &AgentRegistry) {}

    /// Called at the very start of each step, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after each step was applied, every `config.snapshot_interval`
    /// steps.  `tick` is the clock value after the step.
    fn on_step_end(&mut self, _tick: Tick, _agents: &AgentRegistry) {}

    /// Called once when [`run`](crate::TrafficEnv::run) finishes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
