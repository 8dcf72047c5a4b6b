//! `gt-sim` — the traffic environment and its step loop.
//!
//! # Step phases
//!
//! ```text
//! step(actions):
//!   ① Refresh   — rebuild every crosswalk's incoming-vehicle slots from the
//!                 vehicle registry.
//!   ② Decide    — vehicle hooks, then pedestrian hooks, all against the same
//!                 tick-start SimContext (pedestrians in parallel with the
//!                 `parallel` feature).  A supplied action replaces the hook
//!                 for its agent.
//!   ③ Apply     — in ascending AgentId order:
//!                   Keep                   → move `speed` along direction
//!                   Stop                   → stay
//!                   Accelerate / Slowdown  → speed ± 1 within [0, max], move
//!                   LaneLeft / LaneRight   → shift to adjacent lane, move
//!   ④ Collide   — pedestrian point inside a vehicle footprint.
//!   ⑤ Advance   — clock, observer callbacks, done check.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the pedestrian decision phase on Rayon.           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gt_core::SimConfig;
//! use gt_sim::{EnvBuilder, NoopObserver, scenario};
//!
//! let mut env = EnvBuilder::new(SimConfig::default(), scenario::two_lane_road()?)
//!     .pedestrian(ped)
//!     .vehicle(car)
//!     .build()?;
//! env.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod env;
pub mod error;
pub mod observer;
pub mod scenario;

#[cfg(test)]
mod tests;

pub use builder::EnvBuilder;
pub use env::{Observation, StepInfo, StepOutcome, TrafficEnv};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
