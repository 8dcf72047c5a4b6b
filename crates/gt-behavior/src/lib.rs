//! `gt-behavior` — what agents decide each tick.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`action`]    | `Verb`, `Action`                                               |
//! | [`context`]   | `SimContext<'a>` — read-only tick-start snapshot               |
//! | [`hooks`]     | `PedHook`/`VehicleHook`, dispatch from model tags, simple hooks |
//! | [`stop_go`]   | the stop/go pedestrian crossing rule                           |
//!
//! # Design notes
//!
//! The step loop in gt-sim runs in two phases:
//!
//! 1. **Decision phase**: every agent without an externally supplied action
//!    has its hook called against the same `&SimContext`.  Vehicle hooks are
//!    pure; pedestrian hooks may only touch the pedestrian's own plan state.
//!
//! 2. **Apply phase** (sequential, ascending `AgentId`): the collected
//!    `Action`s move agents.
//!
//! Hooks are plain function pointers chosen by the agent's model tag, so
//! adding a behaviour means adding a tag variant and a function.

pub mod action;
pub mod context;
pub mod hooks;
pub mod stop_go;


pub use action::{Action, Verb};
pub use context::SimContext;
pub use hooks::{PedHook, VehicleHook, ped_hook, vehicle_hook};
