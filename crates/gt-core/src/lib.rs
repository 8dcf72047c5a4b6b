//! `gt-core` — foundational types for the grid-traffic environments.
//!
//! This crate is a dependency of every other `gt-*` crate.  It has no `gt-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `LaneId`, `RoadId`, `CrosswalkId`          |
//! | [`geo`]         | `Point`, `Rect`, `Corner`                             |
//! | [`direction`]   | `Direction` (MiniGrid index order)                    |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (one per environment instance)               |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod direction;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use geo::{Corner, Point, Rect};
pub use ids::{AgentId, CrosswalkId, LaneId, RoadId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
