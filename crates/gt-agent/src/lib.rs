//! `gt-agent` — pedestrians, vehicles, and the agent registry.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`agent`]       | `AgentCore`, `Pedestrian`, `Vehicle`, tagged `Agent`      |
//! | [`registry`]    | `AgentRegistry` (ordered maps keyed by `AgentId`)         |
//! | [`error`]       | `AgentError`, `AgentResult`                               |
//!
//! Agents are plain data.  What an agent *does* each tick is decided by the
//! hook its model tag selects in `gt-behavior`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on agent types.          |

pub mod agent;
pub mod error;
pub mod registry;


pub use agent::{Agent, AgentCore, PedModel, Pedestrian, Vehicle, VehicleModel};
pub use error::{AgentError, AgentResult};
pub use registry::AgentRegistry;
