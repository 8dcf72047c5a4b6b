//! `gt-road` — road network geometry and hazard queries.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`lane`]      | `Lane`, `Road`                                                |
//! | [`crosswalk`] | `Crosswalk`, `IncomingVehicle`, `VehicleFootprint`, `approach_gap` |
//! | [`network`]   | `RoadNetwork` (+ R-tree of crosswalk centres), `RoadNetworkBuilder` |
//! | [`error`]     | `RoadError`, `RoadResult<T>`                                  |
//!
//! The network is immutable after [`RoadNetworkBuilder::build`] except for
//! the per-crosswalk incoming-vehicle slots, which the environment refreshes
//! from its vehicle registry at the start of every tick.
//!
//! This crate does not depend on `gt-agent`: vehicles are seen through the
//! minimal [`VehicleFootprint`] view.

pub mod crosswalk;
pub mod error;
pub mod lane;
pub mod network;

#[cfg(test)]
mod tests;

pub use crosswalk::{Crosswalk, IncomingVehicle, VehicleFootprint, approach_gap};
pub use error::{RoadError, RoadResult};
pub use lane::{Lane, Road};
pub use network::{RoadNetwork, RoadNetworkBuilder};
