//! `gt-grid` — cell grids and the dynamically altered mini-grid.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`object`]  | `ObjKind`, `Color`, `DoorState`, `WorldObj`                  |
//! | [`grid`]    | `Grid`, `Pos`, `view_contains`, `front_of`                   |
//! | [`dynamic`] | `DynamicMiniGrid`, `Alteration`, `MAX_PLACEMENT_ATTEMPTS`    |
//! | [`error`]   | `GridError`, `GridResult<T>`                                 |
//!
//! Directions use the `gt_core::Direction` index order (East, South, West,
//! North), so `Direction::unit` doubles as the grid step.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on object types.           |

pub mod dynamic;
pub mod error;
pub mod grid;
pub mod object;


pub use dynamic::{Alteration, DynamicMiniGrid, MAX_PLACEMENT_ATTEMPTS};
pub use error::{GridError, GridResult};
pub use grid::{Grid, Pos, front_of, view_contains};
pub use object::{Color, DoorState, ObjKind, WorldObj};
