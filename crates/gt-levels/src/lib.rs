//! `gt-levels` — multi-room grids and go-to level generation.
//!
//! A [`Level`] fills a fresh [`RoomGrid`] and returns the [`GoToInstr`] the
//! agent must complete.  [`generate`] owns the retry loop: a layout the level
//! rejects, or one where a placement runs out of attempts, is discarded and a
//! new one drawn, up to [`MAX_GENERATION_ATTEMPTS`].
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`room`]  | `Layout`, `Room`, `RoomGrid`                                  |
//! | [`instr`] | `ObjDesc`, `GoToInstr`                                        |
//! | [`level`] | `Level` trait, `Mission`, `generate`                          |
//! | [`goto`]  | the ten go-to levels, `level_by_name`, `LEVEL_NAMES`          |
//! | [`error`] | `LevelError`, `LevelResult<T>`                                |
//!
//! ```rust,ignore
//! let level = gt_levels::level_by_name("GoToLocal").unwrap();
//! let mission = gt_levels::generate(level.as_ref(), 7)?;
//! println!("{}", mission.surface());   // e.g. "go to the purple key"
//! ```

pub mod error;
pub mod goto;
pub mod instr;
pub mod level;
pub mod room;


pub use error::{LevelError, LevelResult};
pub use goto::{
    GoTo, GoToDoor, GoToImpUnlock, GoToLocal, GoToObj, GoToObjDoor, GoToRedBall, GoToRedBallGrey,
    GoToRedBallNoDists, GoToRedBlueBall, LEVEL_NAMES, level_by_name,
};
pub use instr::{GoToInstr, ObjDesc};
pub use level::{Level, MAX_GENERATION_ATTEMPTS, Mission, generate};
pub use room::{Layout, MAX_CONNECT_ITERATIONS, Room, RoomGrid};
