//! Grid-subsystem error type.

use thiserror::Error;

/// Errors produced by `gt-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("alteration probabilities must have 4 entries (start, goal, wall, lava), got {len}")]
    ProbLength { len: usize },

    #[error("alteration probabilities must sum to 1, got {sum}")]
    ProbSum { sum: f64 },

    #[error("alteration probability {index} is negative ({value})")]
    ProbNegative { index: usize, value: f64 },

    #[error("no valid cell for {what} after {attempts} attempts")]
    Placement { what: &'static str, attempts: u32 },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },

    #[error("grid size {0} leaves no room for both the agent and the goal")]
    TooSmall(usize),
}

pub type GridResult<T> = Result<T, GridError>;
