//! Level-generation error type.

use thiserror::Error;

use gt_grid::GridError;

/// Errors produced by `gt-levels`.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The current attempt produced an unusable layout; generation retries.
    #[error("layout rejected: {0}")]
    Reject(String),

    #[error("no acceptable layout after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },

    #[error("invalid level configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl LevelError {
    /// Whether a fresh generation attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LevelError::Reject(_) | LevelError::Grid(GridError::Placement { .. }))
    }
}

pub type LevelResult<T> = Result<T, LevelError>;
