//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::Point;

/// The top-level error type for `gt-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid rectangle: top-left {top_left} is not above-left of bottom-right {bottom_right}")]
    InvalidRect { top_left: Point, bottom_right: Point },
}

/// Shorthand result type for all `gt-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
