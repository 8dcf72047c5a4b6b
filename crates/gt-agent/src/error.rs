//! Agent-subsystem error type.

use thiserror::Error;

use gt_core::AgentId;

/// Errors produced by `gt-agent`.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {0} is already registered")]
    DuplicateId(AgentId),

    #[error("agent {0} is not registered")]
    NotFound(AgentId),

    #[error("agent {agent}: speed {speed} must lie in [0, {max_speed}]")]
    InvalidSpeed { agent: AgentId, speed: f64, max_speed: f64 },

    #[error("agent {agent}: footprint {width} x {height} must have positive size")]
    InvalidSize { agent: AgentId, width: f64, height: f64 },
}

pub type AgentResult<T> = Result<T, AgentError>;
