use gt_agent::AgentError;
use gt_core::{AgentId, CoreError};
use gt_road::RoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("environment configuration error: {0}")]
    Config(String),

    #[error("more than one action supplied for agent {0} in one step")]
    DuplicateAction(AgentId),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Road(#[from] RoadError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
