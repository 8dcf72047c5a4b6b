//! Road-subsystem error type.

use thiserror::Error;

use gt_core::{CoreError, CrosswalkId, LaneId, RoadId};

/// Errors produced by `gt-road`.
#[derive(Debug, Error)]
pub enum RoadError {
    #[error("lane {0} not found in network")]
    UnknownLane(LaneId),

    #[error("road {0} not found in network")]
    UnknownRoad(RoadId),

    #[error("crosswalk {0} not found in network")]
    UnknownCrosswalk(CrosswalkId),

    #[error("invalid road geometry: {0}")]
    Geometry(#[from] CoreError),
}

pub type RoadResult<T> = Result<T, RoadError>;
