use tc_core::{CheckpointId, Direction};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route has no checkpoints")]
    EmptyRoute,

    #[error("shared segment has no checkpoints")]
    EmptySegment,

    #[error("checkpoint {0} appears more than once in the route")]
    DuplicateCheckpoint(CheckpointId),

    #[error("shared segment is not a contiguous run of the route")]
    SegmentNotContiguous,

    #[error("shared segment contains the lap-end checkpoint {0}")]
    SegmentContainsLapEnd(CheckpointId),

    #[error("{role} checkpoint of the {direction} traversal falls outside the lap")]
    BoundaryOutsideLap {
        direction: Direction,
        role:      &'static str,
    },

    #[error("layout parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RouteResult<T> = Result<T, RouteError>;
