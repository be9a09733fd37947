//! Graph-specific error types.

use fv_core::SegmentId;
use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Tree construction errors. Each is fatal for the group being built only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// No segments were given.
    #[error("Pipeline group is empty")]
    EmptyGroup,

    /// The same segment id occurs twice in one group.
    #[error("Segment {segment} occurs more than once in the group")]
    DuplicateSegment { segment: SegmentId },

    /// The adjacency predicate failed.
    #[error("Adjacency test between segments {a} and {b} failed: {message}")]
    Adjacency {
        a: SegmentId,
        b: SegmentId,
        message: String,
    },

    /// A segment of the group cannot be reached from the root.
    #[error("Segment {segment} is not connected to root segment {root}")]
    Disconnected { segment: SegmentId, root: SegmentId },

    /// A segment connects to more than one possible parent.
    #[error("Segment {segment} has several possible parents: {parents:?}")]
    AmbiguousParent {
        segment: SegmentId,
        parents: Vec<SegmentId>,
    },

    /// The tree check reached a segment twice.
    #[error("Segment {segment} is reachable more than once from the root")]
    Cycle { segment: SegmentId },
}
