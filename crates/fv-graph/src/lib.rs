//! fv-graph: pipeline connectivity layer.
//!
//! Provides:
//! - Pipeline segments and the adjacency predicate seam
//! - Grouping of segments into connected groups
//! - Rooted tree construction per group (root = largest DN)
//! - Bounded depth-first traversal and DOT export
//!
//! # Example
//!
//! ```
//! use fv_core::SegmentId;
//! use fv_graph::{EndpointCoincidence, PipelineSegment, Point, TreeBuilder};
//!
//! let main = PipelineSegment::new(SegmentId::from_index(0), "Main", [Point::new(0.0, 0.0), Point::new(10.0, 0.0)], 200);
//! let branch = PipelineSegment::new(SegmentId::from_index(1), "Branch", [Point::new(10.0, 0.0), Point::new(10.0, 5.0)], 100);
//!
//! let tree = TreeBuilder::new().build(&[main, branch], &EndpointCoincidence, 0.01).unwrap();
//! assert_eq!(tree.segment(tree.root()).name, "Main");
//! assert_eq!(tree.children(tree.root()).len(), 1);
//! ```

pub mod adjacency;
pub mod builder;
pub mod dot;
pub mod error;
pub mod grouping;
pub mod segment;
pub mod traverse;
pub mod tree;

// Re-exports for ergonomics
pub use adjacency::{Adjacency, EndpointCoincidence};
pub use builder::{AmbiguityPolicy, BuildOptions, TreeBuilder};
pub use dot::{to_dot, to_dot_bounded};
pub use error::{GraphError, GraphResult};
pub use grouping::group_segments;
pub use segment::{PipelineSegment, Point};
pub use traverse::{Traversal, TraversalLimitExceeded};
pub use tree::{NodeIdx, PipeTree, TreeNode};
