//! Arena-backed rooted tree of pipeline segments.

use std::collections::HashSet;

use crate::error::{GraphError, GraphResult};
use crate::segment::PipelineSegment;

/// Index of a node in its tree's arena.
pub type NodeIdx = usize;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub segment: PipelineSegment,
    pub parent: Option<NodeIdx>,
    /// Ordered by DN descending, then segment id.
    pub children: Vec<NodeIdx>,
}

/// One connected group oriented away from its largest pipe.
///
/// Nodes are addressed by stable index; parent links are stored next to the
/// child lists and checked against them by [`PipeTree::validate`].
#[derive(Debug, Clone)]
pub struct PipeTree {
    pub(crate) nodes: Vec<TreeNode>,
    pub(crate) root: NodeIdx,
    pub(crate) cross_links: Vec<(NodeIdx, NodeIdx)>,
}

impl PipeTree {
    pub fn root(&self) -> NodeIdx {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: NodeIdx) -> &TreeNode {
        &self.nodes[idx]
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn segment(&self, idx: NodeIdx) -> &PipelineSegment {
        &self.nodes[idx].segment
    }

    pub fn children(&self, idx: NodeIdx) -> &[NodeIdx] {
        &self.nodes[idx].children
    }

    pub fn parent(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.nodes[idx].parent
    }

    /// Adjacencies not used as tree edges, as (node, rejected parent).
    pub fn cross_links(&self) -> &[(NodeIdx, NodeIdx)] {
        &self.cross_links
    }

    /// Arena index of the node holding `segment`.
    pub fn find(&self, segment: fv_core::SegmentId) -> Option<NodeIdx> {
        self.nodes.iter().position(|n| n.segment.id == segment)
    }

    /// Node budget for traversals of this tree: twice its size.
    pub fn default_budget(&self) -> usize {
        self.nodes.len().saturating_mul(2)
    }

    /// Check that every node is reached exactly once from the root and that
    /// parent links agree with the child lists.
    pub fn validate(&self) -> GraphResult<()> {
        let mut visited = HashSet::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        if self.nodes[self.root].parent.is_some() {
            return Err(GraphError::Cycle {
                segment: self.nodes[self.root].segment.id,
            });
        }

        while let Some(idx) = stack.pop() {
            if !visited.insert(idx) {
                return Err(GraphError::Cycle {
                    segment: self.nodes[idx].segment.id,
                });
            }
            for &child in &self.nodes[idx].children {
                if self.nodes[child].parent != Some(idx) {
                    return Err(GraphError::Cycle {
                        segment: self.nodes[child].segment.id,
                    });
                }
                stack.push(child);
            }
        }

        let root_id = self.nodes[self.root].segment.id;
        match self.nodes.iter().enumerate().find(|(i, _)| !visited.contains(i)) {
            Some((_, node)) => Err(GraphError::Disconnected {
                segment: node.segment.id,
                root: root_id,
            }),
            None => Ok(()),
        }
    }
}
