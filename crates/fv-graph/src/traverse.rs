//! Bounded depth-first traversal.

use thiserror::Error;
use tracing::warn;

use crate::tree::{NodeIdx, PipeTree};

/// The node budget ran out before the traversal finished.
///
/// A diagnostic only: the partial order is still returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Traversal stopped after visiting {visited} nodes (budget {budget})")]
pub struct TraversalLimitExceeded {
    pub budget: usize,
    pub visited: usize,
}

/// Pre-order visit sequence from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    pub order: Vec<NodeIdx>,
    pub limit_exceeded: Option<TraversalLimitExceeded>,
}

impl Traversal {
    pub fn is_complete(&self) -> bool {
        self.limit_exceeded.is_none()
    }
}

impl PipeTree {
    /// Explicit-stack pre-order walk, children in stored order.
    ///
    /// Stops once `budget` nodes have been visited and unvisited nodes remain.
    pub fn depth_first(&self, budget: usize) -> Traversal {
        let mut order = Vec::with_capacity(budget.min(self.len()));
        let mut stack = vec![self.root()];

        while let Some(idx) = stack.pop() {
            if order.len() >= budget {
                let limit = TraversalLimitExceeded {
                    budget,
                    visited: order.len(),
                };
                warn!(
                    root = %self.segment(self.root()).id,
                    budget,
                    "traversal budget exhausted, returning partial order"
                );
                return Traversal {
                    order,
                    limit_exceeded: Some(limit),
                };
            }
            order.push(idx);
            stack.extend(self.children(idx).iter().rev().copied());
        }

        Traversal {
            order,
            limit_exceeded: None,
        }
    }

    /// [`PipeTree::depth_first`] with [`PipeTree::default_budget`].
    pub fn traverse(&self) -> Traversal {
        self.depth_first(self.default_budget())
    }
}
