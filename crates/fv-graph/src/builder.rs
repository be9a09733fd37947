//! Rooted tree construction for one connected group of segments.

use std::cmp::Reverse;
use std::collections::HashSet;

use fv_core::{Real, SegmentId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::adjacency::{Adjacency, neighbour_lists};
use crate::error::{GraphError, GraphResult};
use crate::segment::PipelineSegment;
use crate::tree::{NodeIdx, PipeTree, TreeNode};

/// What to do when a segment touches more than one candidate parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguityPolicy {
    /// Keep the largest candidate and record the others as cross links.
    #[default]
    Resolve,
    /// Fail with `GraphError::AmbiguousParent`.
    Reject,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub ambiguity: AmbiguityPolicy,
}

/// Stateless tree builder; one instance can build any number of groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    options: BuildOptions,
}

// Larger DN first, then lower id.
fn priority(seg: &PipelineSegment) -> (Reverse<u32>, SegmentId) {
    (Reverse(seg.dn), seg.id)
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Build one tree per group. A failing group does not affect the others.
    pub fn build_forest<A: Adjacency + ?Sized>(
        &self,
        groups: &[Vec<PipelineSegment>],
        adjacency: &A,
        tolerance: Real,
    ) -> Vec<GraphResult<PipeTree>> {
        groups
            .iter()
            .map(|group| self.build(group, adjacency, tolerance))
            .collect()
    }

    /// Orient one connected group away from its largest segment.
    ///
    /// The root is the segment with the largest DN (lowest id on ties).
    /// Nodes are attached breadth first; a node touching several segments of
    /// the previous layer hangs under the one with the largest DN.
    pub fn build<A: Adjacency + ?Sized>(
        &self,
        group: &[PipelineSegment],
        adjacency: &A,
        tolerance: Real,
    ) -> GraphResult<PipeTree> {
        if group.is_empty() {
            return Err(GraphError::EmptyGroup);
        }
        let mut seen = HashSet::with_capacity(group.len());
        for seg in group {
            if !seen.insert(seg.id) {
                return Err(GraphError::DuplicateSegment { segment: seg.id });
            }
        }

        let neighbours = neighbour_lists(group, adjacency, tolerance)?;
        let root = (0..group.len())
            .min_by_key(|&i| priority(&group[i]))
            .ok_or(GraphError::EmptyGroup)?;

        let n = group.len();
        let mut parent: Vec<Option<NodeIdx>> = vec![None; n];
        let mut position: Vec<Option<usize>> = vec![None; n];
        let mut order = vec![root];
        position[root] = Some(0);

        let mut layer = vec![root];
        while !layer.is_empty() {
            let mut discovered: Vec<NodeIdx> = Vec::new();
            for &u in &layer {
                for &w in &neighbours[u] {
                    if position[w].is_none() && !discovered.contains(&w) {
                        discovered.push(w);
                    }
                }
            }
            for &w in &discovered {
                parent[w] = layer
                    .iter()
                    .copied()
                    .filter(|u| neighbours[w].binary_search(u).is_ok())
                    .min_by_key(|&u| priority(&group[u]));
            }
            // Next layer follows parent order, siblings by priority.
            let mut next = Vec::with_capacity(discovered.len());
            for &u in &layer {
                let mut kids: Vec<NodeIdx> = discovered
                    .iter()
                    .copied()
                    .filter(|&w| parent[w] == Some(u))
                    .collect();
                kids.sort_by_key(|&w| priority(&group[w]));
                next.extend(kids);
            }
            for &w in &next {
                position[w] = Some(order.len());
                order.push(w);
            }
            layer = next;
        }

        if let Some(missing) = (0..n).find(|&i| position[i].is_none()) {
            return Err(GraphError::Disconnected {
                segment: group[missing].id,
                root: group[root].id,
            });
        }

        let cross_links = self.cross_links(group, &neighbours, &parent, &position, &order)?;

        let mut nodes: Vec<TreeNode> = group
            .iter()
            .zip(&parent)
            .map(|(seg, &p)| TreeNode {
                segment: seg.clone(),
                parent: p,
                children: Vec::new(),
            })
            .collect();
        for &w in &order[1..] {
            if let Some(p) = parent[w] {
                nodes[p].children.push(w);
            }
        }
        for node in &mut nodes {
            node.children.sort_by_key(|&c| priority(&group[c]));
        }

        let tree = PipeTree {
            nodes,
            root,
            cross_links,
        };
        tree.validate()?;
        debug!(
            root = %group[root].id,
            nodes = tree.len(),
            cross_links = tree.cross_links().len(),
            "built pipe tree"
        );
        Ok(tree)
    }

    /// Adjacent pairs that did not become tree edges, as (later node, earlier
    /// node) in traversal order.
    fn cross_links(
        &self,
        group: &[PipelineSegment],
        neighbours: &[Vec<NodeIdx>],
        parent: &[Option<NodeIdx>],
        position: &[Option<usize>],
        order: &[NodeIdx],
    ) -> GraphResult<Vec<(NodeIdx, NodeIdx)>> {
        let mut links = Vec::new();
        for &v in order {
            let rejected: Vec<NodeIdx> = neighbours[v]
                .iter()
                .copied()
                .filter(|&u| position[u] < position[v] && parent[v] != Some(u) && parent[u] != Some(v))
                .collect();
            if rejected.is_empty() {
                continue;
            }

            if self.options.ambiguity == AmbiguityPolicy::Reject {
                let mut parents: Vec<SegmentId> = parent[v]
                    .into_iter()
                    .chain(rejected.iter().copied())
                    .map(|u| group[u].id)
                    .collect();
                parents.sort();
                return Err(GraphError::AmbiguousParent {
                    segment: group[v].id,
                    parents,
                });
            }

            for u in rejected {
                warn!(
                    segment = %group[v].id,
                    other = %group[u].id,
                    "adjacency not used as tree edge, recorded as cross link"
                );
                links.push((v, u));
            }
        }
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::EndpointCoincidence;
    use crate::segment::Point;

    fn seg(i: u32, dn: u32, a: (Real, Real), b: (Real, Real)) -> PipelineSegment {
        PipelineSegment::new(
            SegmentId::from_index(i),
            format!("S{i}"),
            [Point::new(a.0, a.1), Point::new(b.0, b.1)],
            dn,
        )
    }

    #[test]
    fn empty_and_duplicate_groups_fail() {
        let b = TreeBuilder::new();
        assert_eq!(
            b.build(&[], &EndpointCoincidence, 0.1).unwrap_err(),
            GraphError::EmptyGroup
        );
        let s = seg(0, 100, (0.0, 0.0), (1.0, 0.0));
        assert!(matches!(
            b.build(&[s.clone(), s], &EndpointCoincidence, 0.1),
            Err(GraphError::DuplicateSegment { .. })
        ));
    }

    #[test]
    fn chain_is_oriented_from_largest() {
        // 100 - 200 - 80 along the x axis
        let group = [
            seg(0, 100, (0.0, 0.0), (1.0, 0.0)),
            seg(1, 200, (1.0, 0.0), (2.0, 0.0)),
            seg(2, 80, (2.0, 0.0), (3.0, 0.0)),
        ];
        let tree = TreeBuilder::new()
            .build(&group, &EndpointCoincidence, 0.01)
            .unwrap();
        assert_eq!(tree.root(), 1);
        assert_eq!(tree.children(1), &[0, 2]);
        assert_eq!(tree.parent(0), Some(1));
        assert!(tree.cross_links().is_empty());
    }

    #[test]
    fn largest_candidate_becomes_parent() {
        // Triangle at one junction: every segment touches every other.
        let group = [
            seg(0, 200, (0.0, 0.0), (1.0, 0.0)),
            seg(1, 150, (1.0, 0.0), (2.0, 0.0)),
            seg(2, 100, (1.0, 0.0), (1.0, 1.0)),
        ];
        let tree = TreeBuilder::new()
            .build(&group, &EndpointCoincidence, 0.01)
            .unwrap();
        assert_eq!(tree.children(0), &[1, 2]);
        assert_eq!(tree.cross_links(), &[(2, 1)]);

        let strict = TreeBuilder::with_options(BuildOptions {
            ambiguity: AmbiguityPolicy::Reject,
        });
        let err = strict.build(&group, &EndpointCoincidence, 0.01).unwrap_err();
        assert_eq!(
            err,
            GraphError::AmbiguousParent {
                segment: SegmentId::from_index(2),
                parents: vec![SegmentId::from_index(0), SegmentId::from_index(1)],
            }
        );
    }
}
