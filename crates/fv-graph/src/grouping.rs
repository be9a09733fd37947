//! Partition segments into connected groups.

use std::collections::BTreeMap;

use fv_core::Real;

use crate::adjacency::{Adjacency, neighbour_lists};
use crate::error::GraphResult;
use crate::segment::PipelineSegment;

struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// Group segments by the transitive closure of `adjacency`.
///
/// Groups are ordered by their smallest segment id; segments keep their
/// input order within a group.
pub fn group_segments<A: Adjacency + ?Sized>(
    segments: &[PipelineSegment],
    adjacency: &A,
    tolerance: Real,
) -> GraphResult<Vec<Vec<PipelineSegment>>> {
    let neighbours = neighbour_lists(segments, adjacency, tolerance)?;
    let mut sets = DisjointSet::new(segments.len());
    for (i, js) in neighbours.iter().enumerate() {
        for &j in js {
            sets.union(i, j);
        }
    }

    let mut by_root: BTreeMap<usize, Vec<PipelineSegment>> = BTreeMap::new();
    for (i, seg) in segments.iter().enumerate() {
        by_root.entry(sets.find(i)).or_default().push(seg.clone());
    }

    let mut groups: Vec<Vec<PipelineSegment>> = by_root.into_values().collect();
    groups.sort_by_key(|g| g.iter().map(|s| s.id).min());
    Ok(groups)
}
