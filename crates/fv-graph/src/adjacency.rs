//! Adjacency predicate seam and the pairwise adjacency pass.

use fv_core::Real;
use rayon::prelude::*;
use std::collections::BTreeSet;

use crate::error::GraphResult;
use crate::segment::PipelineSegment;

/// Decides whether two segments are connected.
///
/// Implemented by the host geometry; closures with the matching signature
/// implement it too. Called for ordered pairs, possibly from several threads.
pub trait Adjacency: Sync {
    fn adjacent(&self, a: &PipelineSegment, b: &PipelineSegment, tolerance: Real) -> GraphResult<bool>;
}

impl<F> Adjacency for F
where
    F: Fn(&PipelineSegment, &PipelineSegment, Real) -> GraphResult<bool> + Sync,
{
    fn adjacent(&self, a: &PipelineSegment, b: &PipelineSegment, tolerance: Real) -> GraphResult<bool> {
        self(a, b, tolerance)
    }
}

/// Two segments are adjacent when an endpoint of one lies strictly within
/// `tolerance` of an endpoint of the other.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointCoincidence;

impl Adjacency for EndpointCoincidence {
    fn adjacent(&self, a: &PipelineSegment, b: &PipelineSegment, tolerance: Real) -> GraphResult<bool> {
        Ok(a
            .endpoints
            .iter()
            .any(|p| b.endpoints.iter().any(|q| p.distance(q) < tolerance)))
    }
}

/// Symmetric neighbour lists (sorted indices) for every segment.
///
/// Pairs are tested in parallel; results are merged afterwards.
pub(crate) fn neighbour_lists<A: Adjacency + ?Sized>(
    segments: &[PipelineSegment],
    adjacency: &A,
    tolerance: Real,
) -> GraphResult<Vec<Vec<usize>>> {
    let n = segments.len();
    let hits = (0..n)
        .into_par_iter()
        .map(|i| -> GraphResult<Vec<usize>> {
            let mut out = Vec::new();
            for j in 0..n {
                if i != j && adjacency.adjacent(&segments[i], &segments[j], tolerance)? {
                    out.push(j);
                }
            }
            Ok(out)
        })
        .collect::<GraphResult<Vec<_>>>()?;

    let mut sets = vec![BTreeSet::new(); n];
    for (i, js) in hits.into_iter().enumerate() {
        for j in js {
            sets[i].insert(j);
            sets[j].insert(i);
        }
    }
    Ok(sets
        .into_iter()
        .map(|s| s.into_iter().collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::segment::Point;
    use fv_core::SegmentId;

    fn seg(i: u32, a: (Real, Real), b: (Real, Real)) -> PipelineSegment {
        PipelineSegment::new(
            SegmentId::from_index(i),
            format!("S{i}"),
            [Point::new(a.0, a.1), Point::new(b.0, b.1)],
            100,
        )
    }

    #[test]
    fn endpoint_coincidence_uses_strict_tolerance() {
        let a = seg(0, (0.0, 0.0), (10.0, 0.0));
        let b = seg(1, (10.5, 0.0), (20.0, 0.0));
        assert!(EndpointCoincidence.adjacent(&a, &b, 0.6).unwrap());
        assert!(!EndpointCoincidence.adjacent(&a, &b, 0.5).unwrap());
    }

    #[test]
    fn one_sided_predicate_is_symmetrised() {
        let segs = [
            seg(0, (0.0, 0.0), (1.0, 0.0)),
            seg(1, (5.0, 0.0), (6.0, 0.0)),
        ];
        let only_forward = |a: &PipelineSegment, b: &PipelineSegment, _t: Real| -> GraphResult<bool> {
            Ok(a.id.index() == 0 && b.id.index() == 1)
        };
        let lists = neighbour_lists(&segs, &only_forward, 0.0).unwrap();
        assert_eq!(lists, vec![vec![1], vec![0]]);
    }

    #[test]
    fn predicate_failure_propagates() {
        let segs = [
            seg(0, (0.0, 0.0), (1.0, 0.0)),
            seg(1, (1.0, 0.0), (2.0, 0.0)),
        ];
        let failing = |a: &PipelineSegment, b: &PipelineSegment, _t: Real| -> GraphResult<bool> {
            Err(GraphError::Adjacency {
                a: a.id,
                b: b.id,
                message: "degenerate geometry".into(),
            })
        };
        let err = neighbour_lists(&segs, &failing, 0.1).unwrap_err();
        assert!(matches!(err, GraphError::Adjacency { .. }));
    }
}
