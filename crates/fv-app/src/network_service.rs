//! Pipe network grouping, tree building and DOT export.

use std::collections::HashMap;

use fv_core::SegmentId;
use fv_graph::{EndpointCoincidence, PipeTree, PipelineSegment, TreeBuilder, group_segments, to_dot_bounded};
use fv_schedule::{PipeSchedule, SeriesMode};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::FvConfig;
use crate::error::AppResult;
use crate::host::{SegmentSource, ensure_unique_ids};
use crate::label_service::resolve_label;

/// A connected group whose tree could not be built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupFailure {
    pub group: usize,
    pub segments: Vec<SegmentId>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkExport {
    pub dot: String,
    pub trees: usize,
    pub cross_links: usize,
    /// Trees whose traversal hit the node budget.
    pub truncated: usize,
    pub failures: Vec<GroupFailure>,
    #[serde(skip)]
    pub forest: Vec<PipeTree>,
}

/// Group the source's segments, build one tree per group and render DOT.
///
/// Node labels are the segment name plus its size label (empty when the
/// size cannot be resolved). A failing group is recorded and skipped.
pub fn export_network<S>(schedule: &PipeSchedule, source: &S, config: &FvConfig) -> AppResult<NetworkExport>
where
    S: SegmentSource + ?Sized,
{
    let records = source.segments()?;
    ensure_unique_ids(&records)?;
    let segments: Vec<PipelineSegment> = records.iter().map(|r| r.to_segment()).collect();
    let widths: HashMap<SegmentId, Option<f64>> =
        records.iter().map(|r| (r.id, r.constant_width_m)).collect();

    let groups = group_segments(&segments, &EndpointCoincidence, config.tolerance)?;
    let builder = TreeBuilder::with_options(config.build_options());

    let mut forest = Vec::with_capacity(groups.len());
    let mut failures = Vec::new();
    for (n, (group, built)) in groups
        .iter()
        .zip(builder.build_forest(&groups, &EndpointCoincidence, config.tolerance))
        .enumerate()
    {
        match built {
            Ok(tree) => forest.push(tree),
            Err(err) => {
                warn!(group = n, error = %err, "pipe group skipped");
                failures.push(GroupFailure {
                    group: n,
                    segments: group.iter().map(|s| s.id).collect(),
                    message: err.to_string(),
                });
            }
        }
    }

    let factor = config.traversal_budget_factor;
    let truncated = forest
        .iter()
        .filter(|t| !t.depth_first(t.len().saturating_mul(factor)).is_complete())
        .count();
    let cross_links = forest.iter().map(|t| t.cross_links().len()).sum();

    let dot = to_dot_bounded(&forest, factor, |seg| {
        let width = widths.get(&seg.id).copied().flatten();
        resolve_label(schedule, &seg.layer, width, SeriesMode::Lenient).unwrap_or_default()
    });

    info!(
        segments = segments.len(),
        trees = forest.len(),
        failed = failures.len(),
        "network exported"
    );
    Ok(NetworkExport {
        dot,
        trees: forest.len(),
        cross_links,
        truncated,
        failures,
        forest,
    })
}
