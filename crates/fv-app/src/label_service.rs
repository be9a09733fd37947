//! Batch size labelling and single-layer lookups.

use fv_core::{SegmentId, m};
use fv_schedule::{PipeDescriptor, PipeDimensions, PipeSchedule, ScheduleError, SeriesMode, classify};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::AppResult;
use crate::host::{LabelSink, SegmentSource, ensure_unique_ids};

/// Why one segment got no label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelIssue {
    pub segment: SegmentId,
    pub layer: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabelReport {
    pub labelled: usize,
    pub issues: Vec<LabelIssue>,
}

impl LabelReport {
    pub fn total(&self) -> usize {
        self.labelled + self.issues.len()
    }
}

/// Classification of one layer, with dimensions when a width is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerReport {
    pub layer: String,
    pub descriptor: PipeDescriptor,
    pub outer_diameter_mm: f64,
    pub dimensions: Option<PipeDimensions>,
}

/// Classify a layer name and collect what the catalog knows about it.
pub fn describe_layer(schedule: &PipeSchedule, layer: &str, width_m: Option<f64>) -> AppResult<LayerReport> {
    let descriptor = classify(layer)?;
    let dimensions = match width_m {
        Some(w) => Some(schedule.dimensions(&descriptor, m(w))?),
        None => None,
    };
    Ok(LayerReport {
        layer: layer.to_string(),
        outer_diameter_mm: schedule.outer_diameter(&descriptor),
        descriptor,
        dimensions,
    })
}

/// Label every segment the source delivers.
///
/// Classification and series failures are recorded per segment and the batch
/// continues. Source, catalog and sink failures abort it.
pub fn label_segments<S, K>(
    schedule: &PipeSchedule,
    source: &S,
    sink: &mut K,
    mode: SeriesMode,
) -> AppResult<LabelReport>
where
    S: SegmentSource + ?Sized,
    K: LabelSink + ?Sized,
{
    let records = source.segments()?;
    ensure_unique_ids(&records)?;

    let mut report = LabelReport::default();
    for record in records {
        let issue = |message: String| LabelIssue {
            segment: record.id,
            layer: record.layer.clone(),
            message,
        };

        let label = match resolve_label(schedule, &record.layer, record.constant_width_m, mode) {
            Ok(label) => label,
            Err(err) if err.is_configuration() => return Err(err.into()),
            Err(err) => {
                warn!(segment = %record.id, layer = %record.layer, error = %err, "segment not labelled");
                report.issues.push(issue(err.to_string()));
                continue;
            }
        };

        if label.is_empty() {
            warn!(segment = %record.id, layer = %record.layer, "size label unresolved");
            report.issues.push(issue("size label unresolved".to_string()));
            continue;
        }
        sink.attach_size_label(record.id, &label)?;
        report.labelled += 1;
    }

    info!(labelled = report.labelled, skipped = report.issues.len(), "labelling finished");
    Ok(report)
}

pub(crate) fn resolve_label(
    schedule: &PipeSchedule,
    layer: &str,
    width_m: Option<f64>,
    mode: SeriesMode,
) -> Result<String, ScheduleError> {
    let desc = classify(layer)?;
    let Some(width) = width_m else {
        return Err(ScheduleError::UnresolvedPipeType {
            what: format!("{desc} without a drawn width"),
        });
    };
    match mode {
        SeriesMode::HardFail => schedule.label(&desc, m(width)),
        SeriesMode::Lenient => Ok(schedule.dimensions(&desc, m(width))?.label),
    }
}
