//! Collaborator seams towards the host drawing.
//!
//! The host supplies segment records and receives size labels. A JSON file
//! source and an in-memory sink stand in for the CAD side.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use fv_core::{Real, SegmentId};
use fv_graph::{PipelineSegment, Point};
use fv_schedule::classify;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// One pipe entity as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub id: SegmentId,
    pub name: String,
    pub layer: String,
    pub endpoints: [Point; 2],
    /// Drawn constant width (m), which encodes the casing diameter.
    #[serde(default)]
    pub constant_width_m: Option<Real>,
    /// Nominal diameter when already known; otherwise read from the layer.
    #[serde(default)]
    pub dn: Option<u32>,
}

impl SegmentRecord {
    /// Graph input for this record. Unclassifiable layers get DN 0.
    pub fn to_segment(&self) -> PipelineSegment {
        let dn = self
            .dn
            .or_else(|| classify(&self.layer).ok().map(|d| d.dn))
            .unwrap_or(0);
        PipelineSegment::new(self.id, self.name.clone(), self.endpoints, dn).with_layer(self.layer.clone())
    }
}

pub trait SegmentSource {
    fn segments(&self) -> AppResult<Vec<SegmentRecord>>;
}

pub trait LabelSink {
    fn attach_size_label(&mut self, segment: SegmentId, label: &str) -> AppResult<()>;
}

/// Segment ids key labels and graph nodes, so one source may not repeat one.
pub(crate) fn ensure_unique_ids(records: &[SegmentRecord]) -> AppResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id) {
            return Err(AppError::InvalidInput(format!("duplicate segment id {}", record.id)));
        }
    }
    Ok(())
}

impl SegmentSource for [SegmentRecord] {
    fn segments(&self) -> AppResult<Vec<SegmentRecord>> {
        Ok(self.to_vec())
    }
}

impl SegmentSource for Vec<SegmentRecord> {
    fn segments(&self) -> AppResult<Vec<SegmentRecord>> {
        Ok(self.clone())
    }
}

/// JSON array of [`SegmentRecord`]s on disk.
#[derive(Debug, Clone)]
pub struct JsonSegmentFile {
    path: PathBuf,
}

impl JsonSegmentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SegmentSource for JsonSegmentFile {
    fn segments(&self) -> AppResult<Vec<SegmentRecord>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| AppError::SegmentFileRead {
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| AppError::SegmentParse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

/// Collects labels in memory, last write wins.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    labels: BTreeMap<SegmentId, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, segment: SegmentId) -> Option<&str> {
        self.labels.get(&segment).map(String::as_str)
    }

    pub fn labels(&self) -> &BTreeMap<SegmentId, String> {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl LabelSink for MemorySink {
    fn attach_size_label(&mut self, segment: SegmentId, label: &str) -> AppResult<()> {
        self.labels.insert(segment, label.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_id_is_named() {
        let rec = |i: u32| SegmentRecord {
            id: SegmentId::from_index(i),
            name: format!("S{i}"),
            layer: "FJV-FREM-DN100".to_string(),
            endpoints: [Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
            constant_width_m: None,
            dn: None,
        };
        assert!(ensure_unique_ids(&[rec(0), rec(1)]).is_ok());
        let err = ensure_unique_ids(&[rec(4), rec(1), rec(4)]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: duplicate segment id 4");
    }

    #[test]
    fn record_reads_dn_from_layer() {
        let json = r#"{"id": 3, "name": "A", "layer": "XREF|FJV-FREM-DN150",
                       "endpoints": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 0.0}],
                       "constant_width_m": 0.25}"#;
        let rec: SegmentRecord = serde_json::from_str(json).unwrap();
        let seg = rec.to_segment();
        assert_eq!(seg.id, SegmentId::from_index(3));
        assert_eq!(seg.dn, 150);
        assert_eq!(seg.layer, "XREF|FJV-FREM-DN150");

        let unknown = SegmentRecord {
            layer: "RANDOM-LAYER".into(),
            ..rec.clone()
        };
        assert_eq!(unknown.to_segment().dn, 0);
        let explicit = SegmentRecord {
            dn: Some(200),
            ..rec
        };
        assert_eq!(explicit.to_segment().dn, 200);
    }

    #[test]
    fn memory_sink_overwrites() {
        let mut sink = MemorySink::new();
        let id = SegmentId::from_index(1);
        sink.attach_size_label(id, "old").unwrap();
        sink.attach_size_label(id, "DN100-ø114.3/250").unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.get(id), Some("DN100-ø114.3/250"));
    }
}
