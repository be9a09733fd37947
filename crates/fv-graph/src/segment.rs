//! Pipeline segments: the graph input records.

use fv_core::{Real, SegmentId};
use serde::{Deserialize, Serialize};

/// Plan coordinate in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    pub fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> Real {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A stretch of pipeline with a single nominal diameter.
///
/// Read-only for graph purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSegment {
    pub id: SegmentId,
    /// Human reference (alignment name, handle, ...).
    pub name: String,
    pub endpoints: [Point; 2],
    /// Nominal diameter code.
    pub dn: u32,
    /// Layer the segment was drawn on.
    #[serde(default)]
    pub layer: String,
}

impl PipelineSegment {
    pub fn new(id: SegmentId, name: impl Into<String>, endpoints: [Point; 2], dn: u32) -> Self {
        Self {
            id,
            name: name.into(),
            endpoints,
            dn,
            layer: String::new(),
        }
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }

    pub fn length(&self) -> Real {
        self.endpoints[0].distance(&self.endpoints[1])
    }
}
