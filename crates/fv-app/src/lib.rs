//! Shared application service layer for the fjernvarme tools.
//!
//! Sits between the host (CAD drawing, files) and the schedule / graph
//! crates: configuration, host collaborator traits, batch labelling and
//! network export. Used by the CLI; any other frontend goes through here too.

pub mod config;
pub mod error;
pub mod host;
pub mod label_service;
pub mod network_service;

// Re-export key types for convenience
pub use config::FvConfig;
pub use error::{AppError, AppResult};
pub use host::{JsonSegmentFile, LabelSink, MemorySink, SegmentRecord, SegmentSource};
pub use label_service::{LabelIssue, LabelReport, LayerReport, describe_layer, label_segments};
pub use network_service::{GroupFailure, NetworkExport, export_network};
