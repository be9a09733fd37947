//! fv-schedule: pipe schedule lookups for district heating layers.
//!
//! Provides:
//! - Pipe type catalog loaded from a directory of tabular files
//! - Layer name classifier (`FJV-{ROLE}-{SYSTEM}{DN}`) and series inference
//! - Size label formatting
//! - `PipeSchedule`, a facade combining the above for one descriptor
//!
//! # Example
//!
//! ```
//! use fv_schedule::{classify, PipeFlowRole, PipeSystem};
//!
//! let desc = classify("XREF|FJV-FREM-DN150").unwrap();
//! assert_eq!(desc.system, PipeSystem::Steel);
//! assert_eq!(desc.flow_role, PipeFlowRole::Supply);
//! assert_eq!(desc.dn, 150);
//! ```

pub mod catalog;
pub mod classify;
pub mod error;
pub mod label;
pub mod loader;
pub mod schedule;
pub mod types;

// Re-exports for ergonomics
pub use catalog::{CatalogEntry, CatalogKey, PipeCatalog, PipeTypeTable};
pub use classify::{
    PipeDescriptor, SERIES_TOLERANCE_MM, SeriesMode, classify, pipe_series, strip_namespace,
};
pub use error::{ScheduleError, ScheduleResult};
pub use label::format_label;
pub use loader::{load_catalog_dir, parse_table};
pub use schedule::{PipeDimensions, PipeSchedule, std_length};
pub use types::{FlowClass, PipeFlowRole, PipeSeries, PipeSystem};
