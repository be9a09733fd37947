//! Pipe schedule errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors raised while loading the catalog or classifying pipes.
///
/// The first group is configuration (the catalog is unusable and nothing
/// downstream can succeed). `Classification` is recoverable per segment.
/// `AmbiguousSeries` is only produced in hard-fail mode.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The catalog directory holds no tables.
    #[error("Pipe catalog directory {} contains no *.csv tables", .dir.display())]
    NoCatalogTables { dir: PathBuf },

    /// The catalog directory or a table could not be read.
    #[error("Failed to read pipe catalog at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table is not readable as delimited text.
    #[error("Pipe catalog table {} is malformed: {source}", .file.display())]
    Malformed {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from a table header.
    #[error("Pipe catalog table {} is missing required column '{column}'", .file.display())]
    MissingColumn { file: PathBuf, column: &'static str },

    /// A cell could not be parsed.
    #[error(
        "Pipe catalog table {}, line {line}: cannot parse column '{column}' from '{value}'",
        .file.display()
    )]
    InvalidValue {
        file: PathBuf,
        line: usize,
        column: &'static str,
        value: String,
    },

    /// Two rows share the same (flow class, DN, series) key.
    #[error("Pipe catalog table {}, line {line}: duplicate entry {key}", .file.display())]
    DuplicateEntry {
        file: PathBuf,
        line: usize,
        key: String,
    },

    /// The layer name does not follow the pipe layer grammar.
    #[error("Cannot parse layer name '{layer}'")]
    Classification { layer: String },

    /// No catalog series matches the observed casing width.
    #[error("Pipe series could not be determined for {descriptor} (observed casing {observed_mm:.1} mm)")]
    AmbiguousSeries { descriptor: String, observed_mm: f64 },

    /// The query needs a resolved system and flow role.
    #[error("Pipe type is unresolved for {what}")]
    UnresolvedPipeType { what: String },
}

impl ScheduleError {
    /// True for errors that mean the catalog itself is unusable.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ScheduleError::NoCatalogTables { .. }
                | ScheduleError::Io { .. }
                | ScheduleError::Malformed { .. }
                | ScheduleError::MissingColumn { .. }
                | ScheduleError::InvalidValue { .. }
                | ScheduleError::DuplicateEntry { .. }
        )
    }
}
