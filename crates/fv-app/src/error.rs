//! Error types for the fv-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Failed to read segment file: {path}")]
    SegmentFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse segment file {path}: {message}")]
    SegmentParse { path: PathBuf, message: String },

    /// Catalog loading, classification or series resolution failed.
    #[error(transparent)]
    Schedule(#[from] fv_schedule::ScheduleError),

    #[error(transparent)]
    Graph(#[from] fv_graph::GraphError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fv-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Errors that stop a whole batch: an unusable catalog or configuration.
    pub fn is_configuration(&self) -> bool {
        match self {
            AppError::ConfigFileRead { .. } | AppError::Config(_) => true,
            AppError::Schedule(err) => err.is_configuration(),
            _ => false,
        }
    }
}

impl From<fv_core::FvError> for AppError {
    fn from(err: fv_core::FvError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
