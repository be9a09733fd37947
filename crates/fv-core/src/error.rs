use thiserror::Error;

pub type FvResult<T> = Result<T, FvError>;

/// Numeric argument failures shared by the other crates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FvError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Non-positive value for {what}: {value}")]
    NonPositive { what: &'static str, value: f64 },
}
