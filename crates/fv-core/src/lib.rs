//! fv-core: stable foundation for the district heating pipe tools.
//!
//! Contains:
//! - units (uom lengths + millimetre/metre constructors)
//! - numeric (Real, strict tolerance comparison, finiteness checks)
//! - ids (stable compact IDs for pipeline segments)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FvError, FvResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
