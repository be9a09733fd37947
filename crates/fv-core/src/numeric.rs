use crate::{FvError, FvResult};

/// Floating point type for coordinates and catalog dimensions.
pub type Real = f64;

/// Strict absolute comparison: `|a - b| < eps`.
///
/// A difference of exactly `eps` does not match.
pub fn within_abs(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

pub fn ensure_finite(v: Real, what: &'static str) -> FvResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FvError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> FvResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(FvError::NonPositive { what, value: v })
    }
}
