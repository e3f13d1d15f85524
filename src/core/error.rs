//! Input validation errors

use thiserror::Error;

/// Result type for geometry and evaluation operations
pub type GeoResult<T> = Result<T, GeoError>;

/// Malformed input handed to the geometry layer.
///
/// These are programmer errors: the offending call fails immediately and
/// nothing is clamped or repaired.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("invalid {field} = {value}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl GeoError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        GeoError::InvalidInput { field, value, reason }
    }
}
