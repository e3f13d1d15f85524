//! Positioning failures reported by the platform

use thiserror::Error;

/// Result type for positioning operations
pub type PositionResult<T> = Result<T, PositionError>;

/// Operational failures from the location service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// User declined location access
    #[error("location permission denied")]
    PermissionDenied,
    /// No fix could be obtained
    #[error("position unavailable: {reason}")]
    PositionUnavailable { reason: String },
    /// No fix within the requested time
    #[error("position request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u32 },
    /// The host has no location service at all
    #[error("geolocation is not supported on this platform")]
    Unsupported,
}

impl PositionError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        PositionError::PositionUnavailable { reason: reason.into() }
    }

    /// Transient failures may be retried and count toward the failure budget;
    /// the rest end the watch immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PositionError::PositionUnavailable { .. } | PositionError::Timeout { .. })
    }

    /// Message suitable for showing to the end user
    pub fn user_message(&self) -> &'static str {
        match self {
            PositionError::PermissionDenied => {
                "Location permission denied. Please enable location access in your device settings."
            }
            PositionError::PositionUnavailable { .. } => {
                "Location information is unavailable. Please check your GPS settings."
            }
            PositionError::Timeout { .. } => "Location request timed out. Please try again.",
            PositionError::Unsupported => "Geolocation is not supported on this device.",
        }
    }
}
