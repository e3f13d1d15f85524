//! Common API types and data structures

use crate::core::{GeoError, GeofenceDecision, PositionSample};
use crate::location::PositionError;
use crate::utils::ConfigError;
use serde::Serialize;
use thiserror::Error;

/// Result type for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Controller errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    /// Malformed target or sample
    #[error(transparent)]
    Geo(#[from] GeoError),
    /// Location service failure while subscribing
    #[error(transparent)]
    Position(#[from] PositionError),
    /// Rejected configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A watch subscription is already active
    #[error("controller is already watching position")]
    AlreadyArmed,
    /// The controller was torn down and cannot be used again
    #[error("controller has been torn down")]
    TornDown,
}

/// Externally observable eligibility state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EligibilityState {
    /// No position received since arming or reset
    Idle,
    /// Samples received but no verdict confirmed yet
    Evaluating,
    /// Confirmed inside the geofence
    Eligible,
    /// Confirmed outside the geofence
    OutOfRange,
    /// Positioning failed; needs a re-arm
    Unavailable,
}

impl EligibilityState {
    /// Whether the "mark attendance" action may be enabled
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityState::Eligible)
    }

    /// Committed verdict, if any
    pub(crate) fn verdict(&self) -> Option<bool> {
        match self {
            EligibilityState::Eligible => Some(true),
            EligibilityState::OutOfRange => Some(false),
            _ => None,
        }
    }
}

/// Event delivered from a watch subscription to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    Sample(PositionSample),
    Error(PositionError),
}

/// Read-only view handed to the UI layer.
///
/// `distance_m` follows every sample; `eligible` is the debounced gate and is
/// `false` unless a confirmed in-range verdict is held.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilitySnapshot {
    pub state: EligibilityState,
    pub eligible: bool,
    pub distance_m: Option<f64>,
    pub within_range: Option<bool>,
    pub accuracy_m: Option<f64>,
    #[serde(skip)]
    pub last_error: Option<PositionError>,
}

impl EligibilitySnapshot {
    pub(crate) fn new(
        state: EligibilityState,
        decision: Option<&GeofenceDecision>,
        last_error: Option<PositionError>,
    ) -> Self {
        Self {
            state,
            eligible: state.is_eligible(),
            distance_m: decision.map(|d| d.distance_m()),
            within_range: decision.map(|d| d.within_range()),
            accuracy_m: decision.and_then(|d| d.sample().accuracy_m()),
            last_error,
        }
    }
}
