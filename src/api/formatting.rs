//! UI-facing readouts for geofence results
//!
//! Turns decisions and snapshots into the short strings the attendance
//! screens show: the "In Range" badge, the "You are Xm away" warning and a
//! coarse accuracy grade for the current fix.

use crate::api::types::{EligibilitySnapshot, EligibilityState};
use crate::core::GeofenceDecision;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse quality of a fix, from its reported horizontal accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccuracyGrade {
    /// Better than 10 m
    Excellent,
    /// Better than 50 m
    Good,
    /// Better than 100 m
    Fair,
    /// 100 m or worse
    Poor,
    /// Platform did not report accuracy
    Unknown,
}

impl AccuracyGrade {
    pub fn from_accuracy(accuracy_m: Option<f64>) -> Self {
        match accuracy_m {
            Some(a) if !a.is_finite() => AccuracyGrade::Unknown,
            Some(a) if a < 10.0 => AccuracyGrade::Excellent,
            Some(a) if a < 50.0 => AccuracyGrade::Good,
            Some(a) if a < 100.0 => AccuracyGrade::Fair,
            Some(_) => AccuracyGrade::Poor,
            None => AccuracyGrade::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccuracyGrade::Excellent => "Excellent",
            AccuracyGrade::Good => "Good",
            AccuracyGrade::Fair => "Fair",
            AccuracyGrade::Poor => "Poor",
            AccuracyGrade::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AccuracyGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the distance badge should show
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum ProximityReadout {
    /// Inside the geofence
    InRange { distance_m: u64 },
    /// Outside the geofence
    Away { distance_m: u64, radius_m: u64 },
    /// Nothing to show (no fix yet, or positioning unavailable)
    Hidden,
}

impl ProximityReadout {
    /// Readout for a single decision; distances are rounded to whole meters
    pub fn from_decision(decision: &GeofenceDecision) -> Self {
        let distance_m = round_meters(decision.distance_m());
        if decision.within_range() {
            ProximityReadout::InRange { distance_m }
        } else {
            ProximityReadout::Away {
                distance_m,
                radius_m: round_meters(decision.target().radius_m()),
            }
        }
    }

    /// Readout for the controller view.
    ///
    /// Uses the raw per-sample verdict, not the debounced gate, and hides
    /// everything once positioning is unavailable.
    pub fn from_snapshot(snapshot: &EligibilitySnapshot, radius_m: f64) -> Self {
        if snapshot.state == EligibilityState::Unavailable {
            return ProximityReadout::Hidden;
        }
        match (snapshot.distance_m, snapshot.within_range) {
            (Some(distance), Some(true)) => ProximityReadout::InRange {
                distance_m: round_meters(distance),
            },
            (Some(distance), Some(false)) => ProximityReadout::Away {
                distance_m: round_meters(distance),
                radius_m: round_meters(radius_m),
            },
            _ => ProximityReadout::Hidden,
        }
    }

    /// Short badge text
    pub fn badge(&self) -> Option<String> {
        match self {
            ProximityReadout::InRange { .. } => Some("In Range".to_string()),
            ProximityReadout::Away { distance_m, .. } => Some(format!("{}m away", distance_m)),
            ProximityReadout::Hidden => None,
        }
    }
}

impl fmt::Display for ProximityReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProximityReadout::InRange { distance_m } => {
                write!(f, "In Range ({}m from the session)", distance_m)
            }
            ProximityReadout::Away { distance_m, radius_m } => write!(
                f,
                "You are {}m away from the session. You must be within {}m to mark attendance.",
                distance_m, radius_m
            ),
            ProximityReadout::Hidden => Ok(()),
        }
    }
}

fn round_meters(meters: f64) -> u64 {
    if meters.is_finite() && meters > 0.0 {
        meters.round() as u64
    } else {
        0
    }
}
