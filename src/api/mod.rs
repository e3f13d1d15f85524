//! Attendance-facing API
//!
//! The eligibility controller gates the "mark attendance" action on a
//! debounced geofence verdict. Session helpers and UI readouts sit alongside
//! it.

pub mod controller;
pub mod session;
pub mod types;
pub mod formatting;

pub use controller::AttendanceEligibilityController;
pub use formatting::{AccuracyGrade, ProximityReadout};
pub use session::{check_geofence, nearby_sessions, parse_sessions, SessionError, SessionLocation, SessionResult};
pub use types::{ControllerError, ControllerResult, EligibilitySnapshot, EligibilityState, WatchEvent};
