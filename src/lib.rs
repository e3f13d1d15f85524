//! Attendance Geofence
//!
//! Location-gated attendance eligibility: great-circle distance between a
//! user's fix and a session venue, a pure geofence decision, and a controller
//! that watches position updates and only opens the attendance gate once the
//! in-range verdict is stable.
//!
//! ```
//! use attendance_geofence::{distance_meters, Coordinate};
//!
//! let venue = Coordinate::new(12.9716, 77.5946).unwrap();
//! let user = Coordinate::new(12.9718, 77.5946).unwrap();
//! assert!((distance_meters(&venue, &user) - 22.24).abs() < 0.1);
//! ```

pub mod core;
pub mod algorithms;
pub mod location;
pub mod api;
pub mod utils;

// Re-export commonly used types
pub use self::core::{Coordinate, GeoError, GeoResult, GeofenceDecision, GeofenceTarget, PositionSample, EARTH_MEAN_RADIUS_M};
pub use algorithms::{bearing_degrees, destination, distance_meters, evaluate, rank_by_distance, GeofenceEvaluator, HaversineEvaluator};
pub use location::{locate, MockPositionWatcher, PositionError, PositionOptions, PositionWatcher, WatchHandle};
pub use api::{
    check_geofence, AccuracyGrade, AttendanceEligibilityController, ControllerError, EligibilitySnapshot,
    EligibilityState, ProximityReadout, SessionLocation,
};
pub use utils::{DebounceConfig, GeofenceConfig};
