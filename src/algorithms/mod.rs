//! Geometry and geofence algorithms

pub mod geo_math;
pub mod local_frame;
pub mod geofence;

pub use geo_math::{bearing_degrees, distance_meters, is_valid_coordinate, to_degrees, to_radians};
pub use local_frame::{destination, offset_enu};
pub use geofence::{evaluate, rank_by_distance, GeofenceEvaluator, HaversineEvaluator, RankedSession};
