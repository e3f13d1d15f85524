//! Physical constants and deployment defaults

/// Mean Earth radius for the spherical model (meters)
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;

/// Half of the great circle on the spherical model (meters), the largest
/// distance `distance_meters` can return
pub const EARTH_HALF_CIRCUMFERENCE_M: f64 = std::f64::consts::PI * EARTH_MEAN_RADIUS_M;

/// Geofence radius used by deployed sessions (meters)
pub const DEFAULT_GEOFENCE_RADIUS_M: f64 = 15.0;

/// Latitude bound in degrees
pub const MAX_LATITUDE_DEG: f64 = 90.0;

/// Longitude bound in degrees
pub const MAX_LONGITUDE_DEG: f64 = 180.0;
