//! Great-circle geometry on a spherical Earth
//!
//! Every distance in the crate goes through [`distance_meters`]; screens that
//! list nearby sessions and the attendance gate share this single source.
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Bearing: degrees true (0-360, 0=north, 90=east)
//! - Distance: meters on a sphere of radius [`EARTH_MEAN_RADIUS_M`]

use crate::core::{Axis, Coordinate, EARTH_MEAN_RADIUS_M, MAX_LATITUDE_DEG, MAX_LONGITUDE_DEG};
use std::f64::consts::PI;

/// Degrees to radians conversion factor
const DEG_TO_RAD: f64 = PI / 180.0;

/// Radians to degrees conversion factor
const RAD_TO_DEG: f64 = 180.0 / PI;

pub fn to_radians(degrees: f64) -> f64 {
    degrees * DEG_TO_RAD
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * RAD_TO_DEG
}

/// Range check for a single axis value.
///
/// Returns `false` for NaN and infinities. Never panics; callers decide how
/// to react to an invalid value.
pub fn is_valid_coordinate(value: f64, axis: Axis) -> bool {
    let bound = match axis {
        Axis::Latitude => MAX_LATITUDE_DEG,
        Axis::Longitude => MAX_LONGITUDE_DEG,
    };
    value.is_finite() && (-bound..=bound).contains(&value)
}

/// Great-circle distance between two coordinates using the haversine formula.
///
/// The result is finite and lies in `[0, EARTH_HALF_CIRCUMFERENCE_M]` for any
/// pair of valid coordinates, including coincident and antipodal points.
///
/// # Example
///
/// ```
/// use attendance_geofence::{distance_meters, Coordinate};
///
/// let a = Coordinate::new(0.0, 0.0).unwrap();
/// let b = Coordinate::new(1.0, 0.0).unwrap();
/// assert!((distance_meters(&a, &b) - 111_195.0).abs() < 1.0);
/// ```
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1_rad = to_radians(a.latitude());
    let lat2_rad = to_radians(b.latitude());
    let delta_lat = to_radians(b.latitude() - a.latitude());
    let delta_lon = to_radians(b.longitude() - a.longitude());

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push h just outside [0, 1] near antipodes and at the poles
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_MEAN_RADIUS_M * c
}

/// Initial great-circle bearing from `from` towards `to`, in degrees [0, 360).
///
/// Coincident points yield 0.
pub fn bearing_degrees(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1_rad = to_radians(from.latitude());
    let lat2_rad = to_radians(to.latitude());
    let delta_lon = to_radians(to.longitude() - from.longitude());

    let y = delta_lon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    let bearing = to_degrees(y.atan2(x));
    let normalized = bearing.rem_euclid(360.0);
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}
