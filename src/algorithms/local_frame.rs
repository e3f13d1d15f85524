//! Local tangent-plane helpers on the spherical Earth
//!
//! Positions are handled as unit n-vectors so that moving along a bearing is a
//! rotation in 3D rather than a chain of trigonometric special cases. Used to
//! construct samples at an exact distance from a session and to simulate
//! movement around a target.

use crate::algorithms::geo_math::{to_degrees, to_radians};
use crate::core::{Coordinate, GeoError, GeoResult, EARTH_MEAN_RADIUS_M};
use nalgebra::{Matrix3, Vector3};

/// Unit n-vector (Earth-centred, Earth-fixed direction) for a coordinate
pub fn n_vector(coordinate: &Coordinate) -> Vector3<f64> {
    let lat = to_radians(coordinate.latitude());
    let lon = to_radians(coordinate.longitude());
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Rotation from ECEF directions to the East-North-Up frame at `origin`.
///
/// Rows are the east, north and up unit vectors.
pub fn enu_frame(origin: &Coordinate) -> Matrix3<f64> {
    let lat = to_radians(origin.latitude());
    let lon = to_radians(origin.longitude());

    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    Matrix3::new(
        -sin_lon,           cos_lon,            0.0,
        -sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat,
        cos_lat * cos_lon,  cos_lat * sin_lon,  sin_lat,
    )
}

/// Coordinate reached by travelling `distance_m` along the great circle that
/// leaves `origin` at `bearing_deg` (degrees true).
pub fn destination(origin: &Coordinate, bearing_deg: f64, distance_m: f64) -> GeoResult<Coordinate> {
    if !bearing_deg.is_finite() {
        return Err(GeoError::invalid("bearing_deg", bearing_deg, "must be finite"));
    }
    if !distance_m.is_finite() || distance_m < 0.0 {
        return Err(GeoError::invalid("distance_m", distance_m, "must be finite and non-negative"));
    }

    let frame = enu_frame(origin);
    let east = frame.row(0).transpose();
    let north = frame.row(1).transpose();

    let bearing = to_radians(bearing_deg);
    let direction = north * bearing.cos() + east * bearing.sin();

    let angle = distance_m / EARTH_MEAN_RADIUS_M;
    let moved = n_vector(origin) * angle.cos() + direction * angle.sin();

    from_n_vector(&moved)
}

/// Coordinate displaced from `origin` by `east_m` and `north_m` meters,
/// measured along the surface.
pub fn offset_enu(origin: &Coordinate, east_m: f64, north_m: f64) -> GeoResult<Coordinate> {
    if !east_m.is_finite() || !north_m.is_finite() {
        return Err(GeoError::invalid("offset_m", east_m + north_m, "must be finite"));
    }
    let distance = east_m.hypot(north_m);
    if distance == 0.0 {
        return Ok(*origin);
    }
    let bearing = to_degrees(east_m.atan2(north_m));
    destination(origin, bearing, distance)
}

fn from_n_vector(n: &Vector3<f64>) -> GeoResult<Coordinate> {
    let lat = to_degrees(n.z.atan2(n.x.hypot(n.y)));
    let lon = to_degrees(n.y.atan2(n.x));
    Coordinate::new(lat.clamp(-90.0, 90.0), wrap_longitude(lon))
}

fn wrap_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}
