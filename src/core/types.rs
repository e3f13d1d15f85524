//! Core data types for geofence evaluation

use crate::algorithms::geo_math::is_valid_coordinate;
use crate::core::{GeoError, GeoResult};
use serde::{Deserialize, Serialize};

/// Coordinate axis used for range checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Latitude, valid in [-90, 90]
    Latitude,
    /// Longitude, valid in [-180, 180]
    Longitude,
}

impl Axis {
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }
}

/// Geodetic coordinate in decimal degrees.
///
/// Always valid once constructed: `new` and deserialization reject NaN,
/// infinities and out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> GeoResult<Self> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting invalid latitude or longitude
    pub fn new(latitude: f64, longitude: f64) -> GeoResult<Self> {
        check_axis(latitude, Axis::Latitude)?;
        check_axis(longitude, Axis::Longitude)?;
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Re-check both axes
    pub fn validate(&self) -> GeoResult<()> {
        check_axis(self.latitude, Axis::Latitude)?;
        check_axis(self.longitude, Axis::Longitude)
    }
}

fn check_axis(value: f64, axis: Axis) -> GeoResult<()> {
    if value.is_nan() {
        return Err(GeoError::invalid(axis.name(), value, "not a number"));
    }
    if !is_valid_coordinate(value, axis) {
        let reason = match axis {
            Axis::Latitude => "must be within [-90, 90]",
            Axis::Longitude => "must be within [-180, 180]",
        };
        return Err(GeoError::invalid(axis.name(), value, reason));
    }
    Ok(())
}

/// Position fix delivered by the platform location service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSample")]
pub struct PositionSample {
    coordinate: Coordinate,
    /// Horizontal accuracy (meters), `None` when the platform did not report one
    accuracy_m: Option<f64>,
    /// Capture time (milliseconds since epoch)
    captured_at_ms: u64,
}

#[derive(Deserialize)]
struct RawSample {
    coordinate: Coordinate,
    #[serde(default)]
    accuracy_m: Option<f64>,
    captured_at_ms: u64,
}

impl TryFrom<RawSample> for PositionSample {
    type Error = GeoError;

    fn try_from(raw: RawSample) -> GeoResult<Self> {
        let sample = PositionSample::new(raw.coordinate, raw.captured_at_ms);
        match raw.accuracy_m {
            Some(accuracy_m) => sample.with_accuracy(accuracy_m),
            None => Ok(sample),
        }
    }
}

impl PositionSample {
    pub fn new(coordinate: Coordinate, captured_at_ms: u64) -> Self {
        Self {
            coordinate,
            accuracy_m: None,
            captured_at_ms,
        }
    }

    /// Attach a reported accuracy; must be finite and non-negative
    pub fn with_accuracy(mut self, accuracy_m: f64) -> GeoResult<Self> {
        if !accuracy_m.is_finite() || accuracy_m < 0.0 {
            return Err(GeoError::invalid(
                "accuracy_m",
                accuracy_m,
                "must be finite and non-negative",
            ));
        }
        self.accuracy_m = Some(accuracy_m);
        Ok(self)
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn accuracy_m(&self) -> Option<f64> {
        self.accuracy_m
    }

    pub fn captured_at_ms(&self) -> u64 {
        self.captured_at_ms
    }
}

/// Location and tolerance of an attendance session.
///
/// Fixed for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTarget")]
pub struct GeofenceTarget {
    coordinate: Coordinate,
    radius_m: f64,
}

#[derive(Deserialize)]
struct RawTarget {
    coordinate: Coordinate,
    radius_m: f64,
}

impl TryFrom<RawTarget> for GeofenceTarget {
    type Error = GeoError;

    fn try_from(raw: RawTarget) -> GeoResult<Self> {
        GeofenceTarget::new(raw.coordinate, raw.radius_m)
    }
}

impl GeofenceTarget {
    /// Create a target, rejecting a radius that is not strictly positive
    pub fn new(coordinate: Coordinate, radius_m: f64) -> GeoResult<Self> {
        check_radius(radius_m)?;
        Ok(Self { coordinate, radius_m })
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn validate(&self) -> GeoResult<()> {
        self.coordinate.validate()?;
        check_radius(self.radius_m)
    }
}

fn check_radius(radius_m: f64) -> GeoResult<()> {
    if radius_m.is_finite() && radius_m > 0.0 {
        Ok(())
    } else {
        Err(GeoError::invalid("radius_m", radius_m, "must be finite and greater than zero"))
    }
}

/// Outcome of evaluating one sample against a target.
///
/// `within_range` is always `distance_m <= target.radius_m()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeofenceDecision {
    distance_m: f64,
    within_range: bool,
    target: GeofenceTarget,
    sample: PositionSample,
}

impl GeofenceDecision {
    pub(crate) fn new(target: GeofenceTarget, sample: PositionSample, distance_m: f64) -> Self {
        Self {
            distance_m,
            within_range: distance_m <= target.radius_m,
            target,
            sample,
        }
    }

    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn within_range(&self) -> bool {
        self.within_range
    }

    pub fn target(&self) -> &GeofenceTarget {
        &self.target
    }

    pub fn sample(&self) -> &PositionSample {
        &self.sample
    }
}
