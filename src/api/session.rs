//! Session integration
//!
//! Sessions arrive from the backend as JSON records carrying the venue
//! coordinates. This module turns them into validated geofences and runs the
//! one-shot check used right before attendance is submitted.

use crate::algorithms::geofence::{evaluate, rank_by_distance, RankedSession};
use crate::core::{Coordinate, GeoError, GeoResult, GeofenceDecision, GeofenceTarget, PositionSample};
use crate::location::{locate, PositionError, PositionOptions, PositionWatcher};
use crate::utils::GeofenceConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session parsing and one-shot check errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("malformed session data: {message}")]
    Malformed { message: String },
    #[error(transparent)]
    Geo(#[from] GeoError),
    #[error(transparent)]
    Position(#[from] PositionError),
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        SessionError::Malformed { message: e.to_string() }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Venue of a session as the backend reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl SessionLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            id: None,
            latitude,
            longitude,
        }
    }

    pub fn coordinate(&self) -> GeoResult<Coordinate> {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Geofence around this session with the configured radius
    pub fn to_target(&self, config: &GeofenceConfig) -> GeoResult<GeofenceTarget> {
        config.target_at(self.coordinate()?)
    }
}

/// Parse a JSON array of session records.
///
/// Coordinates are not range-checked here; that happens when a target is
/// built, so one bad record does not hide the rest of the list.
pub fn parse_sessions(json: &str) -> SessionResult<Vec<SessionLocation>> {
    Ok(serde_json::from_str(json)?)
}

/// Sessions ordered nearest first relative to `sample`
pub fn nearby_sessions<I>(
    sample: &PositionSample,
    sessions: I,
    config: &GeofenceConfig,
) -> SessionResult<Vec<RankedSession<SessionLocation>>>
where
    I: IntoIterator<Item = SessionLocation>,
{
    let ranked = rank_by_distance(sample, sessions, |session: &SessionLocation| session.to_target(config))?;
    tracing::debug!(count = ranked.len(), "ranked nearby sessions");
    Ok(ranked)
}

/// Obtain one fresh fix and evaluate it against `target`.
///
/// Used right before submitting attendance, independently of any running
/// eligibility controller. Fails with `PositionError::Timeout` when no fix
/// arrives within `options.timeout_ms`.
pub async fn check_geofence<W>(
    watcher: &mut W,
    target: &GeofenceTarget,
    options: &PositionOptions,
) -> SessionResult<GeofenceDecision>
where
    W: PositionWatcher,
{
    target.validate()?;
    let sample = locate(watcher, options).await?;
    let decision = evaluate(target, &sample)?;

    tracing::info!(
        distance_m = decision.distance_m(),
        radius_m = target.radius_m(),
        within_range = decision.within_range(),
        "geofence check complete"
    );
    Ok(decision)
}
