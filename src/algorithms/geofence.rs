//! Geofence evaluation
//!
//! [`evaluate`] is a pure function of its inputs and is safe to call on every
//! incoming sample. The [`GeofenceEvaluator`] trait is the injection seam used
//! by the eligibility controller and the nearby-sessions ranking.

use crate::algorithms::geo_math::distance_meters;
use crate::core::{GeoResult, GeofenceDecision, GeofenceTarget, PositionSample};
use std::cmp::Ordering;

/// Decide whether `sample` lies within `target`.
///
/// The boundary counts as in range: a sample exactly `radius_m` away is
/// eligible.
///
/// # Errors
///
/// `GeoError::InvalidInput` if either coordinate is out of range or the
/// radius is not strictly positive.
///
/// # Example
///
/// ```
/// use attendance_geofence::{evaluate, Coordinate, GeofenceTarget, PositionSample};
///
/// let site = Coordinate::new(12.9716, 77.5946).unwrap();
/// let target = GeofenceTarget::new(site, 15.0).unwrap();
/// let decision = evaluate(&target, &PositionSample::new(site, 0)).unwrap();
/// assert!(decision.within_range());
/// ```
pub fn evaluate(target: &GeofenceTarget, sample: &PositionSample) -> GeoResult<GeofenceDecision> {
    target.validate()?;
    sample.coordinate().validate()?;

    let distance = distance_meters(&target.coordinate(), &sample.coordinate());
    Ok(GeofenceDecision::new(*target, *sample, distance))
}

/// Decision function consumed by the attendance flow.
///
/// Implementations must be pure: the same target and sample always produce
/// the same decision.
pub trait GeofenceEvaluator {
    fn evaluate(&self, target: &GeofenceTarget, sample: &PositionSample) -> GeoResult<GeofenceDecision>;
}

/// Spherical haversine evaluator backed by [`evaluate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HaversineEvaluator;

impl GeofenceEvaluator for HaversineEvaluator {
    fn evaluate(&self, target: &GeofenceTarget, sample: &PositionSample) -> GeoResult<GeofenceDecision> {
        evaluate(target, sample)
    }
}

impl<F> GeofenceEvaluator for F
where
    F: Fn(&GeofenceTarget, &PositionSample) -> GeoResult<GeofenceDecision>,
{
    fn evaluate(&self, target: &GeofenceTarget, sample: &PositionSample) -> GeoResult<GeofenceDecision> {
        self(target, sample)
    }
}

/// A session annotated with its decision relative to the user
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSession<S> {
    pub session: S,
    pub decision: GeofenceDecision,
}

/// Evaluate `sample` against every session and order them nearest first.
///
/// `target_of` maps a session to its geofence. Sessions at equal distance keep
/// their input order. Fails on the first session without a valid target.
pub fn rank_by_distance<S, I, F>(sample: &PositionSample, sessions: I, target_of: F) -> GeoResult<Vec<RankedSession<S>>>
where
    I: IntoIterator<Item = S>,
    F: Fn(&S) -> GeoResult<GeofenceTarget>,
{
    let mut ranked = sessions
        .into_iter()
        .map(|session| -> GeoResult<RankedSession<S>> {
            let decision = evaluate(&target_of(&session)?, sample)?;
            Ok(RankedSession { session, decision })
        })
        .collect::<GeoResult<Vec<_>>>()?;

    ranked.sort_by(|a, b| {
        a.decision
            .distance_m()
            .partial_cmp(&b.decision.distance_m())
            .unwrap_or(Ordering::Equal)
    });
    Ok(ranked)
}
