//! Attendance eligibility controller
//!
//! Watches position updates for one session, evaluates every sample against
//! the session's geofence and exposes a debounced eligibility gate together
//! with a live distance readout.
//!
//! Events from the platform subscription are queued on a channel and applied
//! in arrival order by [`AttendanceEligibilityController::pump`]. Hosts that
//! already run on the UI thread can call `handle_sample` / `handle_error`
//! directly instead.

use crate::algorithms::geofence::{GeofenceEvaluator, HaversineEvaluator};
use crate::api::types::{ControllerError, ControllerResult, EligibilitySnapshot, EligibilityState, WatchEvent};
use crate::core::{Coordinate, GeofenceDecision, GeofenceTarget, PositionSample};
use crate::location::{PositionError, PositionWatcher, WatchHandle};
use crate::utils::GeofenceConfig;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};
use tracing::{debug, info, warn};

/// Verdict waiting for confirmation
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    within_range: bool,
    streak: u32,
    /// Capture time of the first sample that produced this verdict
    since_ms: u64,
}

/// Debounced geofence gate for a single attendance session
pub struct AttendanceEligibilityController<W, E = HaversineEvaluator>
where
    W: PositionWatcher,
    E: GeofenceEvaluator,
{
    watcher: W,
    evaluator: E,
    target: GeofenceTarget,
    config: GeofenceConfig,
    state: EligibilityState,
    latest_decision: Option<GeofenceDecision>,
    candidate: Option<Candidate>,
    consecutive_failures: u32,
    last_error: Option<PositionError>,
    subscription: Option<WatchHandle>,
    events: Option<UnboundedReceiver<WatchEvent>>,
    torn_down: bool,
}

impl<W> AttendanceEligibilityController<W, HaversineEvaluator>
where
    W: PositionWatcher,
{
    /// Create a controller using the haversine evaluator.
    ///
    /// `target` carries its own radius; `config.radius_m` is not applied to
    /// it. Use [`Self::for_coordinate`] to take the radius from `config`.
    pub fn new(watcher: W, target: GeofenceTarget, config: GeofenceConfig) -> ControllerResult<Self> {
        Self::with_evaluator(watcher, HaversineEvaluator, target, config)
    }

    /// Create a controller for a session held at `coordinate`, with the
    /// geofence radius taken from `config`
    pub fn for_coordinate(watcher: W, coordinate: Coordinate, config: GeofenceConfig) -> ControllerResult<Self> {
        config.validate()?;
        let target = config.target_at(coordinate)?;
        Self::new(watcher, target, config)
    }
}

impl<W, E> AttendanceEligibilityController<W, E>
where
    W: PositionWatcher,
    E: GeofenceEvaluator,
{
    /// Create a controller with a custom decision function
    pub fn with_evaluator(watcher: W, evaluator: E, target: GeofenceTarget, config: GeofenceConfig) -> ControllerResult<Self> {
        config.validate()?;
        target.validate()?;

        Ok(Self {
            watcher,
            evaluator,
            target,
            config,
            state: EligibilityState::Idle,
            latest_decision: None,
            candidate: None,
            consecutive_failures: 0,
            last_error: None,
            subscription: None,
            events: None,
            torn_down: false,
        })
    }

    /// Subscribe to position updates.
    ///
    /// A platform refusal is recorded like a delivered error: permission
    /// problems make the controller `Unavailable` right away.
    pub fn arm(&mut self) -> ControllerResult<WatchHandle> {
        if self.torn_down {
            return Err(ControllerError::TornDown);
        }
        if self.subscription.is_some() {
            return Err(ControllerError::AlreadyArmed);
        }

        self.reset_evaluation();
        self.consecutive_failures = 0;
        self.last_error = None;

        let (tx, rx) = mpsc::unbounded_channel();
        let error_tx = tx.clone();

        // Sends fail once the receiver is dropped; late callbacks are discarded
        let subscribed = self.watcher.watch_position(
            Box::new(move |sample| {
                let _ = tx.send(WatchEvent::Sample(sample));
            }),
            Box::new(move |error| {
                let _ = error_tx.send(WatchEvent::Error(error));
            }),
            &self.config.position,
        );

        match subscribed {
            Ok(handle) => {
                info!(handle = handle.id(), radius_m = self.target.radius_m(), "watching position for attendance");
                self.subscription = Some(handle);
                self.events = Some(rx);
                self.state = EligibilityState::Idle;
                Ok(handle)
            }
            Err(error) => {
                warn!(%error, "position watch refused");
                self.last_error = Some(error.clone());
                self.enter_unavailable();
                Err(ControllerError::Position(error))
            }
        }
    }

    /// Drop any current subscription and subscribe again.
    ///
    /// This is the recovery path out of `Unavailable`; retry pacing is left
    /// to the caller.
    pub fn rearm(&mut self) -> ControllerResult<WatchHandle> {
        if self.torn_down {
            return Err(ControllerError::TornDown);
        }
        self.cancel_subscription();
        debug!("re-arming position watch");
        self.arm()
    }

    /// Forget the current verdict and distance but keep watching
    pub fn reset(&mut self) {
        if self.torn_down {
            return;
        }
        self.reset_evaluation();
        self.consecutive_failures = 0;
        self.last_error = None;
        if self.state != EligibilityState::Unavailable {
            self.state = EligibilityState::Idle;
        }
    }

    /// Cancel the subscription and dispose of the controller.
    ///
    /// Nothing is evaluated afterwards, including samples already queued.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.cancel_subscription();
        self.reset_evaluation();
        self.state = EligibilityState::Idle;
        self.torn_down = true;
        info!("eligibility controller torn down");
    }

    /// Apply every queued subscription event in arrival order.
    ///
    /// Returns the number of events applied.
    pub fn pump(&mut self) -> ControllerResult<usize> {
        let mut applied = 0;
        loop {
            let next = match self.events.as_mut() {
                Some(events) => events.try_recv(),
                None => break,
            };
            match next {
                Ok(WatchEvent::Sample(sample)) => {
                    if self.handle_sample(sample)? {
                        applied += 1;
                    }
                }
                Ok(WatchEvent::Error(error)) => {
                    if self.handle_error(error) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        Ok(applied)
    }

    /// Evaluate one sample.
    ///
    /// Returns `false` when the sample was ignored because no subscription is
    /// active (before arming, after teardown or once `Unavailable`).
    pub fn handle_sample(&mut self, sample: PositionSample) -> ControllerResult<bool> {
        if !self.is_watching() {
            return Ok(false);
        }

        let decision = self.evaluator.evaluate(&self.target, &sample)?;
        self.consecutive_failures = 0;
        self.last_error = None;
        self.latest_decision = Some(decision);

        let now = sample.captured_at_ms();
        let verdict = decision.within_range();

        if self.state.verdict() == Some(verdict) {
            self.candidate = None;
            return Ok(true);
        }

        // Persistence is measured from the candidate's own first sample
        let candidate = match self.candidate {
            Some(candidate) if candidate.within_range == verdict => Candidate {
                streak: candidate.streak + 1,
                ..candidate
            },
            _ => Candidate {
                within_range: verdict,
                streak: 1,
                since_ms: now,
            },
        };
        let debounce = &self.config.debounce;
        let confirmed = candidate.streak >= debounce.min_consecutive_samples
            || now.saturating_sub(candidate.since_ms) >= debounce.min_interval_ms;

        if confirmed {
            let next = if verdict {
                EligibilityState::Eligible
            } else {
                EligibilityState::OutOfRange
            };
            info!(
                from = ?self.state,
                to = ?next,
                distance_m = decision.distance_m(),
                "eligibility changed"
            );
            self.state = next;
            self.candidate = None;
        } else {
            self.candidate = Some(candidate);
            if self.state == EligibilityState::Idle {
                self.state = EligibilityState::Evaluating;
            }
        }
        Ok(true)
    }

    /// Record a positioning failure.
    ///
    /// Permission problems end the watch immediately; transient failures do
    /// so after `max_consecutive_failures` in a row. Returns `false` when the
    /// error was ignored because no subscription is active.
    pub fn handle_error(&mut self, error: PositionError) -> bool {
        if !self.is_watching() {
            return false;
        }

        self.last_error = Some(error.clone());
        if !error.is_retryable() {
            warn!(%error, "positioning failed permanently");
            self.enter_unavailable();
            return true;
        }

        self.consecutive_failures += 1;
        warn!(
            %error,
            failures = self.consecutive_failures,
            limit = self.config.max_consecutive_failures,
            "positioning failed"
        );
        if self.consecutive_failures >= self.config.max_consecutive_failures {
            self.enter_unavailable();
        }
        true
    }

    /// Whether the "mark attendance" action may be enabled
    pub fn is_eligible(&self) -> bool {
        self.state.is_eligible()
    }

    pub fn state(&self) -> EligibilityState {
        self.state
    }

    /// Most recent decision; `None` before the first sample and once unavailable
    pub fn latest_decision(&self) -> Option<&GeofenceDecision> {
        self.latest_decision.as_ref()
    }

    /// Distance to the session from the most recent sample
    pub fn distance_m(&self) -> Option<f64> {
        self.latest_decision.as_ref().map(|d| d.distance_m())
    }

    pub fn last_error(&self) -> Option<&PositionError> {
        self.last_error.as_ref()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn snapshot(&self) -> EligibilitySnapshot {
        EligibilitySnapshot::new(self.state, self.latest_decision.as_ref(), self.last_error.clone())
    }

    pub fn target(&self) -> &GeofenceTarget {
        &self.target
    }

    pub fn subscription(&self) -> Option<WatchHandle> {
        self.subscription
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn watcher(&self) -> &W {
        &self.watcher
    }

    pub fn watcher_mut(&mut self) -> &mut W {
        &mut self.watcher
    }

    fn is_watching(&self) -> bool {
        !self.torn_down && self.subscription.is_some()
    }

    fn reset_evaluation(&mut self) {
        self.latest_decision = None;
        self.candidate = None;
    }

    fn enter_unavailable(&mut self) {
        self.cancel_subscription();
        self.reset_evaluation();
        self.state = EligibilityState::Unavailable;
        info!("eligibility unavailable until re-armed");
    }

    fn cancel_subscription(&mut self) {
        if let Some(handle) = self.subscription.take() {
            self.watcher.clear_watch(handle);
            debug!(handle = handle.id(), "position watch cleared");
        }
        self.events = None;
    }
}

impl<W, E> Drop for AttendanceEligibilityController<W, E>
where
    W: PositionWatcher,
    E: GeofenceEvaluator,
{
    fn drop(&mut self) {
        self.cancel_subscription();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::local_frame::destination;
    use crate::core::GeoResult;
    use crate::location::MockPositionWatcher;
    use crate::utils::DebounceConfig;

    const INSIDE_M: f64 = 10.0;
    const OUTSIDE_M: f64 = 20.0;

    fn site() -> Coordinate {
        Coordinate::new(12.9716, 77.5946).unwrap()
    }

    fn target() -> GeofenceTarget {
        GeofenceTarget::new(site(), 15.0).unwrap()
    }

    fn sample_at(distance_m: f64, at_ms: u64) -> PositionSample {
        PositionSample::new(destination(&site(), 45.0, distance_m).unwrap(), at_ms)
    }

    fn armed(config: GeofenceConfig) -> AttendanceEligibilityController<MockPositionWatcher> {
        let mut controller = AttendanceEligibilityController::new(MockPositionWatcher::new(), target(), config).unwrap();
        controller.arm().unwrap();
        controller
    }

    /// Push a sample through the mock subscription and apply it
    fn feed(controller: &mut AttendanceEligibilityController<MockPositionWatcher>, sample: PositionSample) {
        assert_eq!(controller.watcher().emit_sample(sample), 1);
        controller.pump().unwrap();
    }

    fn fail(controller: &mut AttendanceEligibilityController<MockPositionWatcher>, error: PositionError) {
        controller.watcher().emit_error(error);
        controller.pump().unwrap();
    }

    #[test]
    fn test_starts_idle_and_closed() {
        let controller = armed(GeofenceConfig::default());
        assert_eq!(controller.state(), EligibilityState::Idle);
        assert!(!controller.is_eligible());
        assert!(controller.latest_decision().is_none());
        assert_eq!(controller.watcher().active_watch_count(), 1);
    }

    #[test]
    fn test_two_consecutive_samples_commit() {
        let mut controller = armed(GeofenceConfig::default());

        feed(&mut controller, sample_at(INSIDE_M, 0));
        assert_eq!(controller.state(), EligibilityState::Evaluating);
        assert!(!controller.is_eligible());
        assert!((controller.distance_m().unwrap() - INSIDE_M).abs() < 1e-6);

        feed(&mut controller, sample_at(INSIDE_M + 1.0, 500));
        assert_eq!(controller.state(), EligibilityState::Eligible);
        assert!(controller.is_eligible());
    }

    #[test]
    fn test_interval_commits_persistent_verdict() {
        let config = GeofenceConfig {
            debounce: DebounceConfig {
                min_consecutive_samples: 5,
                min_interval_ms: 2_000,
            },
            ..Default::default()
        };
        let mut controller = armed(config);

        feed(&mut controller, sample_at(OUTSIDE_M, 0));
        feed(&mut controller, sample_at(OUTSIDE_M, 1_000));
        assert_eq!(controller.state(), EligibilityState::Evaluating);

        // Third agreeing sample, two seconds after the verdict first appeared
        feed(&mut controller, sample_at(OUTSIDE_M, 2_000));
        assert_eq!(controller.state(), EligibilityState::OutOfRange);

        feed(&mut controller, sample_at(INSIDE_M, 3_000));
        feed(&mut controller, sample_at(INSIDE_M, 4_500));
        assert!(!controller.is_eligible());
        feed(&mut controller, sample_at(INSIDE_M, 5_000));
        assert!(controller.is_eligible());
    }

    #[test]
    fn test_single_in_range_outlier_keeps_gate_closed() {
        let mut controller = armed(GeofenceConfig::default());
        for i in 0..10u64 {
            feed(&mut controller, sample_at(OUTSIDE_M, i * 1_000));
        }
        assert_eq!(controller.state(), EligibilityState::OutOfRange);

        // Long after the last flip, one jittered fix must not open the gate
        feed(&mut controller, sample_at(INSIDE_M, 30_000));
        assert!(!controller.is_eligible());
        assert!(controller.latest_decision().unwrap().within_range());

        feed(&mut controller, sample_at(OUTSIDE_M, 31_000));
        feed(&mut controller, sample_at(INSIDE_M, 32_000));
        assert!(!controller.is_eligible());
    }

    #[test]
    fn test_single_out_of_range_outlier_keeps_gate_open() {
        let mut controller = armed(GeofenceConfig::default());
        for i in 0..10u64 {
            feed(&mut controller, sample_at(INSIDE_M, i * 1_000));
        }
        assert!(controller.is_eligible());

        feed(&mut controller, sample_at(OUTSIDE_M, 10_000));
        assert!(controller.is_eligible());
        feed(&mut controller, sample_at(INSIDE_M, 11_000));
        assert!(controller.is_eligible());
    }

    #[test]
    fn test_alternating_samples_do_not_flicker() {
        let mut controller = armed(GeofenceConfig::default());

        feed(&mut controller, sample_at(INSIDE_M, 0));
        feed(&mut controller, sample_at(INSIDE_M, 300));
        assert!(controller.is_eligible());

        let mut changes: Vec<u64> = Vec::new();
        let mut distances = Vec::new();
        let gate = controller.is_eligible();

        for i in 1..=40u64 {
            let at = 300 + i * 700;
            let distance = if i % 2 == 0 { INSIDE_M } else { OUTSIDE_M };
            feed(&mut controller, sample_at(distance, at));

            distances.push(controller.distance_m().unwrap());
            assert!((controller.distance_m().unwrap() - distance).abs() < 1e-6);

            if controller.is_eligible() != gate {
                changes.push(at);
            }
        }

        assert_eq!(distances.len(), 40);
        assert!(changes.is_empty(), "gate flipped under alternation at {:?}", changes);
    }

    #[test]
    fn test_same_verdict_clears_candidate() {
        let mut controller = armed(GeofenceConfig::default());
        feed(&mut controller, sample_at(INSIDE_M, 0));
        feed(&mut controller, sample_at(INSIDE_M, 100));
        assert!(controller.is_eligible());

        // A lone outlier followed by an in-range sample does not flip the gate
        feed(&mut controller, sample_at(OUTSIDE_M, 200));
        feed(&mut controller, sample_at(INSIDE_M, 300));
        feed(&mut controller, sample_at(OUTSIDE_M, 400));
        assert!(controller.is_eligible());
    }

    #[test]
    fn test_debounce_disabled() {
        let config = GeofenceConfig {
            debounce: DebounceConfig::disabled(),
            ..Default::default()
        };
        let mut controller = armed(config);

        feed(&mut controller, sample_at(INSIDE_M, 0));
        assert!(controller.is_eligible());
        feed(&mut controller, sample_at(OUTSIDE_M, 1));
        assert_eq!(controller.state(), EligibilityState::OutOfRange);
    }

    #[test]
    fn test_three_transient_failures_make_unavailable() {
        let mut controller = armed(GeofenceConfig::default());
        feed(&mut controller, sample_at(INSIDE_M, 0));
        feed(&mut controller, sample_at(INSIDE_M, 100));

        fail(&mut controller, PositionError::Timeout { timeout_ms: 5_000 });
        fail(&mut controller, PositionError::unavailable("no fix"));
        assert_eq!(controller.consecutive_failures(), 2);
        assert!(controller.is_eligible());

        fail(&mut controller, PositionError::Timeout { timeout_ms: 5_000 });
        assert_eq!(controller.state(), EligibilityState::Unavailable);
        assert!(!controller.is_eligible());

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.distance_m, None);
        assert_eq!(snapshot.within_range, None);
        assert!(!snapshot.eligible);
        assert_eq!(snapshot.last_error, Some(PositionError::Timeout { timeout_ms: 5_000 }));

        assert_eq!(controller.watcher().active_watch_count(), 0);
    }

    #[test]
    fn test_sample_resets_failure_count() {
        let mut controller = armed(GeofenceConfig::default());

        fail(&mut controller, PositionError::Timeout { timeout_ms: 5_000 });
        fail(&mut controller, PositionError::Timeout { timeout_ms: 5_000 });
        feed(&mut controller, sample_at(INSIDE_M, 0));
        assert_eq!(controller.consecutive_failures(), 0);

        fail(&mut controller, PositionError::Timeout { timeout_ms: 5_000 });
        fail(&mut controller, PositionError::Timeout { timeout_ms: 5_000 });
        assert_ne!(controller.state(), EligibilityState::Unavailable);
    }

    #[test]
    fn test_permission_denied_is_immediately_unavailable() {
        let mut controller = armed(GeofenceConfig::default());
        fail(&mut controller, PositionError::PermissionDenied);

        assert_eq!(controller.state(), EligibilityState::Unavailable);
        assert_eq!(controller.last_error(), Some(&PositionError::PermissionDenied));
        assert_eq!(controller.subscription(), None);
    }

    #[test]
    fn test_refused_watch_reports_error() {
        let mut watcher = MockPositionWatcher::new();
        watcher.fail_watch(PositionError::PermissionDenied);
        let mut controller = AttendanceEligibilityController::new(watcher, target(), GeofenceConfig::default()).unwrap();

        let result = controller.arm();
        assert_eq!(result, Err(ControllerError::Position(PositionError::PermissionDenied)));
        assert_eq!(controller.state(), EligibilityState::Unavailable);
    }

    #[test]
    fn test_rearm_recovers_from_unavailable() {
        let mut controller = armed(GeofenceConfig::default());
        let first = controller.subscription().unwrap();
        fail(&mut controller, PositionError::PermissionDenied);

        let second = controller.rearm().unwrap();
        assert_ne!(first, second);
        assert_eq!(controller.state(), EligibilityState::Idle);
        assert_eq!(controller.last_error(), None);

        feed(&mut controller, sample_at(INSIDE_M, 10_000));
        feed(&mut controller, sample_at(INSIDE_M, 10_500));
        assert!(controller.is_eligible());
    }

    #[test]
    fn test_arm_twice_is_rejected() {
        let mut controller = armed(GeofenceConfig::default());
        assert_eq!(controller.arm(), Err(ControllerError::AlreadyArmed));
        assert_eq!(controller.watcher().active_watch_count(), 1);
    }

    #[test]
    fn test_teardown_unsubscribes_and_ignores_late_samples() {
        let mut controller = armed(GeofenceConfig::default());
        feed(&mut controller, sample_at(INSIDE_M, 0));

        // Delivered by the platform but not yet applied
        controller.watcher().emit_sample(sample_at(INSIDE_M, 100));

        controller.teardown();
        assert_eq!(controller.watcher().active_watch_count(), 0);
        assert_eq!(controller.watcher().cleared_handles().len(), 1);
        assert_eq!(controller.state(), EligibilityState::Idle);

        assert_eq!(controller.pump().unwrap(), 0);
        assert!(!controller.handle_sample(sample_at(INSIDE_M, 200)).unwrap());
        assert!(!controller.handle_error(PositionError::PermissionDenied));
        assert!(controller.latest_decision().is_none());
        assert!(!controller.is_eligible());

        assert_eq!(controller.arm(), Err(ControllerError::TornDown));
        assert_eq!(controller.rearm(), Err(ControllerError::TornDown));
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut controller = armed(GeofenceConfig::default());
        feed(&mut controller, sample_at(INSIDE_M, 0));
        feed(&mut controller, sample_at(INSIDE_M, 100));
        assert!(controller.is_eligible());

        controller.reset();
        assert_eq!(controller.state(), EligibilityState::Idle);
        assert!(controller.latest_decision().is_none());
        assert!(controller.subscription().is_some());
    }

    #[test]
    fn test_samples_before_arming_are_ignored() {
        let mut controller =
            AttendanceEligibilityController::new(MockPositionWatcher::new(), target(), GeofenceConfig::default()).unwrap();
        assert!(!controller.handle_sample(sample_at(INSIDE_M, 0)).unwrap());
        assert_eq!(controller.state(), EligibilityState::Idle);
    }

    #[test]
    fn test_latest_sample_wins() {
        let mut controller = armed(GeofenceConfig::default());
        controller.watcher().emit_sample(sample_at(3.0, 0));
        controller.watcher().emit_sample(sample_at(7.0, 100));
        controller.watcher().emit_sample(sample_at(12.0, 200));

        assert_eq!(controller.pump().unwrap(), 3);
        assert!((controller.distance_m().unwrap() - 12.0).abs() < 1e-6);
        assert_eq!(controller.latest_decision().unwrap().sample().captured_at_ms(), 200);
    }

    #[test]
    fn test_custom_evaluator() {
        let always_inside = |target: &GeofenceTarget, sample: &PositionSample| -> GeoResult<GeofenceDecision> {
            Ok(GeofenceDecision::new(*target, *sample, 0.0))
        };
        let mut controller = AttendanceEligibilityController::with_evaluator(
            MockPositionWatcher::new(),
            always_inside,
            target(),
            GeofenceConfig::default(),
        )
        .unwrap();
        controller.arm().unwrap();

        controller.handle_sample(sample_at(5_000.0, 0)).unwrap();
        controller.handle_sample(sample_at(5_000.0, 10)).unwrap();
        assert!(controller.is_eligible());
    }

    #[test]
    fn test_for_coordinate_uses_configured_radius() {
        let mut controller =
            AttendanceEligibilityController::for_coordinate(MockPositionWatcher::new(), site(), GeofenceConfig::with_radius(30.0))
                .unwrap();
        assert_eq!(controller.target().radius_m(), 30.0);

        controller.arm().unwrap();
        feed(&mut controller, sample_at(25.0, 0));
        feed(&mut controller, sample_at(25.0, 100));
        assert!(controller.is_eligible());

        let rejected =
            AttendanceEligibilityController::for_coordinate(MockPositionWatcher::new(), site(), GeofenceConfig::with_radius(0.0));
        assert!(matches!(rejected, Err(ControllerError::Config(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = AttendanceEligibilityController::new(
            MockPositionWatcher::new(),
            target(),
            GeofenceConfig::with_radius(-1.0),
        );
        assert!(matches!(result, Err(ControllerError::Config(_))));
    }

    #[test]
    fn test_drop_clears_subscription() {
        use std::sync::{Arc, Mutex};

        struct SharedWatcher(Arc<Mutex<MockPositionWatcher>>);

        impl PositionWatcher for SharedWatcher {
            fn current_position(
                &mut self,
                _options: &crate::location::PositionOptions,
            ) -> impl std::future::Future<Output = crate::location::PositionResult<PositionSample>> + Send {
                std::future::pending::<crate::location::PositionResult<PositionSample>>()
            }

            fn watch_position(
                &mut self,
                on_sample: crate::location::SampleCallback,
                on_error: crate::location::ErrorCallback,
                options: &crate::location::PositionOptions,
            ) -> crate::location::PositionResult<WatchHandle> {
                self.0.lock().unwrap().watch_position(on_sample, on_error, options)
            }

            fn clear_watch(&mut self, handle: WatchHandle) {
                self.0.lock().unwrap().clear_watch(handle);
            }
        }

        let shared = Arc::new(Mutex::new(MockPositionWatcher::new()));
        {
            let mut controller = AttendanceEligibilityController::new(
                SharedWatcher(Arc::clone(&shared)),
                target(),
                GeofenceConfig::default(),
            )
            .unwrap();
            controller.arm().unwrap();
            assert_eq!(shared.lock().unwrap().active_watch_count(), 1);
        }
        assert_eq!(shared.lock().unwrap().active_watch_count(), 0);
    }
}
