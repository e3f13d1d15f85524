//! Position watcher trait and request options

use crate::core::PositionSample;
use crate::location::{PositionError, PositionResult};
use crate::utils::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Callback invoked for every fix delivered by a watch subscription
pub type SampleCallback = Box<dyn Fn(PositionSample) + Send>;

/// Callback invoked when a watch subscription reports a failure
pub type ErrorCallback = Box<dyn Fn(PositionError) + Send>;

/// Requested fix quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accuracy {
    /// GPS-grade fix, slower and more power hungry
    High,
    /// Network or cached fix
    Low,
}

/// Options for a single fix or a watch subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionOptions {
    pub accuracy: Accuracy,
    /// Give up after this long (milliseconds)
    pub timeout_ms: u32,
    /// Accept a cached fix up to this old (milliseconds); 0 forces a fresh fix
    pub maximum_age_ms: u32,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::High,
            timeout_ms: 10_000,
            maximum_age_ms: 0,
        }
    }
}

impl PositionOptions {
    /// Fresh high-accuracy fix for marking attendance
    pub fn high_accuracy() -> Self {
        Self {
            accuracy: Accuracy::High,
            timeout_ms: 15_000,
            maximum_age_ms: 0,
        }
    }

    /// Fast, possibly stale fix for browsing nearby sessions
    pub fn cached() -> Self {
        Self {
            accuracy: Accuracy::Low,
            timeout_ms: 5_000,
            maximum_age_ms: 300_000,
        }
    }

    /// Per-fix options for a long-lived watch subscription
    pub fn watch() -> Self {
        Self {
            accuracy: Accuracy::High,
            timeout_ms: 5_000,
            maximum_age_ms: 0,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms as u64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "position.timeout_ms".to_string(),
                value: self.timeout_ms.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Handle identifying an active watch subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchHandle(u32);

impl WatchHandle {
    pub fn new(id: u32) -> Self {
        WatchHandle(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Capability the host platform provides for obtaining positions.
///
/// Subscriptions are never cleaned up implicitly: whoever calls
/// `watch_position` owns the handle and must pass it to `clear_watch`.
pub trait PositionWatcher {
    /// Request a single fix.
    ///
    /// Implementations should honour `options.timeout_ms`, but callers that
    /// need the guarantee go through [`locate`].
    fn current_position(
        &mut self,
        options: &PositionOptions,
    ) -> impl Future<Output = PositionResult<PositionSample>> + Send;

    /// Start a subscription delivering fixes as they arrive
    fn watch_position(
        &mut self,
        on_sample: SampleCallback,
        on_error: ErrorCallback,
        options: &PositionOptions,
    ) -> PositionResult<WatchHandle>;

    /// Cancel a subscription; unknown handles are ignored
    fn clear_watch(&mut self, handle: WatchHandle);

    /// Whether the platform has a location service at all
    fn is_supported(&self) -> bool {
        true
    }
}

/// Obtain one fix, failing with `Timeout` once `options.timeout_ms` elapses
/// even if the platform never answers.
pub async fn locate<W>(watcher: &mut W, options: &PositionOptions) -> PositionResult<PositionSample>
where
    W: PositionWatcher,
{
    if !watcher.is_supported() {
        return Err(PositionError::Unsupported);
    }

    match tokio::time::timeout(options.timeout(), watcher.current_position(options)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!(timeout_ms = options.timeout_ms, "position request timed out");
            Err(PositionError::Timeout {
                timeout_ms: options.timeout_ms,
            })
        }
    }
}
