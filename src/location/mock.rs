//! Scripted position watcher for testing and development

use crate::core::PositionSample;
use crate::location::{
    ErrorCallback, PositionError, PositionOptions, PositionResult, PositionWatcher, SampleCallback, WatchHandle,
};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::time::Duration;

struct Subscription {
    on_sample: SampleCallback,
    on_error: ErrorCallback,
}

/// In-memory watcher driven by the test.
///
/// One-shot fixes are served from a queue; when the queue is empty the
/// request never completes, like a platform that stops answering. Watch
/// subscriptions receive whatever the test pushes through `emit_sample` and
/// `emit_error`.
pub struct MockPositionWatcher {
    fixes: VecDeque<PositionResult<PositionSample>>,
    fix_delay: Option<Duration>,
    requests: Vec<PositionOptions>,
    subscriptions: HashMap<WatchHandle, Subscription>,
    cleared: Vec<WatchHandle>,
    next_handle: u32,
    watch_failure: Option<PositionError>,
    supported: bool,
}

impl MockPositionWatcher {
    pub fn new() -> Self {
        Self {
            fixes: VecDeque::new(),
            fix_delay: None,
            requests: Vec::new(),
            subscriptions: HashMap::new(),
            cleared: Vec::new(),
            next_handle: 0,
            watch_failure: None,
            supported: true,
        }
    }

    /// Queue the outcome of the next `current_position` call
    pub fn push_fix(&mut self, fix: PositionResult<PositionSample>) {
        self.fixes.push_back(fix);
    }

    /// Delay every one-shot fix by `delay`
    pub fn set_fix_delay(&mut self, delay: Duration) {
        self.fix_delay = Some(delay);
    }

    pub fn set_supported(&mut self, supported: bool) {
        self.supported = supported;
    }

    /// Make the next `watch_position` calls fail with `error`
    pub fn fail_watch(&mut self, error: PositionError) {
        self.watch_failure = Some(error);
    }

    /// Let `watch_position` succeed again
    pub fn allow_watch(&mut self) {
        self.watch_failure = None;
    }

    /// Deliver a fix to every active subscription, returning how many received it
    pub fn emit_sample(&self, sample: PositionSample) -> usize {
        for subscription in self.subscriptions.values() {
            (subscription.on_sample)(sample);
        }
        self.subscriptions.len()
    }

    /// Deliver a failure to every active subscription
    pub fn emit_error(&self, error: PositionError) -> usize {
        for subscription in self.subscriptions.values() {
            (subscription.on_error)(error.clone());
        }
        self.subscriptions.len()
    }

    pub fn active_watch_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_watching(&self, handle: WatchHandle) -> bool {
        self.subscriptions.contains_key(&handle)
    }

    /// Options of every one-shot request made so far
    pub fn requests(&self) -> &[PositionOptions] {
        &self.requests
    }

    /// Handles passed to `clear_watch`, in call order
    pub fn cleared_handles(&self) -> &[WatchHandle] {
        &self.cleared
    }
}

impl Default for MockPositionWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionWatcher for MockPositionWatcher {
    fn current_position(
        &mut self,
        options: &PositionOptions,
    ) -> impl Future<Output = PositionResult<PositionSample>> + Send {
        self.requests.push(*options);
        let next = self.fixes.pop_front();
        let delay = self.fix_delay;

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match next {
                Some(fix) => fix,
                None => std::future::pending().await,
            }
        }
    }

    fn watch_position(
        &mut self,
        on_sample: SampleCallback,
        on_error: ErrorCallback,
        _options: &PositionOptions,
    ) -> PositionResult<WatchHandle> {
        if !self.supported {
            return Err(PositionError::Unsupported);
        }
        if let Some(error) = &self.watch_failure {
            return Err(error.clone());
        }

        self.next_handle += 1;
        let handle = WatchHandle::new(self.next_handle);
        self.subscriptions.insert(handle, Subscription { on_sample, on_error });
        Ok(handle)
    }

    fn clear_watch(&mut self, handle: WatchHandle) {
        self.subscriptions.remove(&handle);
        self.cleared.push(handle);
    }

    fn is_supported(&self) -> bool {
        self.supported
    }
}
