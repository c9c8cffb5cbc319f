//! Rate-bounded delivery of streamed partial output.
//!
//! Model output arrives as many small deltas. Repainting on every delta is
//! expensive, so updates are coalesced to at most one per interval. The first
//! value after a quiet period is delivered at once; later values within the
//! interval replace each other and the latest one is delivered when the
//! interval elapses.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Deferred-task primitive used by [`ThrottledUpdater`].
pub trait Scheduler: Send + Sync + 'static {
    /// Handle identifying one scheduled task.
    type Handle: Send + 'static;

    /// Current time on this scheduler's clock.
    fn now(&self) -> Instant;

    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send + 'static>) -> Self::Handle;

    /// Prevent a scheduled task from running, if it has not run yet.
    fn cancel(&self, handle: Self::Handle);
}

/// Scheduler backed by tokio timers. Must be used inside a tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    type Handle = tokio::task::AbortHandle;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send + 'static>) -> Self::Handle {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        })
        .abort_handle()
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.abort();
    }
}

struct ThrottleState<T, H> {
    last_emit_at: Option<Instant>,
    queued: Option<T>,
    // Sequence number of the live timer; a firing timer with any other number is stale.
    armed: Option<u64>,
    handle: Option<H>,
    next_seq: u64,
}

struct Shared<T, S: Scheduler> {
    interval: Duration,
    scheduler: S,
    on_update: Box<dyn Fn(T) + Send + Sync>,
    state: Mutex<ThrottleState<T, S::Handle>>,
}

impl<T, S: Scheduler> Shared<T, S> {
    fn lock(&self) -> MutexGuard<'_, ThrottleState<T, S::Handle>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fire(&self, seq: u64) {
        let value = {
            let mut state = self.lock();
            if state.armed != Some(seq) {
                return;
            }
            state.armed = None;
            state.handle = None;
            let value = state.queued.take();
            if value.is_some() {
                state.last_emit_at = Some(self.scheduler.now());
            }
            value
        };
        if let Some(value) = value {
            trace!(seq, "Delivering trailing update");
            (self.on_update)(value);
        }
    }
}

/// Coalesces a high-frequency value sequence into at most one callback per interval.
///
/// At most one deferred delivery is pending at any time. The last pushed value
/// is always delivered, by the timer or by [`flush`](Self::flush), unless
/// [`cancel`](Self::cancel) discards it first.
///
/// # Examples
///
/// ```
/// use saga_workflow::ThrottledUpdater;
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let updater = ThrottledUpdater::new(Duration::from_millis(50), move |text: String| {
///     sink.lock().unwrap().push(text);
/// });
///
/// updater.push("Once".to_string());
/// updater.push("Once upon".to_string());
/// updater.flush();
///
/// assert_eq!(*seen.lock().unwrap(), ["Once", "Once upon"]);
/// # }
/// ```
pub struct ThrottledUpdater<T, S: Scheduler = TokioScheduler> {
    shared: Arc<Shared<T, S>>,
}

impl<T: Send + 'static> ThrottledUpdater<T, TokioScheduler> {
    /// Updater driven by tokio timers.
    pub fn new<F>(interval: Duration, on_update: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self::with_scheduler(interval, TokioScheduler, on_update)
    }
}

impl<T: Send + 'static, S: Scheduler> ThrottledUpdater<T, S> {
    /// Updater driven by a custom scheduler.
    pub fn with_scheduler<F>(interval: Duration, scheduler: S, on_update: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                interval,
                scheduler,
                on_update: Box::new(on_update),
                state: Mutex::new(ThrottleState {
                    last_emit_at: None,
                    queued: None,
                    armed: None,
                    handle: None,
                    next_seq: 0,
                }),
            }),
        }
    }

    /// The minimum spacing between deliveries.
    pub fn interval(&self) -> Duration {
        self.shared.interval
    }

    /// Offer a new latest value.
    ///
    /// Delivered immediately when the interval is zero or has elapsed since the
    /// last delivery; otherwise queued behind a single deferred delivery that
    /// replaces any earlier one.
    pub fn push(&self, value: T) {
        let shared = &self.shared;
        if shared.interval.is_zero() {
            (shared.on_update)(value);
            return;
        }

        let now = shared.scheduler.now();
        let mut state = shared.lock();
        state.queued = Some(value);

        let since_last = state.last_emit_at.map(|at| now.saturating_duration_since(at));
        let remaining = match since_last {
            Some(elapsed) if elapsed < shared.interval => shared.interval - elapsed,
            _ => {
                let value = state.queued.take();
                state.last_emit_at = Some(now);
                state.armed = None;
                let stale = state.handle.take();
                drop(state);

                if let Some(handle) = stale {
                    shared.scheduler.cancel(handle);
                }
                if let Some(value) = value {
                    (shared.on_update)(value);
                }
                return;
            }
        };

        let seq = state.next_seq;
        state.next_seq += 1;
        state.armed = Some(seq);
        let superseded = state.handle.take();
        drop(state);

        if let Some(handle) = superseded {
            shared.scheduler.cancel(handle);
        }

        let timer_shared = Arc::clone(shared);
        let handle = shared
            .scheduler
            .schedule(remaining, Box::new(move || timer_shared.fire(seq)));

        let mut state = shared.lock();
        if state.armed == Some(seq) {
            state.handle = Some(handle);
        } else {
            drop(state);
            shared.scheduler.cancel(handle);
        }
    }

    /// Deliver the queued value now, if any, and clear the pending timer.
    pub fn flush(&self) {
        let shared = &self.shared;
        let (value, stale) = {
            let mut state = shared.lock();
            state.armed = None;
            let value = state.queued.take();
            if value.is_some() {
                state.last_emit_at = Some(shared.scheduler.now());
            }
            (value, state.handle.take())
        };

        if let Some(handle) = stale {
            shared.scheduler.cancel(handle);
        }
        if let Some(value) = value {
            (shared.on_update)(value);
        }
    }

    /// Discard the queued value and clear the pending timer without delivering.
    pub fn cancel(&self) {
        let shared = &self.shared;
        let stale = {
            let mut state = shared.lock();
            state.armed = None;
            state.queued = None;
            state.handle.take()
        };

        if let Some(handle) = stale {
            shared.scheduler.cancel(handle);
        }
    }

    /// Whether a value is waiting for delivery.
    pub fn has_pending(&self) -> bool {
        self.shared.lock().queued.is_some()
    }
}

/// Updater for streamed text with an interval in milliseconds.
pub fn create_throttled_updater<F>(interval_ms: u64, on_update: F) -> ThrottledUpdater<String>
where
    F: Fn(String) + Send + Sync + 'static,
{
    ThrottledUpdater::new(Duration::from_millis(interval_ms), on_update)
}
