//! Cancellable one-shot timers and a per-input debouncer built on them.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a callback scheduled with [`schedule`].
///
/// Dropping the handle does not cancel the callback.
#[derive(Debug)]
pub struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Discards the callback if it has not fired yet.
    pub fn cancel(&self) {
        self.task.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Runs `callback` once after `delay` on the current tokio runtime.
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub fn schedule<F>(delay: Duration, callback: F) -> TimerHandle
where
    F: FnOnce() + Send + 'static,
{
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        callback();
    });
    TimerHandle { task }
}

/// Keeps at most one pending callback: every call to
/// [`Debouncer::call`] cancels the previous one and restarts the delay.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TimerHandle>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn call<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.pending = Some(schedule(self.delay, callback));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }

    /// `true` while a callback is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}
