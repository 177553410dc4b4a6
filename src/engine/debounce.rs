//! Cancellable quiet-period timer.
//!
//! Live search must not run on every keystroke: each new input cancels
//! the pending run and schedules a fresh one after the quiet period, so
//! at most one search fires per quiet interval and the last input wins.
//! The timer handle is owned by the debouncer instance, not ambient
//! state, so independent engines (and tests) never share timers.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

pub struct Debouncer {
    quiet: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: Mutex::new(None),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Schedule `action` to run after the quiet period, cancelling any
    /// previously scheduled action. Must be called from within a tokio
    /// runtime.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(mut pending) = self.pending.lock() else {
            return;
        };
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        let quiet = self.quiet;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            action.await;
        }));
    }

    /// Cancel the pending action, if any.
    pub fn cancel(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }

    /// Wait for the pending action to run to completion instead of
    /// cancelling it. Used on input EOF so the last scheduled search
    /// still fires.
    pub async fn flush(&self) {
        let handle = match self.pending.lock() {
            Ok(mut pending) => pending.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
