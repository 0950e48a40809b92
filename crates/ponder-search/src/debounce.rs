//! Keystroke debouncing for search submission.
//!
//! Callers submit work on every input edit; only the submission that
//! survives the quiet period actually runs. Each new submission replaces
//! the pending timer, so a typing burst yields exactly one pipeline run,
//! for the final composed query text.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use ponder_core::defaults;

/// Replaceable one-shot timer in front of the search pipeline.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create a debouncer with a custom quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Create a debouncer with the default quiet period
    /// ([`defaults::DEBOUNCE_MS`]).
    pub fn default_delay() -> Self {
        Self::new(Duration::from_millis(defaults::DEBOUNCE_MS))
    }

    /// Schedule `work` to run after the quiet period, cancelling any
    /// previously scheduled work that has not fired yet.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit<F, Fut>(&self, work: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let mut pending = self.pending.lock().unwrap();
        if let Some(previous) = pending.take() {
            debug!("Replacing pending debounced submission");
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            work().await;
        }));
    }

    /// Cancel any pending submission without scheduling a new one.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
