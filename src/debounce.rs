//! Debounced per-field validation scheduling
//!
//! A UI layer validates while the user types; running the validators on
//! every keystroke is wasted work. `FieldDebouncer` delays each field's
//! validation and lets a newer keystroke supersede the pending one.
//! Timers are independent per field: rescheduling `email` never touches
//! the pending validation for `phone`.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::IntakeConfig;

/// Delay before a scheduled validation fires
pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 300;

/// Schedules one cancellable delayed task per field
pub struct FieldDebouncer {
    delay: Duration,
    pending: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl FieldDebouncer {
    /// Debouncer with the default delay
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(DEFAULT_DEBOUNCE_DELAY_MS))
    }

    /// Debouncer with a custom delay
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Debouncer using the configured delay
    pub fn from_config(config: &IntakeConfig) -> Self {
        Self::with_delay(Duration::from_millis(config.debounce_delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `task` to run for `field` after the delay
    ///
    /// A pending task for the same field is aborted first; tasks for other
    /// fields keep their timers.
    pub async fn schedule<F, Fut>(&self, field: &str, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task().await;
        });

        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.insert(field.to_string(), handle) {
            previous.abort();
        }
        pending.retain(|_, handle| !handle.is_finished());
    }

    /// Abort the pending task for one field, if any
    pub async fn cancel(&self, field: &str) {
        if let Some(handle) = self.pending.lock().await.remove(field) {
            handle.abort();
        }
    }

    /// Abort every pending task
    pub async fn cancel_all(&self) {
        let mut pending = self.pending.lock().await;
        for (_, handle) in pending.drain() {
            handle.abort();
        }
    }

    /// True while a task for the field is scheduled or running
    pub async fn is_pending(&self, field: &str) -> bool {
        self.pending
            .lock()
            .await
            .get(field)
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Default for FieldDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
