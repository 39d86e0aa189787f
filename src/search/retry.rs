//! Backoff policy for re-running a failed search
//!
//! The engines never retry on their own. A host that retries stops the
//! session, waits in [`RetryPolicy::wait_before_retry`], and starts a fresh
//! run.

use std::time::Duration;

use tokio::sync::Notify;

use super::errors::SearchError;

/// Retry configuration for the search call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first; 0 disables retries
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound of the doubling backoff
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Delay before retry number `attempt` (1-based), doubling each time
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let multiplier = 1u32 << attempt.saturating_sub(1).min(10);
        self.initial_delay
            .saturating_mul(multiplier)
            .min(self.max_delay)
    }

    /// Whether `error` after `attempts_made` attempts deserves another one
    #[must_use]
    pub fn should_retry(&self, error: &SearchError, attempts_made: u32) -> bool {
        error.is_transient() && attempts_made <= self.max_retries
    }

    /// Sleep before retry number `attempt` unless `cancel` is notified first
    ///
    /// Returns `false` when the wait was cancelled. A permit stored by
    /// `notify_one` before the wait starts cancels it immediately.
    pub async fn wait_before_retry(&self, attempt: u32, cancel: &Notify) -> bool {
        tokio::select! {
            () = tokio::time::sleep(self.delay_for_attempt(attempt)) => true,
            () = cancel.notified() => false,
        }
    }
}
