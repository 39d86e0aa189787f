//! Periodic and one-shot timers returning owned handles

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Whether a periodic callback wants to keep ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    /// Schedule the next tick
    Continue,
    /// End the timer after this tick
    Stop,
}

/// Owned handle to a scheduled timer task
///
/// Cancelling is idempotent. Dropping the handle cancels the timer, so a
/// handle that goes out of scope never leaves a dangling callback behind.
#[derive(Debug)]
pub struct TimerHandle {
    label: &'static str,
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    fn new(label: &'static str, task: JoinHandle<()>) -> Self {
        Self {
            label,
            task: Some(task),
        }
    }

    /// Cancel the timer if it is still pending
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                log::debug!("Cancelling timer '{}'", self.label);
            }
            task.abort();
        }
    }

    /// Release the handle without cancelling the task
    ///
    /// Used by a callback that replaces its own handle while it is still
    /// running, where aborting would target the current task.
    pub fn detach(mut self) {
        self.task.take();
    }

    /// Whether the timer task is still scheduled
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Label given at schedule time
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Run `on_tick` every `period`, first firing one full period from now
///
/// The timer ends when the callback returns [`TickControl::Stop`] or the
/// handle is cancelled. Missed ticks are delivered in a burst so the callback
/// count keeps pace with wall-clock time. Deadlines are taken from the clock
/// at call time, not when the task is first polled.
///
/// Must be called from within a tokio runtime.
pub fn spawn_interval<F>(period: Duration, label: &'static str, mut on_tick: F) -> TimerHandle
where
    F: FnMut() -> TickControl + Send + 'static,
{
    let first_tick = Instant::now() + period;
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(first_tick, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

        loop {
            interval.tick().await;
            if on_tick() == TickControl::Stop {
                log::debug!("Timer '{label}' finished");
                break;
            }
        }
    });

    TimerHandle::new(label, task)
}

/// Run `on_fire` once after `delay`
///
/// Must be called from within a tokio runtime.
pub fn spawn_after<F>(delay: Duration, label: &'static str, on_fire: F) -> TimerHandle
where
    F: FnOnce() + Send + 'static,
{
    let deadline = Instant::now() + delay;
    let task = tokio::spawn(async move {
        tokio::time::sleep_until(deadline).await;
        on_fire();
    });

    TimerHandle::new(label, task)
}
