//! Timer-driven stage progress model
//!
//! [`StageProgressModel`] owns one periodic tick and a [`ProgressState`].
//! Every schedule carries the [`Epoch`] it was created under; a tick that
//! fires after a reset finds a newer epoch and leaves the state untouched.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use super::jitter::{JitterSource, RandomJitter};
use super::snapshot::ProgressSnapshot;
use super::stage::StageSequence;
use super::state::{ProgressState, ResultEstimate};
use super::summary::ResultsSummary;
use crate::config::ProgressConfig;
use crate::error::{ProgressError, ProgressResult};
use crate::scheduler::{Epoch, TickControl, TimerHandle, spawn_interval};

struct ModelInner {
    epoch: Epoch,
    timer: Option<TimerHandle>,
    ticking: bool,
    state: ProgressState,
    jitter: Box<dyn JitterSource>,
}

impl ModelInner {
    /// Invalidate the current schedule and cancel its timer
    fn retire_schedule(&mut self) {
        self.epoch.bump();
        self.ticking = false;
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

/// Weighted multi-stage progress simulation reconciled against real results
///
/// Cloning yields another handle to the same model. `start` must be called
/// from within a tokio runtime; every other operation is synchronous.
#[derive(Clone)]
pub struct StageProgressModel {
    inner: Arc<Mutex<ModelInner>>,
    stages: Arc<StageSequence>,
    tick_interval: Duration,
    estimate: ResultEstimate,
}

impl StageProgressModel {
    /// Create an idle model
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::InvalidConfig`] if `tick_interval` is zero.
    pub fn new(
        stages: StageSequence,
        tick_interval: Duration,
        estimate: ResultEstimate,
    ) -> ProgressResult<Self> {
        if tick_interval.is_zero() {
            return Err(ProgressError::InvalidConfig {
                what: "tick interval must be positive",
            });
        }

        let state = ProgressState::idle(&stages);
        Ok(Self {
            inner: Arc::new(Mutex::new(ModelInner {
                epoch: Epoch::INITIAL,
                timer: None,
                ticking: false,
                state,
                jitter: Box::new(RandomJitter::default()),
            })),
            stages: Arc::new(stages),
            tick_interval,
            estimate,
        })
    }

    /// Create an idle model from a validated configuration
    ///
    /// # Errors
    ///
    /// Same as [`StageProgressModel::new`].
    pub fn from_config(config: &ProgressConfig) -> ProgressResult<Self> {
        Self::new(
            config.stages.clone(),
            config.tick_interval(),
            config.result_estimate,
        )
    }

    /// Replace the jitter source, typically with a fixed one in tests
    #[must_use]
    pub fn with_jitter(self, jitter: impl JitterSource + 'static) -> Self {
        self.inner.lock().jitter = Box::new(jitter);
        self
    }

    /// Begin a run from zero
    ///
    /// Displayed values are always reset. A tick schedule that is already
    /// live is kept as is; otherwise a new one is created under a fresh epoch.
    pub fn start(&self) {
        let mut inner = self.inner.lock();
        inner.state = ProgressState::begin(&self.stages);

        if inner.ticking {
            log::debug!("Progress model restarted on live schedule ({})", inner.epoch);
            return;
        }

        inner.retire_schedule();
        let scheduled = inner.epoch;
        inner.ticking = true;
        inner.timer = Some(spawn_interval(
            self.tick_interval,
            "stage-progress",
            self.tick_callback(scheduled),
        ));
        log::debug!(
            "Progress model started ({scheduled}, {} stages, {}s)",
            self.stages.len(),
            self.stages.total_duration_secs()
        );
    }

    fn tick_callback(&self, scheduled: Epoch) -> impl FnMut() -> TickControl + Send + 'static {
        let weak: Weak<Mutex<ModelInner>> = Arc::downgrade(&self.inner);
        let stages = Arc::clone(&self.stages);
        let estimate = self.estimate;

        move || {
            let Some(shared) = weak.upgrade() else {
                return TickControl::Stop;
            };
            let mut inner = shared.lock();
            if !inner.epoch.admits(scheduled) {
                log::debug!("Dropping stale progress tick ({scheduled}, live {})", inner.epoch);
                return TickControl::Stop;
            }

            let ModelInner { state, jitter, .. } = &mut *inner;
            let control = state.tick(&stages, &estimate, jitter.as_mut());
            if control == TickControl::Stop {
                inner.ticking = false;
                // Running inside this very task; aborting it here is pointless
                if let Some(timer) = inner.timer.take() {
                    timer.detach();
                }
                log::debug!("Progress model reached the end of its schedule ({scheduled})");
            }
            control
        }
    }

    /// Cancel the tick and return to idle; a no-op when already idle
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        if !inner.state.is_running() && inner.timer.is_none() {
            return;
        }
        inner.retire_schedule();
        inner.state = ProgressState::idle(&self.stages);
        log::debug!("Progress model stopped ({})", inner.epoch);
    }

    /// Merge a host summary; `None` is ignored
    ///
    /// A completion flag fast-forwards the run to 100% and cancels the tick.
    pub fn on_external_update(&self, summary: Option<&ResultsSummary>) {
        let Some(summary) = summary else {
            return;
        };

        let mut inner = self.inner.lock();
        if inner.state.reconcile(&self.stages, summary) {
            inner.retire_schedule();
            log::debug!(
                "Progress model completed by host with {} results ({})",
                inner.state.simulated_result_count(),
                inner.epoch
            );
        }
    }

    /// Copy of the current state for rendering
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        let inner = self.inner.lock();
        ProgressSnapshot::capture(&inner.state, &self.stages)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.lock().state.is_running()
    }

    /// Whether a tick is still scheduled to fire
    #[must_use]
    pub fn has_pending_tick(&self) -> bool {
        let inner = self.inner.lock();
        inner.ticking && inner.timer.as_ref().is_some_and(TimerHandle::is_active)
    }

    #[must_use]
    pub fn stages(&self) -> &Arc<StageSequence> {
        &self.stages
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl std::fmt::Debug for StageProgressModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("StageProgressModel")
            .field("epoch", &inner.epoch)
            .field("ticking", &inner.ticking)
            .field("state", &inner.state)
            .field("tick_interval", &self.tick_interval)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::jitter::FixedJitter;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    async fn advance_secs(secs: u64) {
        for _ in 0..secs {
            tokio::time::advance(Duration::from_secs(1)).await;
            settle().await;
        }
    }

    fn model() -> StageProgressModel {
        StageProgressModel::new(
            StageSequence::default(),
            Duration::from_secs(1),
            ResultEstimate::default(),
        )
        .expect("valid model")
        .with_jitter(FixedJitter(0))
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let result = StageProgressModel::new(
            StageSequence::default(),
            Duration::ZERO,
            ResultEstimate::default(),
        );
        assert!(matches!(result, Err(ProgressError::InvalidConfig { .. })));
    }

    #[test]
    fn stop_when_idle_is_a_no_op() {
        let model = model();
        model.stop();
        model.stop();
        assert!(!model.is_running());
        assert_eq!(model.snapshot().remaining_secs, 90);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_advance_the_snapshot() {
        let model = model();
        model.start();
        settle().await;
        assert_eq!(model.snapshot().elapsed_secs, 0);

        advance_secs(3).await;
        let snapshot = model.snapshot();
        assert_eq!(snapshot.elapsed_secs, 3);
        assert_eq!(snapshot.current_stage_index, 1);
        assert_eq!(snapshot.remaining_secs, 87);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_keeps_schedule_but_resets_values() {
        let model = model();
        model.start();
        advance_secs(5).await;

        model.start();
        assert_eq!(model.snapshot().elapsed_secs, 0);
        assert!(model.has_pending_tick());

        advance_secs(2).await;
        assert_eq!(model.snapshot().elapsed_secs, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn schedule_ends_after_full_duration() {
        let model = model();
        model.start();
        advance_secs(95).await;

        let snapshot = model.snapshot();
        assert_eq!(snapshot.percent_complete, 100.0);
        assert_eq!(snapshot.current_stage_index, 6);
        assert!(snapshot.running);
        assert!(!model.has_pending_tick());
    }

    #[tokio::test(start_paused = true)]
    async fn absent_summary_is_ignored() {
        let model = model();
        model.start();
        advance_secs(2).await;

        model.on_external_update(None);
        assert_eq!(model.snapshot().elapsed_secs, 2);
        assert!(model.has_pending_tick());
    }
}
