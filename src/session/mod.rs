//! Host-side glue driving both engines from one running flag
//!
//! [`ProgressSession`] turns the host's edge-triggered `running` flag into
//! `start`/`stop` calls on the stage model and the status rotator, forwards
//! result summaries, holds the dialog at 100% for a grace period after
//! completion, and reports cancel intent on an event channel.

mod events;

pub use events::{RunOutcome, SessionEvent};

use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::config::ProgressConfig;
use crate::error::ProgressResult;
use crate::progress::{ProgressSnapshot, ResultsSummary, StageProgressModel};
use crate::scheduler::{Epoch, TimerHandle, spawn_after};
use crate::status::{StatusRotator, StatusSnapshot};

#[derive(Default)]
struct SessionState {
    running: bool,
    epoch: Epoch,
    run_id: Option<Uuid>,
    started_at: Option<DateTime<Utc>>,
    grace_timer: Option<TimerHandle>,
    cancel_requested: bool,
    outcome: Option<RunOutcome>,
}

struct SessionShared {
    model: StageProgressModel,
    rotator: StatusRotator,
    grace: Duration,
    events: mpsc::UnboundedSender<SessionEvent>,
    state: Mutex<SessionState>,
}

/// One progress dialog plus its floating status line
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct ProgressSession {
    shared: Arc<SessionShared>,
}

impl ProgressSession {
    /// Build both engines from `config` and return the session with its
    /// event receiver
    ///
    /// # Errors
    ///
    /// Returns an error if the stage model rejects the configuration.
    pub fn new(
        config: &ProgressConfig,
    ) -> ProgressResult<(Self, mpsc::UnboundedReceiver<SessionEvent>)> {
        let model = StageProgressModel::from_config(config)?;
        let rotator = StatusRotator::new(config.status_entries().clone());
        Ok(Self::with_engines(model, rotator, config.completion_grace()))
    }

    /// Wrap engines that were built separately
    #[must_use]
    pub fn with_engines(
        model: StageProgressModel,
        rotator: StatusRotator,
        grace: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let session = Self {
            shared: Arc::new(SessionShared {
                model,
                rotator,
                grace,
                events,
                state: Mutex::new(SessionState::default()),
            }),
        };
        (session, receiver)
    }

    /// Apply the host's running flag; only transitions have an effect
    ///
    /// false→true starts a new run with a fresh run id. true→false stops
    /// both engines and resets them to idle.
    pub fn set_running(&self, running: bool) {
        let mut state = self.shared.state.lock();
        if state.running == running {
            return;
        }

        if running {
            self.begin_run(&mut state);
        } else {
            self.end_run(&mut state);
        }
    }

    fn begin_run(&self, state: &mut SessionState) {
        state.epoch.bump();
        if let Some(mut timer) = state.grace_timer.take() {
            timer.cancel();
        }

        let run_id = Uuid::new_v4();
        state.running = true;
        state.run_id = Some(run_id);
        state.started_at = Some(Utc::now());
        state.cancel_requested = false;
        state.outcome = None;

        self.shared.model.start();
        self.shared.rotator.start();
        log::info!("Search run {run_id} started");
        self.publish(SessionEvent::Started { run_id });
    }

    fn end_run(&self, state: &mut SessionState) {
        state.epoch.bump();
        if let Some(mut timer) = state.grace_timer.take() {
            timer.cancel();
        }

        state.running = false;
        if state.outcome.is_none() && state.cancel_requested {
            state.outcome = Some(RunOutcome::Cancelled);
        }

        self.shared.model.stop();
        self.shared.rotator.stop();

        if let Some(run_id) = state.run_id {
            log::info!(
                "Search run {run_id} stopped after {}s ({})",
                elapsed_since(state.started_at),
                state
                    .outcome
                    .as_ref()
                    .map_or("no outcome", RunOutcome::label)
            );
            self.publish(SessionEvent::Stopped {
                run_id,
                outcome: state.outcome.clone(),
            });
        }
    }

    /// Forward a host summary to the stage model; `None` is ignored
    ///
    /// A summary flagged `search_complete` closes the run the same way
    /// [`ProgressSession::complete`] does.
    pub fn push_summary(&self, summary: Option<ResultsSummary>) {
        let Some(summary) = summary else {
            return;
        };
        if !summary.is_complete() {
            self.shared.model.on_external_update(Some(&summary));
            return;
        }

        let mut state = self.shared.state.lock();
        if !state.running || state.outcome.is_some() {
            self.shared.model.on_external_update(Some(&summary));
            return;
        }
        self.close_run(&mut state, &summary);
    }

    /// Report the real search as finished
    ///
    /// The stage model jumps to 100% with the real total. Both engines are
    /// stopped after the grace period unless a newer run has started by then.
    /// Ignored when no run is active or the run already has an outcome.
    pub fn complete(&self, total_results: u64) {
        let mut state = self.shared.state.lock();
        if !state.running || state.outcome.is_some() {
            log::debug!("Ignoring completion outside an open run");
            return;
        }
        self.close_run(&mut state, &ResultsSummary::completed(total_results));
    }

    fn close_run(&self, state: &mut SessionState, summary: &ResultsSummary) {
        self.shared.model.on_external_update(Some(summary));
        let total_results = summary
            .total_results
            .unwrap_or_else(|| self.shared.model.snapshot().simulated_result_count);
        state.outcome = Some(RunOutcome::Completed { total_results });

        let scheduled = state.epoch;
        let weak = Arc::downgrade(&self.shared);
        state.grace_timer = Some(spawn_after(self.shared.grace, "completion-grace", move || {
            finish_grace(&weak, scheduled);
        }));

        if let Some(run_id) = state.run_id {
            log::info!("Search run {run_id} completed with {total_results} results");
            self.publish(SessionEvent::Completed {
                run_id,
                total_results,
            });
        }
    }

    /// Report the real search as failed and stop both engines at once
    ///
    /// The engines end below 100% without a completion summary, the same way
    /// a cancelled run ends.
    pub fn fail(&self, message: impl Into<String>) {
        let mut state = self.shared.state.lock();
        if !state.running {
            return;
        }

        let message = message.into();
        log::warn!("Search run failed: {message}");
        if let Some(run_id) = state.run_id {
            self.publish(SessionEvent::Failed {
                run_id,
                message: message.clone(),
            });
        }
        state.outcome = Some(RunOutcome::Failed { message });
        self.end_run(&mut state);
    }

    /// Emit the user's cancel intent
    ///
    /// Backend work is not aborted and the engines keep running; the host
    /// reacts to [`SessionEvent::CancelRequested`] and clears the running
    /// flag, which then records [`RunOutcome::Cancelled`].
    pub fn cancel(&self) {
        let mut state = self.shared.state.lock();
        if !state.running || state.outcome.is_some() {
            return;
        }
        state.cancel_requested = true;
        if let Some(run_id) = state.run_id {
            log::info!("Cancel requested for search run {run_id}");
            self.publish(SessionEvent::CancelRequested { run_id });
        }
    }

    fn publish(&self, event: SessionEvent) {
        if self.shared.events.send(event).is_err() {
            log::debug!("Session event dropped; receiver is gone");
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.state.lock().running
    }

    /// Id of the current or most recent run
    #[must_use]
    pub fn run_id(&self) -> Option<Uuid> {
        self.shared.state.lock().run_id
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.shared.state.lock().started_at
    }

    /// How the current or most recent run ended, if it has
    #[must_use]
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.shared.state.lock().outcome.clone()
    }

    #[must_use]
    pub fn progress(&self) -> ProgressSnapshot {
        self.shared.model.snapshot()
    }

    #[must_use]
    pub fn status(&self) -> StatusSnapshot {
        self.shared.rotator.snapshot()
    }

    #[must_use]
    pub fn model(&self) -> &StageProgressModel {
        &self.shared.model
    }

    #[must_use]
    pub fn rotator(&self) -> &StatusRotator {
        &self.shared.rotator
    }
}

fn finish_grace(weak: &Weak<SessionShared>, scheduled: Epoch) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let session = ProgressSession { shared };
    let mut state = session.shared.state.lock();
    if !state.epoch.admits(scheduled) {
        log::debug!("Dropping stale completion grace ({scheduled}, live {})", state.epoch);
        return;
    }

    // The handle belongs to the task running this callback
    if let Some(timer) = state.grace_timer.take() {
        timer.detach();
    }
    session.end_run(&mut state);
}

fn elapsed_since(started_at: Option<DateTime<Utc>>) -> i64 {
    started_at.map_or(0, |at| (Utc::now() - at).num_seconds())
}

impl std::fmt::Debug for ProgressSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("ProgressSession")
            .field("running", &state.running)
            .field("run_id", &state.run_id)
            .field("outcome", &state.outcome)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::FixedJitter;

    async fn advance_ms(ms: u64) {
        tokio::time::advance(Duration::from_millis(ms)).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    fn session() -> (ProgressSession, mpsc::UnboundedReceiver<SessionEvent>) {
        let config = ProgressConfig::default();
        let model = StageProgressModel::from_config(&config)
            .expect("default config is valid")
            .with_jitter(FixedJitter(0));
        let rotator = StatusRotator::new(config.status_entries().clone());
        ProgressSession::with_engines(model, rotator, config.completion_grace())
    }

    #[tokio::test(start_paused = true)]
    async fn running_flag_is_edge_triggered() {
        let (session, mut events) = session();
        session.set_running(true);
        let first = session.run_id();
        session.set_running(true);

        assert_eq!(session.run_id(), first);
        assert!(matches!(events.try_recv(), Ok(SessionEvent::Started { .. })));
        assert!(events.try_recv().is_err());

        session.set_running(false);
        session.set_running(false);
        assert!(matches!(events.try_recv(), Ok(SessionEvent::Stopped { outcome: None, .. })));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn completion_stops_after_grace() {
        let (session, _events) = session();
        session.set_running(true);
        advance_ms(10_000).await;

        session.complete(12);
        assert_eq!(session.progress().percent_complete, 100.0);
        assert!(session.is_running());

        advance_ms(2_999).await;
        assert!(session.is_running());
        advance_ms(1).await;
        assert!(!session.is_running());
        assert_eq!(session.progress().percent_complete, 0.0);
        assert!(session.status().is_blank());
        assert_eq!(
            session.outcome(),
            Some(RunOutcome::Completed { total_results: 12 })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stale_grace_never_stops_a_later_run() {
        let (session, _events) = session();
        session.set_running(true);
        session.complete(3);

        session.set_running(false);
        session.set_running(true);
        let second = session.run_id();

        advance_ms(5_000).await;
        assert!(session.is_running());
        assert_eq!(session.run_id(), second);
        assert_eq!(session.progress().elapsed_secs, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_emits_intent_and_host_stop_records_it() {
        let (session, mut events) = session();
        session.set_running(true);
        let _ = events.try_recv();

        session.cancel();
        assert!(session.is_running());
        assert!(matches!(
            events.try_recv(),
            Ok(SessionEvent::CancelRequested { .. })
        ));

        session.set_running(false);
        assert_eq!(session.outcome(), Some(RunOutcome::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_stops_without_reaching_full() {
        let (session, _events) = session();
        session.set_running(true);
        advance_ms(4_000).await;

        session.fail("Cannot connect to server");
        assert!(!session.is_running());
        assert!(!session.model().has_pending_tick());
        assert!(matches!(session.outcome(), Some(RunOutcome::Failed { .. })));

        advance_ms(5_000).await;
        assert_eq!(session.progress().elapsed_secs, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn completing_summary_closes_the_run() {
        let (session, mut events) = session();
        session.set_running(true);
        let _ = events.try_recv();
        advance_ms(2_000).await;

        session.push_summary(Some(ResultsSummary::completed(9)));
        assert_eq!(session.progress().percent_complete, 100.0);
        assert_eq!(
            session.outcome(),
            Some(RunOutcome::Completed { total_results: 9 })
        );
        assert!(matches!(
            events.try_recv(),
            Ok(SessionEvent::Completed { total_results: 9, .. })
        ));

        session.cancel();
        assert!(events.try_recv().is_err());

        advance_ms(3_000).await;
        assert!(!session.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn completing_summary_without_total_keeps_displayed_count() {
        let (session, _events) = session();
        session.set_running(true);
        session.push_summary(Some(ResultsSummary::total(5)));

        session.push_summary(Some(ResultsSummary {
            search_complete: Some(true),
            ..ResultsSummary::default()
        }));
        assert_eq!(
            session.outcome(),
            Some(RunOutcome::Completed { total_results: 5 })
        );
    }
}
