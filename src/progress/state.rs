//! Pure tick and reconciliation logic of the stage progress model
//!
//! Nothing in here knows about timers. [`ProgressState::tick`] is one
//! cadence step and [`ProgressState::reconcile`] merges a host summary; the
//! timer wiring in `model.rs` only decides when to call them.

use serde::{Deserialize, Serialize};

use super::jitter::JitterSource;
use super::stage::StageSequence;
use super::summary::{ExternalSummary, ResultsSummary};
use crate::scheduler::TickControl;
use crate::utils::{DEFAULT_JITTER_MAX, DEFAULT_RESULT_BASE, DEFAULT_STAGE_BONUS, percent_of};

/// Coefficients of the simulated result count
///
/// `floor(percent / 100 * base) + stage_index * stage_bonus + jitter`, with
/// jitter drawn from `[0, jitter_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultEstimate {
    pub base: u32,
    pub stage_bonus: u32,
    pub jitter_max: u32,
}

impl Default for ResultEstimate {
    fn default() -> Self {
        Self {
            base: DEFAULT_RESULT_BASE,
            stage_bonus: DEFAULT_STAGE_BONUS,
            jitter_max: DEFAULT_JITTER_MAX,
        }
    }
}

impl ResultEstimate {
    /// Advisory result count for the given progress and stage
    pub fn estimate(
        &self,
        percent_complete: f64,
        stage_index: usize,
        jitter: &mut dyn JitterSource,
    ) -> u64 {
        let from_time = (percent_complete.clamp(0.0, 100.0) / 100.0 * f64::from(self.base)).floor() as u64;
        let from_stage = (stage_index as u64).saturating_mul(u64::from(self.stage_bonus));
        from_time
            .saturating_add(from_stage)
            .saturating_add(u64::from(jitter.sample(self.jitter_max)))
    }
}

/// Mutable state of one run of the stage progress model
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    running: bool,
    current_stage_index: usize,
    elapsed_secs: u32,
    stage_elapsed_secs: u32,
    percent_complete: f64,
    remaining_secs: u32,
    simulated_result_count: u64,
    external_summary: ExternalSummary,
}

impl ProgressState {
    /// State of a model that is not running
    #[must_use]
    pub fn idle(stages: &StageSequence) -> Self {
        Self {
            running: false,
            current_stage_index: 0,
            elapsed_secs: 0,
            stage_elapsed_secs: 0,
            percent_complete: 0.0,
            remaining_secs: stages.total_duration_secs(),
            simulated_result_count: 0,
            external_summary: ExternalSummary::default(),
        }
    }

    /// Fresh state for a run that has just started
    #[must_use]
    pub fn begin(stages: &StageSequence) -> Self {
        Self {
            running: true,
            ..Self::idle(stages)
        }
    }

    /// Advance the simulated clock by one tick
    ///
    /// Returns [`TickControl::Stop`] once the run is complete, either because
    /// the simulated duration ran out or because the host signalled
    /// completion. A stopped state is never mutated by further ticks.
    pub fn tick(
        &mut self,
        stages: &StageSequence,
        estimate: &ResultEstimate,
        jitter: &mut dyn JitterSource,
    ) -> TickControl {
        if !self.running || self.external_summary.search_complete {
            return TickControl::Stop;
        }

        let total = stages.total_duration_secs();
        if self.elapsed_secs >= total {
            self.hold_at_full();
            return TickControl::Stop;
        }

        self.elapsed_secs += 1;
        self.percent_complete = percent_of(self.elapsed_secs, total);
        self.remaining_secs = total.saturating_sub(self.elapsed_secs);

        self.simulated_result_count = match self.external_summary.total_results {
            Some(real) => real,
            None => self.simulated_result_count.max(estimate.estimate(
                self.percent_complete,
                self.current_stage_index,
                jitter,
            )),
        };

        self.stage_elapsed_secs += 1;
        let stage_duration = stages[self.current_stage_index].nominal_duration_secs;
        if self.stage_elapsed_secs >= stage_duration && self.current_stage_index < stages.last_index() {
            self.current_stage_index += 1;
            self.stage_elapsed_secs = 0;
            log::debug!(
                "Advanced to stage {} '{}' at {}s",
                self.current_stage_index,
                stages[self.current_stage_index].name,
                self.elapsed_secs
            );
        }

        if self.elapsed_secs >= total {
            self.hold_at_full();
            TickControl::Stop
        } else {
            TickControl::Continue
        }
    }

    /// Merge a host summary; returns `true` if this update completed the run
    ///
    /// Updates are ignored while idle. A result total replaces the displayed
    /// count outright, and a completion flag fast-forwards to the last stage
    /// at 100%.
    pub fn reconcile(&mut self, stages: &StageSequence, update: &ResultsSummary) -> bool {
        if !self.running {
            log::debug!("Ignoring results summary while idle");
            return false;
        }

        let was_complete = self.external_summary.search_complete;
        self.external_summary.merge(update);

        if let Some(real) = update.total_results {
            self.simulated_result_count = real;
        }

        if self.external_summary.search_complete && !was_complete {
            self.hold_at_full();
            self.current_stage_index = stages.last_index();
            return true;
        }
        false
    }

    fn hold_at_full(&mut self) {
        self.percent_complete = 100.0;
        self.remaining_secs = 0;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Completed by the host, as opposed to the simulated clock running out
    #[must_use]
    pub fn is_search_complete(&self) -> bool {
        self.external_summary.search_complete
    }

    #[must_use]
    pub fn current_stage_index(&self) -> usize {
        self.current_stage_index
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn percent_complete(&self) -> f64 {
        self.percent_complete
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn simulated_result_count(&self) -> u64 {
        self.simulated_result_count
    }

    #[must_use]
    pub fn external_summary(&self) -> &ExternalSummary {
        &self.external_summary
    }
}
