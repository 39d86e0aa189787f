//! Read-only view of the stage progress model for rendering

use std::collections::BTreeMap;
use std::sync::Arc;

use super::stage::{Stage, StageSequence};
use super::state::ProgressState;
use crate::utils::COMPLETION_PLATFORM_LABEL;

/// Checklist status of a stage relative to the current stage index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageStatus {
    Completed,
    Active,
    Pending,
}

impl StageStatus {
    /// Status of `index` when `current` is the active stage
    #[must_use]
    pub fn of(index: usize, current: usize) -> Self {
        match index.cmp(&current) {
            std::cmp::Ordering::Less => Self::Completed,
            std::cmp::Ordering::Equal => Self::Active,
            std::cmp::Ordering::Greater => Self::Pending,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Active => "Active",
            Self::Pending => "Pending",
        }
    }
}

/// Immutable copy of the model state taken under its lock
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    pub running: bool,
    pub percent_complete: f64,
    pub current_stage_index: usize,
    pub current_stage_name: String,
    /// Empty while idle; the completion label once the real search finished
    pub current_platform_label: String,
    pub elapsed_secs: u32,
    pub remaining_secs: u32,
    pub simulated_result_count: u64,
    pub stage_results: BTreeMap<String, u64>,
    pub search_complete: bool,
    pub stages: Arc<StageSequence>,
}

impl ProgressSnapshot {
    pub(crate) fn capture(state: &ProgressState, stages: &Arc<StageSequence>) -> Self {
        let index = state.current_stage_index();
        let stage = &stages[index];
        let summary = state.external_summary();

        let current_platform_label = if !state.is_running() {
            String::new()
        } else if summary.search_complete {
            COMPLETION_PLATFORM_LABEL.to_string()
        } else {
            stage.platform_label.clone()
        };

        Self {
            running: state.is_running(),
            percent_complete: state.percent_complete(),
            current_stage_index: index,
            current_stage_name: stage.name.clone(),
            current_platform_label,
            elapsed_secs: state.elapsed_secs(),
            remaining_secs: state.remaining_secs(),
            simulated_result_count: state.simulated_result_count(),
            stage_results: summary.stage_results.clone(),
            search_complete: summary.search_complete,
            stages: Arc::clone(stages),
        }
    }

    #[must_use]
    pub fn current_stage(&self) -> &Stage {
        &self.stages[self.current_stage_index]
    }

    #[must_use]
    pub fn stage_status(&self, index: usize) -> StageStatus {
        StageStatus::of(index, self.current_stage_index)
    }

    /// Every stage with its checklist status, in order
    pub fn checklist(&self) -> impl Iterator<Item = (&Stage, StageStatus)> + '_ {
        self.stages
            .iter()
            .enumerate()
            .map(|(index, stage)| (stage, self.stage_status(index)))
    }

    /// Number of stages before the active one
    #[must_use]
    pub fn completed_stage_count(&self) -> usize {
        self.current_stage_index
    }

    /// Fill of the active stage's own bar, assuming equal-width stages
    #[must_use]
    pub fn stage_fill_percent(&self) -> f64 {
        let width = 100.0 / self.stages.len() as f64;
        let start = self.current_stage_index as f64 * width;
        ((self.percent_complete - start) / width * 100.0).clamp(0.0, 100.0)
    }

    /// Results per reached stage, scaled by ten and rounded
    #[must_use]
    pub fn success_rate(&self) -> u64 {
        let stages_reached = self.current_stage_index.max(1) as f64;
        (self.simulated_result_count as f64 / stages_reached * 10.0).round() as u64
    }
}
