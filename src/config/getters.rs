//! Getter methods for `ProgressConfig`

use std::time::Duration;

use super::types::{ProgressConfig, SummaryStyle, Theme};
use crate::progress::{ResultEstimate, StageSequence};
use crate::status::StatusSequence;

impl ProgressConfig {
    #[must_use]
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn result_estimate(&self) -> ResultEstimate {
        self.result_estimate
    }

    #[must_use]
    pub fn completion_grace(&self) -> Duration {
        Duration::from_millis(self.completion_grace_ms)
    }

    #[must_use]
    pub fn stages(&self) -> &StageSequence {
        &self.stages
    }

    #[must_use]
    pub fn status_entries(&self) -> &StatusSequence {
        &self.status_entries
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub fn summary_style(&self) -> SummaryStyle {
        self.summary_style
    }
}
