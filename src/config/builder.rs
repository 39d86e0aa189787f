//! Fluent builder for `ProgressConfig`
//!
//! Every field has a default, so the builder has no required steps. Values
//! are checked once in [`ProgressConfigBuilder::build`].

use anyhow::{Context, Result, anyhow};

use super::types::{ProgressConfig, SummaryStyle, Theme};
use crate::progress::{ResultEstimate, Stage, StageSequence};
use crate::status::{StatusEntry, StatusSequence};
use crate::utils::{DEFAULT_COMPLETION_GRACE_MS, DEFAULT_TICK_INTERVAL_MS};

pub struct ProgressConfigBuilder {
    pub(crate) tick_interval_ms: u64,
    pub(crate) result_estimate: ResultEstimate,
    pub(crate) completion_grace_ms: u64,
    pub(crate) stages: Option<Vec<Stage>>,
    pub(crate) status_entries: Option<Vec<StatusEntry>>,
    pub(crate) theme: Theme,
    pub(crate) summary_style: SummaryStyle,
}

impl Default for ProgressConfigBuilder {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            result_estimate: ResultEstimate::default(),
            completion_grace_ms: DEFAULT_COMPLETION_GRACE_MS,
            stages: None,
            status_entries: None,
            theme: Theme::default(),
            summary_style: SummaryStyle::default(),
        }
    }
}

impl ProgressConfig {
    /// Create a builder for configuring a `ProgressConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ProgressConfigBuilder {
        ProgressConfigBuilder::default()
    }
}

impl ProgressConfigBuilder {
    /// Validate every setting and produce the configuration
    ///
    /// # Errors
    ///
    /// Returns an error for an empty or zero-duration stage list, an empty or
    /// zero-duration status list, a zero tick interval or a zero bar width.
    pub fn build(self) -> Result<ProgressConfig> {
        let stages = match self.stages {
            Some(stages) => StageSequence::new(stages).context("Invalid stage list")?,
            None => StageSequence::default(),
        };

        let status_entries = match self.status_entries {
            Some(entries) => StatusSequence::new(entries).context("Invalid status entries")?,
            None => StatusSequence::default(),
        };

        let config = ProgressConfig {
            tick_interval_ms: self.tick_interval_ms,
            result_estimate: self.result_estimate,
            completion_grace_ms: self.completion_grace_ms,
            stages,
            status_entries,
            theme: self.theme,
            summary_style: self.summary_style,
        };

        config
            .validate()
            .map_err(|e| anyhow!("Invalid progress config: {e}"))?;
        Ok(config)
    }
}
