//! Setter methods of `ProgressConfigBuilder`

use super::builder::ProgressConfigBuilder;
use super::types::{SummaryStyle, Theme};
use crate::progress::{ResultEstimate, Stage};
use crate::status::StatusEntry;

impl ProgressConfigBuilder {
    /// Set the cadence of the stage model tick
    ///
    /// One tick advances the simulated clock by one second regardless of the
    /// cadence, so a shorter interval plays the stages back faster.
    #[must_use]
    pub fn tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    #[must_use]
    pub fn result_estimate(mut self, estimate: ResultEstimate) -> Self {
        self.result_estimate = estimate;
        self
    }

    /// Set the jitter bound of the simulated result count; 0 disables jitter
    #[must_use]
    pub fn jitter_max(mut self, jitter_max: u32) -> Self {
        self.result_estimate.jitter_max = jitter_max;
        self
    }

    /// Set how long the dialog stays at 100% before both engines stop
    #[must_use]
    pub fn completion_grace_ms(mut self, grace_ms: u64) -> Self {
        self.completion_grace_ms = grace_ms;
        self
    }

    #[must_use]
    pub fn stages(mut self, stages: Vec<Stage>) -> Self {
        self.stages = Some(stages);
        self
    }

    #[must_use]
    pub fn status_entries(mut self, entries: Vec<StatusEntry>) -> Self {
        self.status_entries = Some(entries);
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn summary_style(mut self, style: SummaryStyle) -> Self {
        self.summary_style = style;
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ProgressConfig, SummaryStyle, Theme};
    use crate::progress::Stage;
    use std::time::Duration;

    #[test]
    fn defaults_match_reference_configuration() {
        let config = ProgressConfig::builder().build().expect("defaults are valid");

        assert_eq!(config, ProgressConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.completion_grace(), Duration::from_secs(3));
        assert_eq!(config.stages().total_duration_secs(), 90);
        assert_eq!(config.status_entries().len(), 13);
        assert_eq!(config.result_estimate().base, 15);
        assert_eq!(config.summary_style(), SummaryStyle::Detailed);
    }

    #[test]
    fn setters_are_applied() {
        let config = ProgressConfig::builder()
            .tick_interval_ms(250)
            .jitter_max(0)
            .completion_grace_ms(500)
            .stages(vec![Stage::new("only", "everything", 4, "search")])
            .theme(Theme::vivid())
            .summary_style(SummaryStyle::Compact)
            .build()
            .expect("valid config");

        assert_eq!(config.tick_interval_ms(), 250);
        assert_eq!(config.result_estimate().jitter_max, 0);
        assert_eq!(config.stages().len(), 1);
        assert_eq!(config.theme().name, "vivid");
    }

    #[test]
    fn invalid_values_fail_build() {
        assert!(ProgressConfig::builder().tick_interval_ms(0).build().is_err());
        assert!(ProgressConfig::builder().stages(Vec::new()).build().is_err());
        assert!(ProgressConfig::builder()
            .stages(vec![Stage::new("a", "b", 0, "x")])
            .build()
            .is_err());
        assert!(ProgressConfig::builder().status_entries(Vec::new()).build().is_err());
    }
}
