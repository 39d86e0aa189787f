//! Core configuration types for the progress engines
//!
//! `ProgressConfig` carries everything the two engines and the renderer are
//! parameterized by. One configuration drives both dialog variants; the
//! theme and summary style select the look.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ProgressError, ProgressResult};
use crate::progress::{ResultEstimate, StageSequence};
use crate::status::StatusSequence;
use crate::utils::{DEFAULT_COMPLETION_GRACE_MS, DEFAULT_TICK_INTERVAL_MS};

/// How much of the dialog the renderer draws
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStyle {
    /// Header, bars, checklist and the statistics block
    #[default]
    Detailed,
    /// Header, overall bar and the current stage only
    Compact,
}

/// Glyphs and colors used by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub bar_filled: char,
    pub bar_empty: char,
    /// Width of the overall progress bar, in cells
    pub bar_width: usize,
    pub completed_marker: String,
    pub active_marker: String,
    pub pending_marker: String,
    /// ANSI SGR parameters wrapped around accented text; `None` renders plain
    pub accent: Option<String>,
}

impl Theme {
    /// Muted slate palette, plain text
    #[must_use]
    pub fn slate() -> Self {
        Self {
            name: "slate".to_string(),
            bar_filled: '█',
            bar_empty: '░',
            bar_width: 40,
            completed_marker: "[x]".to_string(),
            active_marker: "[>]".to_string(),
            pending_marker: "[ ]".to_string(),
            accent: None,
        }
    }

    /// Blue accented palette
    #[must_use]
    pub fn vivid() -> Self {
        Self {
            name: "vivid".to_string(),
            bar_filled: '▓',
            bar_empty: '·',
            completed_marker: "✔".to_string(),
            active_marker: "➤".to_string(),
            pending_marker: "○".to_string(),
            accent: Some("1;34".to_string()),
            ..Self::slate()
        }
    }

    /// Look up a preset by name
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "slate" => Some(Self::slate()),
            "vivid" => Some(Self::vivid()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::slate()
    }
}

/// Configuration of the stage model, the status rotator and the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Cadence of the stage model tick; one tick is one simulated second
    pub(crate) tick_interval_ms: u64,
    pub(crate) result_estimate: ResultEstimate,
    /// Delay between the completion signal and stopping both engines
    pub(crate) completion_grace_ms: u64,
    pub(crate) stages: StageSequence,
    pub(crate) status_entries: StatusSequence,
    pub(crate) theme: Theme,
    pub(crate) summary_style: SummaryStyle,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            result_estimate: ResultEstimate::default(),
            completion_grace_ms: DEFAULT_COMPLETION_GRACE_MS,
            stages: StageSequence::default(),
            status_entries: StatusSequence::default(),
            theme: Theme::default(),
            summary_style: SummaryStyle::default(),
        }
    }
}

impl ProgressConfig {
    /// Check the values serde cannot check on its own
    ///
    /// Stage and status sequences are validated while they are built, so only
    /// the scalar settings are left.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::InvalidConfig`] naming the offending value.
    pub fn validate(&self) -> ProgressResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(ProgressError::InvalidConfig {
                what: "tick_interval_ms must be positive",
            });
        }
        if self.theme.bar_width == 0 {
            return Err(ProgressError::InvalidConfig {
                what: "theme.bar_width must be positive",
            });
        }
        Ok(())
    }

    /// Replace the theme, typically from a command line preset
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_summary_style(mut self, style: SummaryStyle) -> Self {
        self.summary_style = style;
        self
    }

    /// Load a JSON configuration file
    ///
    /// Missing fields take their defaults; the result is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON for this
    /// schema, or fails validation.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        log::debug!(
            "Loaded progress config from {} ({} stages, {} status entries)",
            path.display(),
            config.stages.len(),
            config.status_entries.len()
        );
        Ok(config)
    }
}
