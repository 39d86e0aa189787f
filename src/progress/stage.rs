//! Stage definitions and the validated, immutable stage sequence

use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::slice;

use crate::error::{ProgressError, ProgressResult};
use crate::icon::Icon;

/// One phase of the simulated search pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Label shown in the checklist and the "current activity" card
    pub name: String,
    /// What the stage pretends to be searching
    pub platform_label: String,
    /// Simulated length of the stage, in ticks (seconds at default cadence)
    pub nominal_duration_secs: u32,
    pub icon: Icon,
}

impl Stage {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        platform_label: impl Into<String>,
        nominal_duration_secs: u32,
        icon: impl Into<Icon>,
    ) -> Self {
        Self {
            name: name.into(),
            platform_label: platform_label.into(),
            nominal_duration_secs,
            icon: icon.into(),
        }
    }
}

/// Ordered, non-empty list of stages with strictly positive durations
///
/// Built once and never reordered or mutated afterwards, which is what keeps
/// the tick arithmetic free of division by zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Stage>", into = "Vec<Stage>")]
pub struct StageSequence {
    stages: Vec<Stage>,
    total_duration_secs: u32,
}

impl StageSequence {
    /// Validate and freeze a stage list
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::EmptyStages`] for an empty list and
    /// [`ProgressError::ZeroStageDuration`] for the first stage whose nominal
    /// duration is zero.
    pub fn new(stages: Vec<Stage>) -> ProgressResult<Self> {
        if stages.is_empty() {
            return Err(ProgressError::EmptyStages);
        }

        if let Some((index, stage)) = stages
            .iter()
            .enumerate()
            .find(|(_, stage)| stage.nominal_duration_secs == 0)
        {
            return Err(ProgressError::ZeroStageDuration {
                index,
                name: stage.name.clone(),
            });
        }

        let total_duration_secs = stages
            .iter()
            .fold(0u32, |acc, stage| acc.saturating_add(stage.nominal_duration_secs));

        Ok(Self {
            stages,
            total_duration_secs,
        })
    }

    /// Sum of all nominal durations; always at least 1
    #[must_use]
    pub fn total_duration_secs(&self) -> u32 {
        self.total_duration_secs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.stages.len() - 1
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Stage> {
        self.stages.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Stage] {
        &self.stages
    }
}

impl Index<usize> for StageSequence {
    type Output = Stage;

    fn index(&self, index: usize) -> &Stage {
        &self.stages[index]
    }
}

impl<'a> IntoIterator for &'a StageSequence {
    type Item = &'a Stage;
    type IntoIter = slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}

impl TryFrom<Vec<Stage>> for StageSequence {
    type Error = ProgressError;

    fn try_from(stages: Vec<Stage>) -> ProgressResult<Self> {
        Self::new(stages)
    }
}

impl From<StageSequence> for Vec<Stage> {
    fn from(sequence: StageSequence) -> Self {
        sequence.stages
    }
}

impl Default for StageSequence {
    /// The seven-stage, 90 second footprint search
    fn default() -> Self {
        Self {
            total_duration_secs: 90,
            stages: default_stages(),
        }
    }
}

/// The stages of a full footprint search
#[must_use]
pub fn default_stages() -> Vec<Stage> {
    vec![
        Stage::new("Initializing Search", "System Setup & Image Analysis", 3, "search"),
        Stage::new("Social Media Analysis", "Instagram, Twitter, Facebook", 18, "users"),
        Stage::new("Professional Networks", "LinkedIn, GitHub", 15, "briefcase"),
        Stage::new("Academic Platforms", "Google Scholar, ResearchGate", 12, "academic-cap"),
        Stage::new("Web Content Analysis", "Google, Bing, DuckDuckGo", 20, "globe"),
        Stage::new("News & Publications", "News Sites, Articles", 10, "newspaper"),
        Stage::new(
            "Processing Results",
            "Deep Analysis, Face Detection & Ranking - This takes time for accuracy",
            12,
            "chart-bar",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sequence_matches_its_declared_total() {
        let sequence = StageSequence::default();
        let rebuilt = StageSequence::new(default_stages()).expect("defaults are valid");

        assert_eq!(sequence, rebuilt);
        assert_eq!(sequence.len(), 7);
        assert_eq!(sequence.total_duration_secs(), 90);
        assert_eq!(sequence.last_index(), 6);
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert_eq!(StageSequence::new(Vec::new()), Err(ProgressError::EmptyStages));
    }

    #[test]
    fn zero_duration_stage_is_rejected() {
        let stages = vec![
            Stage::new("a", "pa", 3, "search"),
            Stage::new("b", "pb", 0, "users"),
        ];
        assert_eq!(
            StageSequence::new(stages),
            Err(ProgressError::ZeroStageDuration {
                index: 1,
                name: "b".to_string(),
            })
        );
    }

    #[test]
    fn deserialization_validates() {
        let json = r#"[{"name":"a","platform_label":"p","nominal_duration_secs":0,"icon":"x"}]"#;
        assert!(serde_json::from_str::<StageSequence>(json).is_err());

        let json = r#"[{"name":"a","platform_label":"p","nominal_duration_secs":4,"icon":"x"}]"#;
        let sequence: StageSequence = serde_json::from_str(json).expect("valid sequence");
        assert_eq!(sequence.total_duration_secs(), 4);
        assert_eq!(sequence[0].icon.as_str(), "x");
    }
}
