//! Status line entries and their validated sequence

use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::slice;
use std::time::Duration;

use crate::error::{ProgressError, ProgressResult};
use crate::icon::Icon;

/// One message of the floating status line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub message: String,
    pub icon: Icon,
    /// How long the message stays up before the next one replaces it
    pub duration_ms: u64,
}

impl StatusEntry {
    #[must_use]
    pub fn new(message: impl Into<String>, icon: impl Into<Icon>, duration_ms: u64) -> Self {
        Self {
            message: message.into(),
            icon: icon.into(),
            duration_ms,
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Ordered, non-empty list of status entries with positive durations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StatusEntry>", into = "Vec<StatusEntry>")]
pub struct StatusSequence {
    entries: Vec<StatusEntry>,
}

impl StatusSequence {
    /// Validate and freeze an entry list
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::EmptyStatusEntries`] for an empty list and
    /// [`ProgressError::ZeroStatusDuration`] for the first zero-length entry.
    pub fn new(entries: Vec<StatusEntry>) -> ProgressResult<Self> {
        if entries.is_empty() {
            return Err(ProgressError::EmptyStatusEntries);
        }

        if let Some((index, entry)) = entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.duration_ms == 0)
        {
            return Err(ProgressError::ZeroStatusDuration {
                index,
                message: entry.message.clone(),
            });
        }

        Ok(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StatusEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, StatusEntry> {
        self.entries.iter()
    }

    /// Time until the last entry is reached and held
    #[must_use]
    pub fn playback_duration(&self) -> Duration {
        self.entries[..self.entries.len() - 1]
            .iter()
            .map(StatusEntry::duration)
            .sum()
    }
}

impl Index<usize> for StatusSequence {
    type Output = StatusEntry;

    fn index(&self, index: usize) -> &StatusEntry {
        &self.entries[index]
    }
}

impl TryFrom<Vec<StatusEntry>> for StatusSequence {
    type Error = ProgressError;

    fn try_from(entries: Vec<StatusEntry>) -> ProgressResult<Self> {
        Self::new(entries)
    }
}

impl From<StatusSequence> for Vec<StatusEntry> {
    fn from(sequence: StatusSequence) -> Self {
        sequence.entries
    }
}

impl Default for StatusSequence {
    fn default() -> Self {
        Self {
            entries: default_status_entries(),
        }
    }
}

/// Messages of the floating status line during a footprint search
#[must_use]
pub fn default_status_entries() -> Vec<StatusEntry> {
    vec![
        StatusEntry::new("Initializing optimized search...", "search", 3000),
        StatusEntry::new("Analyzing social media via Google...", "users", 6000),
        StatusEntry::new("Checking Instagram mentions...", "users", 4000),
        StatusEntry::new("Searching Twitter/X profiles...", "users", 4000),
        StatusEntry::new("Analyzing Facebook content...", "users", 4000),
        StatusEntry::new("Searching professional networks...", "briefcase", 5000),
        StatusEntry::new("Checking LinkedIn profiles...", "briefcase", 4000),
        StatusEntry::new("Scanning GitHub repositories...", "briefcase", 3000),
        StatusEntry::new("Searching academic platforms...", "academic-cap", 4000),
        StatusEntry::new("Analyzing web content...", "globe", 6000),
        StatusEntry::new("Checking news publications...", "newspaper", 3000),
        StatusEntry::new("Processing and ranking results...", "chart-bar", 3000),
        StatusEntry::new("Finalizing optimized report...", "chart-bar", 2000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sequence_is_valid() {
        let sequence = StatusSequence::new(default_status_entries()).expect("defaults are valid");
        assert_eq!(sequence.len(), 13);
        assert_eq!(sequence, StatusSequence::default());
        // every entry but the held last one
        assert_eq!(sequence.playback_duration(), Duration::from_millis(49_000));
    }

    #[test]
    fn invalid_sequences_are_rejected() {
        assert_eq!(
            StatusSequence::new(Vec::new()),
            Err(ProgressError::EmptyStatusEntries)
        );
        assert_eq!(
            StatusSequence::new(vec![StatusEntry::new("A", "x", 0)]),
            Err(ProgressError::ZeroStatusDuration {
                index: 0,
                message: "A".to_string(),
            })
        );
    }

    #[test]
    fn deserialization_validates() {
        let json = r#"[{"message":"A","icon":"x","duration_ms":1000}]"#;
        let sequence: StatusSequence = serde_json::from_str(json).expect("valid sequence");
        assert_eq!(sequence[0].duration(), Duration::from_secs(1));

        assert!(serde_json::from_str::<StatusSequence>("[]").is_err());
    }
}
