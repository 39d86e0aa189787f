//! Request and response types of the footprint search backend

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::errors::{SearchError, SearchResult};

/// Score from which a result counts as high confidence
pub const HIGH_CONFIDENCE_SCORE: f64 = 0.7;

/// What to search for; at least one of `name` and `photo` is required
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub name: Option<String>,
    pub photo: Option<PathBuf>,
    pub use_enhanced: bool,
}

impl SearchRequest {
    /// Build a request, trimming the name and rejecting empty input
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingInput`] when both inputs are absent.
    pub fn new(name: Option<String>, photo: Option<PathBuf>) -> SearchResult<Self> {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        if name.is_none() && photo.is_none() {
            return Err(SearchError::MissingInput);
        }

        Ok(Self {
            name,
            photo,
            use_enhanced: true,
        })
    }
}

/// One match reported by the backend
///
/// Only the fields the tool reads are typed; everything else is kept in
/// `extra` so `--json` output loses nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_working: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_content: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FootprintResult {
    /// Target of the result, preferring `url` over `link`
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.url
            .as_deref()
            .or(self.link.as_deref())
            .filter(|href| !href.is_empty() && *href != "#")
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.verified_working == Some(true) || self.verified_content == Some(true)
    }

    #[must_use]
    pub fn is_high_confidence(&self) -> bool {
        self.score.unwrap_or(0.0) >= HIGH_CONFIDENCE_SCORE
    }

    fn search_type_contains(&self, needle: &str) -> bool {
        self.search_type
            .as_deref()
            .is_some_and(|kind| kind.contains(needle))
    }
}

/// Body of a successful search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<FootprintResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
}

impl SearchResponse {
    /// Parse a response body, requiring a `results` array
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidFormat`] for a body that is not JSON,
    /// lacks a `results` array, or whose entries are not objects.
    pub fn from_body(body: &str) -> SearchResult<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| SearchError::InvalidFormat(format!("response is not JSON: {e}")))?;

        if !value.get("results").is_some_and(Value::is_array) {
            return Err(SearchError::InvalidFormat(
                "response has no results array".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| SearchError::InvalidFormat(format!("unexpected result shape: {e}")))
    }

    /// Reported total, falling back to the number of results returned
    ///
    /// A reported total of zero also falls back to the array length.
    #[must_use]
    pub fn total(&self) -> u64 {
        match self.total_results {
            Some(total) if total > 0 => total,
            _ => self.results.len() as u64,
        }
    }
}

/// Aggregate figures over a result list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultStats {
    pub total: usize,
    /// Result count per non-empty platform name
    pub platforms: BTreeMap<String, usize>,
    pub verified: usize,
    pub high_confidence: usize,
    pub social: usize,
    pub professional: usize,
    pub academic: usize,
}

impl ResultStats {
    #[must_use]
    pub fn from_results(results: &[FootprintResult]) -> Self {
        let mut stats = Self {
            total: results.len(),
            ..Self::default()
        };

        for result in results {
            if let Some(platform) = result.platform.as_deref().filter(|p| !p.is_empty()) {
                *stats.platforms.entry(platform.to_string()).or_insert(0) += 1;
            }
            stats.verified += usize::from(result.is_verified());
            stats.high_confidence += usize::from(result.is_high_confidence());
            stats.social += usize::from(result.search_type_contains("social"));
            stats.professional += usize::from(result.search_type_contains("professional"));
            stats.academic += usize::from(result.search_type_contains("academic"));
        }
        stats
    }

    #[must_use]
    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }
}
