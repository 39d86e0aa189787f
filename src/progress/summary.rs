//! Result summaries pushed by the host and their merged form

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary object supplied by the host whenever real data is available
///
/// Every field is optional; an update only touches what it carries. Both
/// snake_case and the camelCase keys of the web frontend are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsSummary {
    /// Authoritative total number of results
    #[serde(alias = "totalResults")]
    pub total_results: Option<u64>,
    /// Partial result counts keyed by stage or platform
    #[serde(alias = "stageResults")]
    pub stage_results: Option<BTreeMap<String, u64>>,
    /// The real search has finished
    #[serde(alias = "searchComplete")]
    pub search_complete: Option<bool>,
}

impl ResultsSummary {
    /// A summary carrying only a result total
    #[must_use]
    pub fn total(total_results: u64) -> Self {
        Self {
            total_results: Some(total_results),
            ..Self::default()
        }
    }

    /// A completion summary with the final result total
    #[must_use]
    pub fn completed(total_results: u64) -> Self {
        Self {
            total_results: Some(total_results),
            search_complete: Some(true),
            ..Self::default()
        }
    }

    /// Add one partial per-stage count
    #[must_use]
    pub fn with_stage_result(mut self, key: impl Into<String>, count: u64) -> Self {
        self.stage_results
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), count);
        self
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.search_complete == Some(true)
    }
}

/// Accumulated view of every summary received during one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExternalSummary {
    pub total_results: Option<u64>,
    pub stage_results: BTreeMap<String, u64>,
    pub search_complete: bool,
}

impl ExternalSummary {
    /// Merge an update: totals replace, stage results union with later values
    /// winning, completion latches
    pub fn merge(&mut self, update: &ResultsSummary) {
        if let Some(total) = update.total_results {
            self.total_results = Some(total);
        }
        if let Some(stage_results) = &update.stage_results {
            self.stage_results
                .extend(stage_results.iter().map(|(k, v)| (k.clone(), *v)));
        }
        if update.is_complete() {
            self.search_complete = true;
        }
    }
}
