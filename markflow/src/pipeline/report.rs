//! Run options, per-item failure records, and the run report.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::dedup::FilterPolicy;
use crate::services::FetchOptions;
use crate::util::iso_timestamp;

/// Enrichment stages a bookmark moves through.
///
/// Transitions are sequential and unconditional except content resolution,
/// which fans out over each link independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStage {
    /// Raw bookmark read from the source.
    Fetched,
    /// Embedded links expanded to their destinations.
    LinksExpanded,
    /// Links classified into kinds.
    LinksClassified,
    /// Per-link content resolution finished.
    ContentResolved,
    /// Reply/quote context attached.
    ContextAttached,
    /// Record assembled.
    Finalized,
}

impl ItemStage {
    /// String form of the stage, matching its serialized tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fetched => "fetched",
            Self::LinksExpanded => "links-expanded",
            Self::LinksClassified => "links-classified",
            Self::ContentResolved => "content-resolved",
            Self::ContextAttached => "context-attached",
            Self::Finalized => "finalized",
        }
    }
}

impl std::fmt::Display for ItemStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of an item-local failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Identifier of the affected bookmark.
    pub id: String,
    /// Stage the failure occurred in.
    pub stage: ItemStage,
    /// Error message.
    pub error: String,
    /// When the failure was recorded.
    pub timestamp: String,
}

impl FailureRecord {
    /// Creates a new failure record stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<String>, stage: ItemStage, error: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stage,
            error: error.into(),
            timestamp: iso_timestamp(),
        }
    }
}

/// Options for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Source fetch options.
    pub fetch: FetchOptions,
    /// Reprocess the batch regardless of prior exclusion sets.
    pub force: bool,
    /// Process exactly these identifiers, ignoring exclusion sets.
    pub only_ids: Option<HashSet<String>>,
}

impl RunOptions {
    /// Creates default run options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source fetch options.
    #[must_use]
    pub fn with_fetch(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    /// Enables force mode.
    #[must_use]
    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }

    /// Restricts the run to an explicit identifier list.
    #[must_use]
    pub fn with_only_ids(mut self, ids: impl IntoIterator<Item = String>) -> Self {
        self.only_ids = Some(ids.into_iter().collect());
        self
    }

    /// The dedup policy selected by these options.
    ///
    /// Precedence: forced mode over the explicit allow-list over standard
    /// exclusion.
    #[must_use]
    pub fn policy(&self) -> FilterPolicy {
        if self.force {
            FilterPolicy::Force
        } else if let Some(ref ids) = self.only_ids {
            FilterPolicy::AllowList(ids.clone())
        } else {
            FilterPolicy::Standard
        }
    }
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Run identifier.
    pub run_id: String,
    /// When the run started.
    pub started_at: String,
    /// When the run finished.
    pub finished_at: String,
    /// Number of bookmarks fetched from the source.
    pub fetched: usize,
    /// Identifiers skipped by deduplication.
    pub skipped: Vec<String>,
    /// Number of records enriched and merged.
    pub enriched: usize,
    /// Item-local failures. These do not change the run's outcome.
    pub failures: Vec<FailureRecord>,
    /// Queue length after the merge.
    pub queue_len: usize,
}

impl RunReport {
    /// Returns true if any item-local failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Identifiers of items that recorded failures, deduplicated, in order.
    #[must_use]
    pub fn failed_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.failures
            .iter()
            .filter(|f| seen.insert(f.id.clone()))
            .map(|f| f.id.clone())
            .collect()
    }

    /// Converts to dictionary.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut dict = HashMap::new();
        dict.insert("run_id".to_string(), serde_json::json!(self.run_id));
        dict.insert("started_at".to_string(), serde_json::json!(self.started_at));
        dict.insert("finished_at".to_string(), serde_json::json!(self.finished_at));
        dict.insert("fetched".to_string(), serde_json::json!(self.fetched));
        dict.insert("skipped".to_string(), serde_json::json!(self.skipped.len()));
        dict.insert("enriched".to_string(), serde_json::json!(self.enriched));
        dict.insert("failures".to_string(), serde_json::json!(self.failures.len()));
        dict.insert("failed_ids".to_string(), serde_json::json!(self.failed_ids()));
        dict.insert("queue_len".to_string(), serde_json::json!(self.queue_len));
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_as_str_matches_serde_tag() {
        let json = serde_json::to_string(&ItemStage::LinksExpanded).unwrap();
        assert_eq!(json, "\"links-expanded\"");
    }

    #[test]
    fn test_policy_precedence() {
        let forced = RunOptions::new()
            .forced()
            .with_only_ids(["1".to_string()]);
        assert!(matches!(forced.policy(), FilterPolicy::Force));

        let allow = RunOptions::new().with_only_ids(["1".to_string()]);
        assert!(matches!(allow.policy(), FilterPolicy::AllowList(_)));

        let standard = RunOptions::new();
        assert!(matches!(standard.policy(), FilterPolicy::Standard));
    }

    #[test]
    fn test_failed_ids_deduplicates() {
        let report = RunReport {
            run_id: "r".to_string(),
            started_at: String::new(),
            finished_at: String::new(),
            fetched: 3,
            skipped: Vec::new(),
            enriched: 2,
            failures: vec![
                FailureRecord::new("9", ItemStage::ContentResolved, "a"),
                FailureRecord::new("9", ItemStage::ContextAttached, "b"),
                FailureRecord::new("4", ItemStage::ContentResolved, "c"),
            ],
            queue_len: 2,
        };

        assert!(report.has_failures());
        assert_eq!(report.failed_ids(), vec!["9", "4"]);
        assert_eq!(report.to_dict().get("failures"), Some(&serde_json::json!(3)));
    }
}
