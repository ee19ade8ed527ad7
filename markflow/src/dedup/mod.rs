//! Batch deduplication against prior runs.

mod archive;

pub use archive::{ArchiveScan, KnownIdentifiers, NoKnownIdentifiers};

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::Bookmark;

/// How the incoming batch is filtered.
///
/// Precedence: `Force` over `AllowList` over `Standard`. Callers select
/// one; the engine never combines them.
#[derive(Debug, Clone, Default)]
pub enum FilterPolicy {
    /// Exclude identifiers seen in the archive or the pending queue.
    #[default]
    Standard,
    /// Keep exactly the listed identifiers, ignoring both exclusion sources.
    AllowList(HashSet<String>),
    /// Keep everything; bypasses all exclusion sources.
    Force,
}

/// Outcome of a dedup pass.
#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    /// Bookmarks to process, in original batch order.
    pub kept: Vec<Bookmark>,
    /// Identifiers that were filtered out, in original batch order.
    pub skipped: Vec<String>,
}

/// Filters incoming batches against identifiers from prior runs.
pub struct DedupEngine {
    archive: Arc<dyn KnownIdentifiers>,
}

impl DedupEngine {
    /// Creates an engine over an archive identifier source.
    #[must_use]
    pub fn new(archive: Arc<dyn KnownIdentifiers>) -> Self {
        Self { archive }
    }

    /// The exclusion set for a standard pass: archive ids unioned with the
    /// pending queue's ids.
    #[must_use]
    pub fn exclusion_set(&self, pending_ids: &HashSet<String>) -> HashSet<String> {
        let mut excluded = self.archive.known_identifiers();
        excluded.extend(pending_ids.iter().cloned());
        excluded
    }

    /// Filters a batch under the selected policy.
    ///
    /// A batch item is kept iff its identifier survives the policy:
    /// everything under `Force`, exactly the listed ids under `AllowList`,
    /// and ids absent from the exclusion set under `Standard`.
    #[must_use]
    pub fn filter(
        &self,
        batch: Vec<Bookmark>,
        pending_ids: &HashSet<String>,
        policy: &FilterPolicy,
    ) -> DedupOutcome {
        match policy {
            FilterPolicy::Force => DedupOutcome {
                kept: batch,
                skipped: Vec::new(),
            },
            FilterPolicy::AllowList(allowed) => {
                let mut outcome = DedupOutcome::default();
                for bookmark in batch {
                    if allowed.contains(&bookmark.id) {
                        outcome.kept.push(bookmark);
                    } else {
                        outcome.skipped.push(bookmark.id);
                    }
                }
                outcome
            }
            FilterPolicy::Standard => {
                let excluded = self.exclusion_set(pending_ids);
                let mut outcome = DedupOutcome::default();
                for bookmark in batch {
                    if excluded.contains(&bookmark.id) {
                        outcome.skipped.push(bookmark.id);
                    } else {
                        outcome.kept.push(bookmark);
                    }
                }
                outcome
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedIds(HashSet<String>);

    impl KnownIdentifiers for FixedIds {
        fn known_identifiers(&self) -> HashSet<String> {
            self.0.clone()
        }
    }

    fn engine_with(ids: &[&str]) -> DedupEngine {
        DedupEngine::new(Arc::new(FixedIds(
            ids.iter().map(|s| (*s).to_string()).collect(),
        )))
    }

    fn batch(ids: &[&str]) -> Vec<Bookmark> {
        ids.iter().map(|id| Bookmark::new(*id, "a", "")).collect()
    }

    #[test]
    fn test_standard_excludes_archive_ids() {
        // Archive contains x.com/alice/status/555, pending queue empty,
        // batch contains 555: 555 must be excluded.
        let engine = engine_with(&["555"]);
        let outcome = engine.filter(batch(&["555", "556"]), &HashSet::new(), &FilterPolicy::Standard);

        assert_eq!(outcome.skipped, vec!["555"]);
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.kept[0].id, "556");
    }

    #[test]
    fn test_standard_excludes_pending_ids() {
        let engine = engine_with(&[]);
        let pending: HashSet<String> = ["9".to_string()].into();
        let outcome = engine.filter(batch(&["9", "10"]), &pending, &FilterPolicy::Standard);

        assert_eq!(outcome.skipped, vec!["9"]);
        assert_eq!(outcome.kept[0].id, "10");
    }

    #[test]
    fn test_force_bypasses_everything() {
        let engine = engine_with(&["1", "2"]);
        let pending: HashSet<String> = ["3".to_string()].into();
        let outcome = engine.filter(batch(&["1", "2", "3"]), &pending, &FilterPolicy::Force);

        assert_eq!(outcome.kept.len(), 3);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_allow_list_ignores_exclusion_sources() {
        let engine = engine_with(&["1"]);
        let pending: HashSet<String> = ["2".to_string()].into();
        let allowed: HashSet<String> = ["1".to_string(), "2".to_string()].into();

        let outcome = engine.filter(
            batch(&["1", "2", "3"]),
            &pending,
            &FilterPolicy::AllowList(allowed),
        );

        // Excluded ids come back when explicitly allowed; unlisted ids drop.
        assert_eq!(outcome.kept.len(), 2);
        assert_eq!(outcome.skipped, vec!["3"]);
    }

    #[test]
    fn test_filter_preserves_batch_order() {
        let engine = engine_with(&["b"]);
        let outcome = engine.filter(batch(&["c", "b", "a"]), &HashSet::new(), &FilterPolicy::Standard);
        let kept_ids: Vec<_> = outcome.kept.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(kept_ids, vec!["c", "a"]);
    }
}
