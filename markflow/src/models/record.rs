//! Enriched records and the persisted pipeline documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::bookmark::{Bookmark, MediaAttachment};
use super::link::Link;

/// A reply or quote parent attached to an enriched record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextPost {
    /// Identifier of the context post.
    pub id: String,
    /// Author handle of the context post.
    pub author: String,
    /// Body text of the context post.
    pub text: String,
    /// Canonical URL, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A bookmark after enrichment: resolved links, context, tags, media.
///
/// The identifier always equals the source bookmark's identifier;
/// uniqueness across the queue is enforced at merge time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    /// Identifier, equal to the source bookmark's.
    pub id: String,
    /// Author handle.
    pub author_handle: String,
    /// Author display name.
    #[serde(default)]
    pub author_name: String,
    /// Body text.
    #[serde(default)]
    pub text: String,
    /// Creation time of the source post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Resolved links.
    #[serde(default)]
    pub links: Vec<Link>,
    /// Reply parent, when the bookmark was a reply and the lookup succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_context: Option<ContextPost>,
    /// Quoted post, native attachment preferred over resolved links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_context: Option<ContextPost>,
    /// Media attachments; populated only when the media gate is enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaAttachment>,
    /// Tags derived from upstream provenance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Human-readable creation date.
    #[serde(default)]
    pub display_date: String,
}

impl EnrichedRecord {
    /// Starts an enriched record from a raw bookmark.
    ///
    /// Links, context, tags, and media are attached by the pipeline stages.
    #[must_use]
    pub fn from_bookmark(bookmark: &Bookmark) -> Self {
        Self {
            id: bookmark.id.clone(),
            author_handle: bookmark.author_handle.clone(),
            author_name: bookmark.author_name.clone(),
            text: bookmark.text.clone(),
            created_at: bookmark.created_at,
            links: Vec::new(),
            reply_context: None,
            quote_context: None,
            media: Vec::new(),
            tags: Vec::new(),
            display_date: crate::util::display_date(bookmark.created_at.as_ref()),
        }
    }

    /// Sort key used by the queue merge: creation time, epoch 0 when absent.
    #[must_use]
    pub fn sort_timestamp(&self) -> DateTime<Utc> {
        self.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// The durable, identifier-deduplicated, time-ordered work queue.
///
/// Read at pipeline start, rewritten whole at pipeline end. Survives across
/// process runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingQueue {
    /// When this document was generated.
    #[serde(rename = "generatedAt", default)]
    pub generated_at: String,
    /// Number of records in the queue.
    #[serde(default)]
    pub count: usize,
    /// The ordered records.
    #[serde(default)]
    pub bookmarks: Vec<EnrichedRecord>,
}

impl PendingQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Identifiers currently present in the queue.
    #[must_use]
    pub fn ids(&self) -> HashSet<String> {
        self.bookmarks.iter().map(|b| b.id.clone()).collect()
    }

    /// Whether an identifier is already queued.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.bookmarks.iter().any(|b| b.id == id)
    }
}

/// Last-check/last-processed markers persisted across runs.
///
/// Missing or corrupt state files yield this zero-value default. Only
/// `last_check` is updated by the pipeline; the other fields are reserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    /// Identifier of the last fully processed bookmark.
    #[serde(default)]
    pub last_processed_id: Option<String>,
    /// When the source was last checked.
    #[serde(default)]
    pub last_check: Option<String>,
    /// When a processing run last completed.
    #[serde(default)]
    pub last_processing_run: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_bookmark_carries_identity() {
        let created = Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap();
        let bookmark = Bookmark::new("55", "alice", "text")
            .with_author_name("Alice")
            .with_created_at(created);

        let record = EnrichedRecord::from_bookmark(&bookmark);
        assert_eq!(record.id, bookmark.id);
        assert_eq!(record.display_date, "2024-02-02");
        assert!(record.links.is_empty());
        assert!(record.media.is_empty());
    }

    #[test]
    fn test_sort_timestamp_missing_is_epoch() {
        let record = EnrichedRecord::from_bookmark(&Bookmark::new("1", "a", ""));
        assert_eq!(record.sort_timestamp(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_queue_document_field_names() {
        let queue = PendingQueue {
            generated_at: "2024-01-01T00:00:00.000000+00:00".to_string(),
            count: 0,
            bookmarks: Vec::new(),
        };
        let json = serde_json::to_value(&queue).unwrap();
        assert!(json.get("generatedAt").is_some());
        assert!(json.get("count").is_some());
        assert!(json.get("bookmarks").is_some());
    }

    #[test]
    fn test_queue_ids() {
        let mut queue = PendingQueue::empty();
        queue
            .bookmarks
            .push(EnrichedRecord::from_bookmark(&Bookmark::new("1", "a", "")));
        queue
            .bookmarks
            .push(EnrichedRecord::from_bookmark(&Bookmark::new("2", "b", "")));

        assert!(queue.contains("1"));
        assert!(!queue.contains("3"));
        assert_eq!(queue.ids().len(), 2);
    }

    #[test]
    fn test_run_state_default_is_all_none() {
        let state = RunState::default();
        assert!(state.last_processed_id.is_none());
        assert!(state.last_check.is_none());
        assert!(state.last_processing_run.is_none());
    }

    #[test]
    fn test_run_state_snake_case_keys() {
        let state = RunState {
            last_check: Some("2024-01-01T00:00:00+00:00".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("last_check").is_some());
        assert!(json.get("last_processed_id").is_some());
    }
}
