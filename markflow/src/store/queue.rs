//! The pending queue store: merge, sort, persist.

use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::errors::MarkflowError;
use crate::models::{EnrichedRecord, PendingQueue};
use crate::util::iso_timestamp;

/// Merges newly enriched records into an existing queue.
///
/// Records whose identifier is already queued are dropped; the combined
/// sequence is stable-sorted by creation time ascending, so records
/// without a timestamp sort to the front (epoch 0) and ties keep their
/// original relative order.
#[must_use]
pub fn merge_records(existing: PendingQueue, new_records: Vec<EnrichedRecord>) -> PendingQueue {
    let mut seen: HashSet<String> = existing.ids();
    let mut bookmarks = existing.bookmarks;

    for record in new_records {
        if seen.insert(record.id.clone()) {
            bookmarks.push(record);
        }
    }

    bookmarks.sort_by_key(EnrichedRecord::sort_timestamp);

    PendingQueue {
        generated_at: iso_timestamp(),
        count: bookmarks.len(),
        bookmarks,
    }
}

/// Durable store for the pending queue document.
#[derive(Debug, Clone)]
pub struct PendingQueueStore {
    path: PathBuf,
}

impl PendingQueueStore {
    /// Creates a store over the queue document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the persisted queue.
    ///
    /// A missing or corrupt file is treated as an empty queue, never an
    /// error; the pipeline is self-healing across runs.
    #[must_use]
    pub fn load(&self) -> PendingQueue {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "no pending queue, starting empty");
                return PendingQueue::empty();
            }
        };
        match serde_json::from_str(&text) {
            Ok(queue) => queue,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "corrupt pending queue, starting empty");
                PendingQueue::empty()
            }
        }
    }

    /// Persists the queue document atomically.
    pub fn save(&self, queue: &PendingQueue) -> Result<(), MarkflowError> {
        let contents = serde_json::to_string_pretty(queue)?;
        super::write_atomic(&self.path, &contents)?;
        Ok(())
    }

    /// Merges new records into the persisted queue and writes it back.
    ///
    /// Returns the merged queue.
    pub fn merge_and_save(
        &self,
        new_records: Vec<EnrichedRecord>,
    ) -> Result<PendingQueue, MarkflowError> {
        let merged = merge_records(self.load(), new_records);
        self.save(&merged)?;
        Ok(merged)
    }
}
