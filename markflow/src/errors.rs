//! Error types for the markflow pipeline.
//!
//! The taxonomy distinguishes failures that abort a whole run (the upstream
//! source fetch) from item-local failures that are recorded and skipped:
//! content resolution, context lookups, and identifier validation. Link
//! expansion never errors at all (it degrades to the original URL), and
//! persistence reads never surface here either; corrupt or missing files
//! fall back to empty defaults in the stores.

use thiserror::Error;

/// The main error type for markflow operations.
#[derive(Debug, Error)]
pub enum MarkflowError {
    /// The upstream bookmark fetch failed. Fatal to the run; no partial
    /// state is written.
    #[error("Source fetch failed: {0}")]
    SourceFetch(String),

    /// Content resolution failed for a single link.
    #[error("Resolution failed ({kind}): {reason}")]
    Resolution {
        /// The link kind being resolved.
        kind: String,
        /// Why the resolution failed.
        reason: String,
    },

    /// An identifier failed validation before reaching an external service.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// An external call exceeded its deadline.
    #[error("Timeout after {seconds}s: {what}")]
    Timeout {
        /// Description of the operation that timed out.
        what: String,
        /// The deadline in seconds.
        seconds: f64,
    },

    /// An HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarkflowError {
    /// Creates a resolution error for a link kind.
    #[must_use]
    pub fn resolution(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(what: impl Into<String>, seconds: f64) -> Self {
        Self::Timeout {
            what: what.into(),
            seconds,
        }
    }

    /// Whether this failure is local to one item.
    ///
    /// Item-local failures are recorded in the run report and the batch
    /// continues; anything else aborts the run.
    #[must_use]
    pub fn is_item_local(&self) -> bool {
        !matches!(self, Self::SourceFetch(_))
    }
}
