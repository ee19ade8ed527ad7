//! Identifier recovery from a previously-written archive artifact.

use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Source of identifiers already handled in prior runs.
///
/// Narrow seam: the dedup engine only needs a set of ids, so the scanning
/// strategy can be swapped for a structured index without touching it.
pub trait KnownIdentifiers: Send + Sync {
    /// Returns the identifiers known to this source.
    ///
    /// Missing or unreadable backing data yields an empty set, never an
    /// error; the index is recomputed on every call and never cached.
    fn known_identifiers(&self) -> HashSet<String>;
}

fn post_url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"(?:x|twitter)\.com/[A-Za-z0-9_]+/status/(\d+)").unwrap()
    })
}

/// Scans an archive text document for canonical post-URL substrings.
///
/// The archive is whatever the downstream note-writer produced; it is
/// scanned as text, not parsed as structured data.
#[derive(Debug, Clone)]
pub struct ArchiveScan {
    path: PathBuf,
}

impl ArchiveScan {
    /// Creates a scanner over the archive document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Extracts identifiers from archive text.
    #[must_use]
    pub fn scan_text(text: &str) -> HashSet<String> {
        post_url_pattern()
            .captures_iter(text)
            .map(|c| c[1].to_string())
            .collect()
    }
}

impl KnownIdentifiers for ArchiveScan {
    fn known_identifiers(&self) -> HashSet<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let ids = Self::scan_text(&text);
                debug!(path = %self.path.display(), count = ids.len(), "scanned archive");
                ids
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "archive unreadable, treating as empty");
                HashSet::new()
            }
        }
    }
}

/// An identifier source with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKnownIdentifiers;

impl KnownIdentifiers for NoKnownIdentifiers {
    fn known_identifiers(&self) -> HashSet<String> {
        HashSet::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_scan_text_extracts_ids() {
        let text = "saved https://x.com/alice/status/555 and\n\
                    [older](https://twitter.com/bob/status/777?s=20)";
        let ids = ArchiveScan::scan_text(text);
        assert!(ids.contains("555"));
        assert!(ids.contains("777"));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_scan_text_ignores_non_status_urls() {
        let ids = ArchiveScan::scan_text("https://x.com/alice and https://example.com/status/1");
        assert!(ids.is_empty());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let scan = ArchiveScan::new("/nonexistent/archive.md");
        assert!(scan.known_identifiers().is_empty());
    }

    #[test]
    fn test_scan_reads_file_each_call() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "https://x.com/a/status/1").unwrap();
        file.flush().unwrap();

        let scan = ArchiveScan::new(file.path());
        assert_eq!(scan.known_identifiers().len(), 1);

        writeln!(file, "https://x.com/a/status/2").unwrap();
        file.flush().unwrap();
        assert_eq!(scan.known_identifiers().len(), 2);
    }
}
