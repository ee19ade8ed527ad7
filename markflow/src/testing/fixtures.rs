//! Fixture builders for pipeline tests.

use chrono::{TimeZone, Utc};

use crate::models::Bookmark;
use crate::services::RawPost;

/// A minimal bookmark with the given id and body text.
#[must_use]
pub fn bookmark(id: &str, text: &str) -> Bookmark {
    Bookmark::new(id, "alice", text)
}

/// A bookmark with a creation time at `secs` past the epoch.
#[must_use]
pub fn bookmark_at(id: &str, text: &str, secs: i64) -> Bookmark {
    let mut b = bookmark(id, text);
    b.created_at = Utc.timestamp_opt(secs, 0).single();
    b
}

/// A raw post as returned by the read service.
#[must_use]
pub fn raw_post(id: &str, author_handle: &str, text: &str) -> RawPost {
    RawPost {
        id: id.to_string(),
        author_handle: author_handle.to_string(),
        author_name: String::new(),
        text: text.to_string(),
        created_at: None,
        url: Some(format!("https://x.com/{author_handle}/status/{id}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_at_sets_timestamp() {
        let b = bookmark_at("1", "hi", 1000);
        assert!(b.created_at.is_some());
    }

    #[test]
    fn test_raw_post_canonical_url() {
        let p = raw_post("9", "bob", "text");
        assert_eq!(p.url.as_deref(), Some("https://x.com/bob/status/9"));
    }
}
