//! Resolved content attached to a link.

use serde::{Deserialize, Serialize};

/// Content resolved for a link, keyed by provenance.
///
/// Exactly one variant is populated per link. Absence of content is
/// modeled as `Option<Content>` on the link itself, not a variant here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Content {
    /// Repository metadata from a code hosting API.
    CodeHost {
        /// Repository name.
        name: String,
        /// Full `owner/repo` name.
        full_name: String,
        /// Repository description.
        description: Option<String>,
        /// Star count.
        stars: u64,
        /// Primary language.
        language: Option<String>,
        /// Repository topics.
        topics: Vec<String>,
        /// README excerpt, truncated to the configured budget.
        readme_excerpt: Option<String>,
    },
    /// Full text of a platform-native article.
    SocialArticle {
        /// Article title.
        title: String,
        /// Article body text.
        body: String,
    },
    /// A quoted post resolved from a post link.
    QuotedPost {
        /// Identifier of the quoted post.
        id: String,
        /// Author handle of the quoted post.
        author: String,
        /// Body text of the quoted post.
        body: String,
        /// Canonical URL of the quoted post.
        url: String,
    },
    /// Clean text extracted by the content-extraction service.
    ExtractedArticle {
        /// Article title.
        title: Option<String>,
        /// Meta description.
        description: Option<String>,
        /// Extracted body text.
        body: String,
    },
    /// Raw page text from the direct-fetch fallback.
    RawFetch {
        /// Page text, capped at the configured character budget.
        body: String,
        /// Whether the paywall heuristic flagged this page.
        paywall_suspected: bool,
    },
    /// Content could not be resolved.
    Unavailable {
        /// Human-readable reason.
        reason: String,
    },
}

impl Content {
    /// Creates an `Unavailable` marker with the given reason.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Whether this content is the `Unavailable` marker.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let content = Content::SocialArticle {
            title: "On pipelines".to_string(),
            body: "text".to_string(),
        };
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "social-article");
        assert_eq!(json["title"], "On pipelines");
    }

    #[test]
    fn test_raw_fetch_field_names() {
        let content = Content::RawFetch {
            body: "x".to_string(),
            paywall_suspected: true,
        };
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["paywallSuspected"], true);
    }

    #[test]
    fn test_unavailable_helper() {
        let content = Content::unavailable("lookup failed");
        assert!(content.is_unavailable());

        let other = Content::RawFetch {
            body: String::new(),
            paywall_suspected: false,
        };
        assert!(!other.is_unavailable());
    }

    #[test]
    fn test_code_host_roundtrip() {
        let content = Content::CodeHost {
            name: "markflow".to_string(),
            full_name: "acme/markflow".to_string(),
            description: Some("pipeline".to_string()),
            stars: 42,
            language: Some("Rust".to_string()),
            topics: vec!["bookmarks".to_string()],
            readme_excerpt: None,
        };
        let json = serde_json::to_string(&content).unwrap();
        let restored: Content = serde_json::from_str(&json).unwrap();
        assert_eq!(content, restored);
    }
}
