//! Links embedded in a bookmark and their classification.

use serde::{Deserialize, Serialize};

use super::content::Content;

/// The classification tag assigned to a resolved URL.
///
/// Drives which resolver strategy applies. The set is closed: new kinds
/// extend the resolver dispatch table, not the call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    /// A repository on a code hosting site.
    CodeHost,
    /// A video page.
    Video,
    /// A long-form article hosted on the social platform.
    SocialArticle,
    /// A photo or video attachment page on the social platform.
    SocialMedia,
    /// An ordinary post on the social platform.
    SocialPost,
    /// A direct image URL.
    Image,
    /// Anything else; resolved as a generic web article.
    GenericArticle,
}

impl LinkKind {
    /// String form of the kind, matching its serialized tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CodeHost => "code-host",
            Self::Video => "video",
            Self::SocialArticle => "social-article",
            Self::SocialMedia => "social-media",
            Self::SocialPost => "social-post",
            Self::Image => "image",
            Self::GenericArticle => "generic-article",
        }
    }
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link found in a bookmark's body text.
///
/// Owned exclusively by the bookmark that contains it; created during
/// enrichment and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// The original (possibly shortened) form as it appeared in the text.
    pub original: String,
    /// The resolved destination URL.
    pub resolved: String,
    /// The classified kind of the resolved URL.
    pub kind: LinkKind,
    /// Resolved content, if any resolver produced some.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

impl Link {
    /// Creates a classified link with no content yet.
    #[must_use]
    pub fn new(original: impl Into<String>, resolved: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            original: original.into(),
            resolved: resolved.into(),
            kind,
            content: None,
        }
    }

    /// Returns the link with content attached.
    #[must_use]
    pub fn with_content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }
}
