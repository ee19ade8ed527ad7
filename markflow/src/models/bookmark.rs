//! Raw bookmark records as produced by the upstream source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a media attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    /// A still image.
    Photo,
    /// A video clip.
    Video,
    /// An animated GIF.
    AnimatedGif,
}

/// A media attachment on a raw bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAttachment {
    /// Direct URL of the media asset.
    pub url: String,
    /// Kind of the attachment.
    pub kind: MediaKind,
    /// Alt text if the author provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// A quoted post natively attached to a bookmark by the source.
///
/// Takes precedence over any quote-like link resolved from the body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotedSnapshot {
    /// Identifier of the quoted post.
    pub id: String,
    /// Author handle of the quoted post.
    pub author_handle: String,
    /// Body text of the quoted post.
    pub text: String,
}

/// A saved social-media post record to be enriched.
///
/// Identifiers are string-typed to avoid precision loss on 64-bit post ids.
/// Immutable once read from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// Post identifier.
    pub id: String,
    /// Author handle (without the leading `@`).
    pub author_handle: String,
    /// Author display name.
    #[serde(default)]
    pub author_name: String,
    /// Body text, including any embedded links.
    #[serde(default)]
    pub text: String,
    /// Creation time of the post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Identifier of the post this one replies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    /// Identifier of the post this one quotes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_id: Option<String>,
    /// Natively-attached quoted post, if the source provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_post: Option<QuotedSnapshot>,
    /// Media attachments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaAttachment>,
    /// Provenance tag, e.g. the source folder the bookmark came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_folder: Option<String>,
}

impl Bookmark {
    /// Creates a new bookmark with the required fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        author_handle: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author_handle: author_handle.into(),
            author_name: String::new(),
            text: text.into(),
            created_at: None,
            reply_to_id: None,
            quoted_id: None,
            quoted_post: None,
            media: Vec::new(),
            source_folder: None,
        }
    }

    /// Sets the author display name.
    #[must_use]
    pub fn with_author_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = name.into();
        self
    }

    /// Sets the creation time.
    #[must_use]
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Sets the reply parent identifier.
    #[must_use]
    pub fn with_reply_to(mut self, id: impl Into<String>) -> Self {
        self.reply_to_id = Some(id.into());
        self
    }

    /// Attaches a natively-quoted post.
    #[must_use]
    pub fn with_quoted_post(mut self, quoted: QuotedSnapshot) -> Self {
        self.quoted_id = Some(quoted.id.clone());
        self.quoted_post = Some(quoted);
        self
    }

    /// Adds a media attachment.
    #[must_use]
    pub fn with_media(mut self, media: MediaAttachment) -> Self {
        self.media.push(media);
        self
    }

    /// Sets the source folder provenance tag.
    #[must_use]
    pub fn with_source_folder(mut self, folder: impl Into<String>) -> Self {
        self.source_folder = Some(folder.into());
        self
    }
}
