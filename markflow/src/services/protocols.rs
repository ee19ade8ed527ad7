//! Protocol traits for the pipeline's external collaborators.
//!
//! These traits define the interfaces for the bookmark source, the
//! social-media read service, the content-extraction service, and the
//! code-host API, allowing for pluggable implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::MarkflowError;
use crate::models::Bookmark;

/// Which source collection to fetch bookmarks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceMode {
    /// The user's bookmarks collection.
    #[default]
    Bookmarks,
    /// The user's likes collection.
    Likes,
}

/// Options for a bookmark source fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Maximum number of bookmarks to fetch.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Which collection to read.
    #[serde(default)]
    pub mode: SourceMode,
    /// Restrict the fetch to one folder.
    #[serde(default)]
    pub folder_id: Option<String>,
    /// Whether to walk multiple pages. Paginated fetches may take
    /// substantially longer and return partial results if interrupted.
    #[serde(default)]
    pub paginate: bool,
    /// Page bound for paginated fetches.
    #[serde(default)]
    pub max_pages: Option<usize>,
}

fn default_count() -> usize {
    20
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            count: default_count(),
            mode: SourceMode::default(),
            folder_id: None,
            paginate: false,
            max_pages: None,
        }
    }
}

impl FetchOptions {
    /// Creates fetch options for `count` bookmarks.
    #[must_use]
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Restricts the fetch to a folder.
    #[must_use]
    pub fn in_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    /// Switches to the likes collection.
    #[must_use]
    pub fn likes(mut self) -> Self {
        self.mode = SourceMode::Likes;
        self
    }

    /// Enables pagination with an optional page bound.
    #[must_use]
    pub fn paginated(mut self, max_pages: Option<usize>) -> Self {
        self.paginate = true;
        self.max_pages = max_pages;
        self
    }
}

/// A raw post record returned by the social-media read service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    /// Post identifier.
    pub id: String,
    /// Author handle.
    pub author_handle: String,
    /// Author display name.
    #[serde(default)]
    pub author_name: String,
    /// Body text.
    #[serde(default)]
    pub text: String,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Canonical URL of the post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Result of the content-extraction service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Page title.
    pub title: Option<String>,
    /// Meta description.
    pub description: Option<String>,
    /// Clean body text.
    pub body: String,
}

impl Extraction {
    /// Whether the extraction produced any body text.
    #[must_use]
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }
}

/// Repository metadata from the code-host API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoInfo {
    /// Repository name.
    pub name: String,
    /// Full `owner/repo` name.
    pub full_name: String,
    /// Repository description.
    pub description: Option<String>,
    /// Star count.
    pub stars: u64,
    /// Primary language.
    pub language: Option<String>,
    /// Repository topics.
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Validates the identifier shape accepted by the read service.
///
/// Identifiers are checked before being interpolated into any external
/// invocation, to block injection.
#[must_use]
pub fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Protocol for the upstream bookmark source.
#[async_trait]
pub trait BookmarkSource: Send + Sync {
    /// Fetches an ordered batch of raw bookmarks.
    ///
    /// A failure here is fatal to the run.
    async fn fetch(&self, options: &FetchOptions) -> Result<Vec<Bookmark>, MarkflowError>;
}

/// Protocol for the social-media read service.
#[async_trait]
pub trait PostReader: Send + Sync {
    /// Reads a single post by its numeric identifier.
    ///
    /// Implementations must reject non-numeric identifiers before any
    /// network invocation.
    async fn read_post(&self, id: &str) -> Result<RawPost, MarkflowError>;
}

/// Protocol for the content-extraction service.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Extracts clean title/description/body text from a page.
    async fn extract(&self, url: &str) -> Result<Extraction, MarkflowError>;
}

/// Protocol for the code-host API.
#[async_trait]
pub trait CodeHostApi: Send + Sync {
    /// Fetches repository metadata.
    async fn get_repo(&self, owner: &str, repo: &str) -> Result<RepoInfo, MarkflowError>;

    /// Fetches the repository README as raw text, `None` when absent.
    async fn get_readme(&self, owner: &str, repo: &str) -> Result<Option<String>, MarkflowError>;
}

/// Protocol for direct page fetches used by the article fallback.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a page and returns its text content.
    async fn fetch_text(&self, url: &str) -> Result<String, MarkflowError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_id() {
        assert!(is_numeric_id("123"));
        assert!(is_numeric_id("2012310917812502528"));
        assert!(!is_numeric_id(""));
        assert!(!is_numeric_id("12a3"));
        assert!(!is_numeric_id("123; DROP TABLE"));
        assert!(!is_numeric_id("-123"));
    }

    #[test]
    fn test_fetch_options_builder() {
        let options = FetchOptions::with_count(50)
            .in_folder("folder-9")
            .likes()
            .paginated(Some(3));

        assert_eq!(options.count, 50);
        assert_eq!(options.mode, SourceMode::Likes);
        assert_eq!(options.folder_id.as_deref(), Some("folder-9"));
        assert!(options.paginate);
        assert_eq!(options.max_pages, Some(3));
    }

    #[test]
    fn test_extraction_has_body() {
        assert!(!Extraction::default().has_body());
        assert!(!Extraction {
            body: "   ".to_string(),
            ..Default::default()
        }
        .has_body());
        assert!(Extraction {
            body: "text".to_string(),
            ..Default::default()
        }
        .has_body());
    }
}
