//! Mock collaborators that record calls and return configurable results.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::errors::MarkflowError;
use crate::links::LinkExpander;
use crate::models::Bookmark;
use crate::services::{
    BookmarkSource, CodeHostApi, ContentExtractor, Extraction, FetchOptions, PageFetcher,
    PostReader, RawPost, RepoInfo,
};

/// A bookmark source returning a fixed batch.
#[derive(Debug, Default)]
pub struct MockBookmarkSource {
    bookmarks: Vec<Bookmark>,
    failing: bool,
    fetch_count: Mutex<usize>,
}

impl MockBookmarkSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the batch to return.
    #[must_use]
    pub fn with_bookmarks(mut self, bookmarks: Vec<Bookmark>) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    /// Makes every fetch fail.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Number of fetch calls made.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        *self.fetch_count.lock()
    }
}

#[async_trait]
impl BookmarkSource for MockBookmarkSource {
    async fn fetch(&self, _options: &FetchOptions) -> Result<Vec<Bookmark>, MarkflowError> {
        *self.fetch_count.lock() += 1;
        if self.failing {
            return Err(MarkflowError::SourceFetch("mock source failure".to_string()));
        }
        Ok(self.bookmarks.clone())
    }
}

/// A read service backed by an in-memory post map.
#[derive(Debug, Default)]
pub struct MockPostReader {
    posts: HashMap<String, RawPost>,
    failing: bool,
    requested: Mutex<Vec<String>>,
}

impl MockPostReader {
    /// Creates an empty reader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a post, keyed by its id.
    #[must_use]
    pub fn with_post(mut self, post: RawPost) -> Self {
        self.posts.insert(post.id.clone(), post);
        self
    }

    /// Makes every lookup fail.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Identifiers requested so far, in call order.
    #[must_use]
    pub fn requested_ids(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl PostReader for MockPostReader {
    async fn read_post(&self, id: &str) -> Result<RawPost, MarkflowError> {
        self.requested.lock().push(id.to_string());
        if self.failing {
            return Err(MarkflowError::resolution("social-post", "mock lookup failure"));
        }
        self.posts
            .get(id)
            .cloned()
            .ok_or_else(|| MarkflowError::resolution("social-post", format!("no post {id}")))
    }
}

/// An extraction service returning a fixed extraction.
#[derive(Debug, Default)]
pub struct MockExtractor {
    extraction: Extraction,
    failing: bool,
    calls: Mutex<usize>,
}

impl MockExtractor {
    /// Creates an extractor returning an empty extraction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the extraction to return.
    #[must_use]
    pub fn with_extraction(mut self, extraction: Extraction) -> Self {
        self.extraction = extraction;
        self
    }

    /// Makes every extraction fail.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Number of extraction calls made.
    #[must_use]
    pub fn extract_calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl ContentExtractor for MockExtractor {
    async fn extract(&self, _url: &str) -> Result<Extraction, MarkflowError> {
        *self.calls.lock() += 1;
        if self.failing {
            return Err(MarkflowError::resolution("generic-article", "mock extraction failure"));
        }
        Ok(self.extraction.clone())
    }
}

/// A code-host API backed by fixed repo metadata.
#[derive(Debug, Default)]
pub struct MockCodeHost {
    repo: RepoInfo,
    readme: Option<String>,
    failing: bool,
    repo_calls: Mutex<usize>,
}

impl MockCodeHost {
    /// Creates an API with default metadata and no readme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the repository metadata.
    #[must_use]
    pub fn with_repo(mut self, repo: RepoInfo) -> Self {
        self.repo = repo;
        self
    }

    /// Sets the readme text.
    #[must_use]
    pub fn with_readme(mut self, readme: impl Into<String>) -> Self {
        self.readme = Some(readme.into());
        self
    }

    /// Makes every call fail.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Number of `get_repo` calls made.
    #[must_use]
    pub fn repo_calls(&self) -> usize {
        *self.repo_calls.lock()
    }
}

#[async_trait]
impl CodeHostApi for MockCodeHost {
    async fn get_repo(&self, _owner: &str, _repo: &str) -> Result<RepoInfo, MarkflowError> {
        *self.repo_calls.lock() += 1;
        if self.failing {
            return Err(MarkflowError::resolution("code-host", "mock api failure"));
        }
        Ok(self.repo.clone())
    }

    async fn get_readme(&self, _owner: &str, _repo: &str) -> Result<Option<String>, MarkflowError> {
        if self.failing {
            return Err(MarkflowError::resolution("code-host", "mock api failure"));
        }
        Ok(self.readme.clone())
    }
}

/// A page fetcher returning fixed text.
#[derive(Debug, Default)]
pub struct MockPageFetcher {
    text: String,
    failing: bool,
    calls: Mutex<usize>,
}

impl MockPageFetcher {
    /// Creates a fetcher returning empty text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page text to return.
    #[must_use]
    pub fn with_text(mut self, text: String) -> Self {
        self.text = text;
        self
    }

    /// Makes every fetch fail.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Number of fetch calls made.
    #[must_use]
    pub fn fetch_calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch_text(&self, _url: &str) -> Result<String, MarkflowError> {
        *self.calls.lock() += 1;
        if self.failing {
            return Err(MarkflowError::resolution("generic-article", "mock fetch failure"));
        }
        Ok(self.text.clone())
    }
}

/// An expander that maps configured URLs and passes others through.
#[derive(Debug, Default)]
pub struct MockExpander {
    map: HashMap<String, String>,
}

impl MockExpander {
    /// Creates a pass-through expander.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a shortened URL to its expansion.
    #[must_use]
    pub fn with_mapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.map.insert(from.into(), to.into());
        self
    }
}

#[async_trait]
impl LinkExpander for MockExpander {
    async fn expand(&self, url: &str) -> String {
        self.map.get(url).cloned().unwrap_or_else(|| url.to_string())
    }
}
