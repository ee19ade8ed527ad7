//! Content extraction and direct page fetching over HTTP.

use async_trait::async_trait;
use scraper::{Html, Selector};

use super::protocols::{ContentExtractor, Extraction, PageFetcher};
use crate::config::FetchConfig;
use crate::errors::MarkflowError;

/// Selectors preferred as the main content container, in order.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role=\"main\"]",
    "#content",
    ".post-content",
    ".article-content",
    ".entry-content",
];

/// Elements whose text is collected from the content container.
const TEXT_SELECTORS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "blockquote", "pre"];

/// Content-extraction service backed by a page fetch and HTML scraping.
#[derive(Debug)]
pub struct HttpContentExtractor {
    client: reqwest::Client,
    max_response_bytes: usize,
}

impl HttpContentExtractor {
    /// Builds an extractor from the fetch configuration.
    pub fn new(config: &FetchConfig) -> Result<Self, MarkflowError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            max_response_bytes: config.max_response_bytes,
        })
    }

    async fn fetch_capped(&self, url: &str) -> Result<String, MarkflowError> {
        let response = self.client.get(url).send().await?;
        let body = response.text().await?;
        // The response buffer is bounded to keep large pages from growing
        // memory without limit.
        Ok(truncate_chars(&body, self.max_response_bytes))
    }
}

#[async_trait]
impl ContentExtractor for HttpContentExtractor {
    async fn extract(&self, url: &str) -> Result<Extraction, MarkflowError> {
        let html = self.fetch_capped(url).await?;
        Ok(extract_from_html(&html))
    }
}

/// Direct page fetcher for the article raw-fetch fallback.
#[derive(Debug)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
    max_response_bytes: usize,
}

impl HttpPageFetcher {
    /// Builds a fetcher from the fetch configuration.
    pub fn new(config: &FetchConfig) -> Result<Self, MarkflowError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            max_response_bytes: config.max_response_bytes,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, MarkflowError> {
        let response = self.client.get(url).send().await?;
        let body = response.text().await?;
        Ok(strip_tags(&truncate_chars(&body, self.max_response_bytes)))
    }
}

/// Extracts title, description, and body text from an HTML document.
///
/// Synchronous on purpose: `scraper::Html` is not `Send`, so parsing must
/// not live across an await point.
#[must_use]
pub fn extract_from_html(html: &str) -> Extraction {
    let document = Html::parse_document(html);

    let title = select_first_text(&document, "title")
        .or_else(|| select_meta(&document, "meta[property=\"og:title\"]"));
    let description = select_meta(&document, "meta[name=\"description\"]")
        .or_else(|| select_meta(&document, "meta[property=\"og:description\"]"));

    let mut body = String::new();
    for container in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(container) else {
            continue;
        };
        if let Some(root) = document.select(&selector).next() {
            body = collect_text(&root);
            if !body.trim().is_empty() {
                break;
            }
        }
    }
    if body.trim().is_empty() {
        if let Ok(selector) = Selector::parse("body") {
            if let Some(root) = document.select(&selector).next() {
                body = collect_text(&root);
            }
        }
    }

    Extraction {
        title: title.map(|t| normalize_whitespace(&t)).filter(|t| !t.is_empty()),
        description,
        body,
    }
}

fn select_first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .filter(|t| !t.trim().is_empty())
}

fn select_meta(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
}

fn collect_text(root: &scraper::ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    for tag in TEXT_SELECTORS {
        let Ok(selector) = Selector::parse(tag) else {
            continue;
        };
        for el in root.select(&selector) {
            let text = normalize_whitespace(&el.text().collect::<String>());
            if !text.is_empty() {
                parts.push(text);
            }
        }
    }
    if parts.is_empty() {
        normalize_whitespace(&root.text().collect::<String>())
    } else {
        parts.join("\n\n")
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips HTML tags to get plain text.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }
    normalize_whitespace(&result)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}
