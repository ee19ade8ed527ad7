//! Social-platform resolution: native articles and quoted posts.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::errors::MarkflowError;
use crate::models::Content;
use crate::services::{is_numeric_id, PostReader};

/// Extracts the numeric post id from a `/status/{id}` path segment.
#[must_use]
pub fn post_id_from_url(url: &str) -> Option<String> {
    static STATUS_RE: OnceLock<Regex> = OnceLock::new();
    let re = STATUS_RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"/status/(\d+)").unwrap()
    });
    re.captures(url).map(|c| c[1].to_string())
}

/// Splits an article text into a display title and body.
///
/// The read service returns the full article as one text blob; the first
/// line serves as the title.
fn split_title(text: &str) -> (String, String) {
    let mut lines = text.splitn(2, '\n');
    let title = lines.next().unwrap_or_default().trim().to_string();
    let body = lines.next().map_or_else(|| text.to_string(), |rest| rest.trim().to_string());
    (title, body)
}

/// Resolves a platform-native article.
///
/// The article id embedded in the URL belongs to the linked article, not
/// the bookmark, and is deliberately not used for lookup; the containing
/// bookmark's own identifier queries the read service. Invalid identifiers
/// and lookup failures degrade to `Unavailable`.
pub async fn resolve_article(
    reader: &dyn PostReader,
    bookmark_id: &str,
) -> Result<Option<Content>, MarkflowError> {
    if !is_numeric_id(bookmark_id) {
        debug!(id = %bookmark_id, "rejecting non-numeric identifier for article lookup");
        return Ok(Some(Content::unavailable("invalid bookmark identifier")));
    }

    match reader.read_post(bookmark_id).await {
        Ok(post) => {
            let (title, body) = split_title(&post.text);
            Ok(Some(Content::SocialArticle { title, body }))
        }
        Err(err) => {
            debug!(id = %bookmark_id, error = %err, "article lookup failed");
            Ok(Some(Content::unavailable("article lookup failed")))
        }
    }
}

/// Resolves a post link into a quoted-post record.
///
/// Lookup failure leaves content null rather than erroring.
pub async fn resolve_post(
    reader: &dyn PostReader,
    url: &str,
) -> Result<Option<Content>, MarkflowError> {
    let Some(id) = post_id_from_url(url) else {
        return Ok(None);
    };

    match reader.read_post(&id).await {
        Ok(post) => {
            let canonical = post
                .url
                .unwrap_or_else(|| url.to_string());
            Ok(Some(Content::QuotedPost {
                id: post.id,
                author: post.author_handle,
                body: post.text,
                url: canonical,
            }))
        }
        Err(err) => {
            debug!(id = %id, error = %err, "post lookup failed");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RawPost;
    use crate::testing::mocks::MockPostReader;

    #[test]
    fn test_post_id_from_url() {
        assert_eq!(
            post_id_from_url("https://x.com/alice/status/555"),
            Some("555".to_string())
        );
        assert_eq!(
            post_id_from_url("https://x.com/a/status/123/photo/1"),
            Some("123".to_string())
        );
        assert_eq!(post_id_from_url("https://x.com/alice"), None);
    }

    #[test]
    fn test_split_title() {
        let (title, body) = split_title("The Title\nBody line one.\nBody line two.");
        assert_eq!(title, "The Title");
        assert!(body.starts_with("Body line one."));

        let (title, body) = split_title("single line");
        assert_eq!(title, "single line");
        assert_eq!(body, "single line");
    }

    #[tokio::test]
    async fn test_article_uses_bookmark_id_not_url_article_id() {
        // Regression coverage for the id divergence: the lookup must use
        // the bookmark's id, never the article id parsed from the URL.
        let reader = MockPostReader::new().with_post(RawPost {
            id: "900".to_string(),
            author_handle: "alice".to_string(),
            author_name: String::new(),
            text: "Title\nFull article text".to_string(),
            created_at: None,
            url: None,
        });

        let content = resolve_article(&reader, "900").await.unwrap().unwrap();
        assert_eq!(reader.requested_ids(), vec!["900"]);
        assert!(matches!(content, Content::SocialArticle { .. }));
    }

    #[tokio::test]
    async fn test_article_non_numeric_id_never_reaches_service() {
        let reader = MockPostReader::new();
        let content = resolve_article(&reader, "not-a-number").await.unwrap().unwrap();

        assert!(content.is_unavailable());
        assert!(reader.requested_ids().is_empty());
    }

    #[tokio::test]
    async fn test_article_lookup_failure_is_unavailable() {
        let reader = MockPostReader::new().failing();
        let content = resolve_article(&reader, "123").await.unwrap().unwrap();
        assert!(content.is_unavailable());
    }

    #[tokio::test]
    async fn test_resolve_post_builds_quoted_record() {
        let reader = MockPostReader::new().with_post(RawPost {
            id: "77".to_string(),
            author_handle: "bob".to_string(),
            author_name: String::new(),
            text: "quoted body".to_string(),
            created_at: None,
            url: Some("https://x.com/bob/status/77".to_string()),
        });

        let content = resolve_post(&reader, "https://x.com/bob/status/77")
            .await
            .unwrap()
            .unwrap();

        match content {
            Content::QuotedPost { id, author, body, url } => {
                assert_eq!(id, "77");
                assert_eq!(author, "bob");
                assert_eq!(body, "quoted body");
                assert_eq!(url, "https://x.com/bob/status/77");
            }
            other => panic!("expected quoted post, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_post_without_status_id_is_none() {
        let reader = MockPostReader::new();
        let content = resolve_post(&reader, "https://x.com/bob").await.unwrap();
        assert!(content.is_none());
        assert!(reader.requested_ids().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_post_lookup_failure_is_none() {
        let reader = MockPostReader::new().failing();
        let content = resolve_post(&reader, "https://x.com/bob/status/1")
            .await
            .unwrap();
        assert!(content.is_none());
    }
}
