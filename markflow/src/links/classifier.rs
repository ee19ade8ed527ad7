//! Pure URL classification.
//!
//! `classify` is total and deterministic; the rule order is a deliberate
//! precedence. Article detection must run before generic post detection
//! because both share the social host.

use crate::models::LinkKind;

const CODE_HOST_DOMAINS: &[&str] = &["github.com"];

const VIDEO_DOMAINS: &[&str] = &["youtube.com", "youtu.be", "vimeo.com"];

const SOCIAL_DOMAINS: &[&str] = &["x.com", "twitter.com", "mobile.twitter.com"];

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "avif"];

/// Extracts the lowercased host from a URL, without port.
#[must_use]
pub fn extract_host(url: &str) -> Option<String> {
    let start = url.find("://").map(|i| i + 3)?;
    let rest = &url[start..];
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let host = rest[..end].split('@').last().unwrap_or("");
    let host = host.split(':').next().unwrap_or("");
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

/// Extracts the path component of a URL (leading slash included, query and
/// fragment excluded). Returns `"/"` when the URL has no path.
#[must_use]
pub fn extract_path(url: &str) -> String {
    let Some(start) = url.find("://").map(|i| i + 3) else {
        return "/".to_string();
    };
    let rest = &url[start..];
    // Query and fragment are cut before the path search so a `/` inside a
    // query string is never mistaken for the path.
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    let authority_and_path = &rest[..end];
    match authority_and_path.find('/') {
        Some(i) => authority_and_path[i..].to_string(),
        None => "/".to_string(),
    }
}

fn host_matches(host: &str, domains: &[&str]) -> bool {
    domains
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{d}")))
}

fn has_image_extension(path: &str) -> bool {
    let filename = path.rsplit('/').next().unwrap_or("");
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return false;
    };
    IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

/// Classifies a resolved URL into a link kind.
///
/// Ordered rules, first match wins:
/// 1. code-host domain
/// 2. video domain
/// 3. social domain, subdivided by path: `/i/article/` articles, then
///    `/photo/` and `/video/` attachment pages, then plain posts
/// 4. image filename extension
/// 5. generic article (catch-all)
#[must_use]
pub fn classify(url: &str) -> LinkKind {
    let Some(host) = extract_host(url) else {
        return LinkKind::GenericArticle;
    };
    let path = extract_path(url);

    if host_matches(&host, CODE_HOST_DOMAINS) {
        return LinkKind::CodeHost;
    }

    if host_matches(&host, VIDEO_DOMAINS) {
        return LinkKind::Video;
    }

    if host_matches(&host, SOCIAL_DOMAINS) {
        if path.contains("/i/article/") {
            return LinkKind::SocialArticle;
        }
        if path.contains("/photo/") || path.contains("/video/") {
            return LinkKind::SocialMedia;
        }
        return LinkKind::SocialPost;
    }

    if has_image_extension(&path) {
        return LinkKind::Image;
    }

    LinkKind::GenericArticle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_host() {
        assert_eq!(classify("https://github.com/rust-lang/rust"), LinkKind::CodeHost);
        assert_eq!(classify("https://www.github.com/a/b"), LinkKind::CodeHost);
    }

    #[test]
    fn test_video() {
        assert_eq!(classify("https://youtube.com/watch?v=abc"), LinkKind::Video);
        assert_eq!(classify("https://youtu.be/abc"), LinkKind::Video);
        assert_eq!(classify("https://vimeo.com/123"), LinkKind::Video);
    }

    #[test]
    fn test_social_article_scenario() {
        // Article detection wins on the social host.
        assert_eq!(
            classify("https://x.com/i/article/2012310917812502528"),
            LinkKind::SocialArticle
        );
    }

    #[test]
    fn test_social_media_scenario() {
        assert_eq!(
            classify("https://x.com/user/status/123/photo/1"),
            LinkKind::SocialMedia
        );
        assert_eq!(
            classify("https://x.com/user/status/123/video/1"),
            LinkKind::SocialMedia
        );
    }

    #[test]
    fn test_social_post() {
        assert_eq!(classify("https://x.com/alice/status/555"), LinkKind::SocialPost);
        assert_eq!(classify("https://twitter.com/bob/status/9"), LinkKind::SocialPost);
    }

    #[test]
    fn test_article_precedes_post_on_same_host() {
        // A URL that structurally resembles a post still classifies as an
        // article when the article path marker is present.
        assert_eq!(
            classify("https://x.com/i/article/123/status/456"),
            LinkKind::SocialArticle
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(classify("https://cdn.example.com/pic.PNG"), LinkKind::Image);
        assert_eq!(classify("https://cdn.example.com/pic.webp?x=1"), LinkKind::Image);
    }

    #[test]
    fn test_generic_article_default() {
        assert_eq!(classify("https://blog.example.com/post/1"), LinkKind::GenericArticle);
        assert_eq!(classify("not a url"), LinkKind::GenericArticle);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let url = "https://x.com/i/article/42";
        assert_eq!(classify(url), classify(url));
    }

    #[test]
    fn test_query_and_fragment_ignored_for_host() {
        assert_eq!(
            classify("https://github.com?ref=x.com/i/article/1"),
            LinkKind::CodeHost
        );
    }

    #[test]
    fn test_extract_host() {
        assert_eq!(extract_host("https://X.com/a"), Some("x.com".to_string()));
        assert_eq!(extract_host("https://host:8080/a"), Some("host".to_string()));
        assert_eq!(extract_host("no-scheme"), None);
    }

    #[test]
    fn test_extract_path() {
        assert_eq!(extract_path("https://x.com/a/b?q=1#f"), "/a/b");
        assert_eq!(extract_path("https://x.com"), "/");
    }
}
