//! Link handling: URL extraction, expansion, and classification.

mod classifier;
mod expander;

pub use classifier::{classify, extract_host, extract_path};
pub use expander::{HttpLinkExpander, LinkExpander};

use regex::Regex;
use std::sync::OnceLock;

/// Extracts HTTP(S) URLs from a bookmark's body text, in order of
/// appearance, with trailing punctuation stripped.
#[must_use]
pub fn extract_urls(text: &str) -> Vec<String> {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    let re = URL_RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r#"https?://[^\s<>"')\]]+"#).unwrap()
    });

    re.find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?']).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_urls_in_order() {
        let urls = extract_urls("see https://a.example/one and https://b.example/two");
        assert_eq!(urls, vec!["https://a.example/one", "https://b.example/two"]);
    }

    #[test]
    fn test_extract_urls_strips_trailing_punctuation() {
        let urls = extract_urls("read this: https://example.com/post.");
        assert_eq!(urls, vec!["https://example.com/post"]);
    }

    #[test]
    fn test_extract_urls_none() {
        assert!(extract_urls("no links here").is_empty());
    }
}
