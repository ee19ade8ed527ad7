//! Generic article resolution: extraction service with raw-fetch fallback.

use tracing::debug;

use crate::config::ResolverConfig;
use crate::errors::MarkflowError;
use crate::links::extract_host;
use crate::models::Content;
use crate::services::{ContentExtractor, PageFetcher};

const PAYWALLED_REASON: &str = "paywalled - manual handling required";

/// Whether the URL's host is on the known-paywalled list.
fn is_known_paywalled(url: &str, config: &ResolverConfig) -> bool {
    let Some(host) = extract_host(url) else {
        return false;
    };
    config
        .paywalled_domains
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{d}")))
}

/// Paywall heuristic over a fetched body.
///
/// A page is suspected when the body is shorter than the configured
/// minimum, or when it carries both a subscription prompt and a sign-in
/// prompt.
fn looks_paywalled(body: &str, min_chars: usize) -> bool {
    if body.trim().chars().count() < min_chars {
        return true;
    }
    let lower = body.to_lowercase();
    let subscription = lower.contains("subscribe") || lower.contains("subscription");
    let sign_in = lower.contains("sign in") || lower.contains("log in") || lower.contains("sign-in");
    subscription && sign_in
}

fn cap_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

/// Resolves a generic article through the fallback chain.
///
/// Known paywalled domains short-circuit without a network call. Otherwise
/// the extraction service runs first; an empty or failed extraction falls
/// back to a direct capped fetch with the paywall heuristic applied.
pub async fn resolve(
    extractor: &dyn ContentExtractor,
    fetcher: &dyn PageFetcher,
    url: &str,
    config: &ResolverConfig,
) -> Result<Option<Content>, MarkflowError> {
    if is_known_paywalled(url, config) {
        return Ok(Some(Content::unavailable(PAYWALLED_REASON)));
    }

    match extractor.extract(url).await {
        Ok(extraction) if extraction.has_body() => {
            return Ok(Some(Content::ExtractedArticle {
                title: extraction.title,
                description: extraction.description,
                body: extraction.body,
            }));
        }
        Ok(_) => {
            debug!(url = %url, "extraction returned no body, falling back to raw fetch");
        }
        Err(err) => {
            debug!(url = %url, error = %err, "extraction failed, falling back to raw fetch");
        }
    }

    match fetcher.fetch_text(url).await {
        Ok(text) => {
            let body = cap_chars(&text, config.raw_fetch_max_chars);
            let paywall_suspected = looks_paywalled(&body, config.paywall_min_chars);
            Ok(Some(Content::RawFetch {
                body,
                paywall_suspected,
            }))
        }
        Err(err) => {
            debug!(url = %url, error = %err, "raw fetch failed");
            Ok(Some(Content::unavailable("extraction and fetch both failed")))
        }
    }
}
