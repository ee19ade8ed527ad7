//! Shortened-link expansion.

use async_trait::async_trait;
use tracing::debug;

use crate::config::FetchConfig;
use crate::errors::MarkflowError;

/// Protocol for resolving a shortened URL to its final destination.
#[async_trait]
pub trait LinkExpander: Send + Sync {
    /// Expands a URL by following redirects.
    ///
    /// Expansion failure is non-fatal: on network error, timeout, or abort
    /// the original URL is returned unchanged.
    async fn expand(&self, url: &str) -> String;
}

/// Redirect-following expander backed by a `reqwest` HEAD request.
///
/// One attempt per URL, no retries.
#[derive(Debug)]
pub struct HttpLinkExpander {
    client: reqwest::Client,
}

impl HttpLinkExpander {
    /// Builds an expander from the fetch configuration.
    pub fn new(config: &FetchConfig) -> Result<Self, MarkflowError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .timeout(config.expand_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LinkExpander for HttpLinkExpander {
    async fn expand(&self, url: &str) -> String {
        match self.client.head(url).send().await {
            Ok(response) => response.url().to_string(),
            Err(err) => {
                debug!(url = %url, error = %err, "link expansion failed, keeping original");
                url.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_expand_unreachable_returns_original() {
        let config = FetchConfig::new().with_expand_timeout(0.2);
        let expander = HttpLinkExpander::new(&config).unwrap();

        // Reserved TEST-NET address: connection fails fast, expansion
        // degrades to the original URL.
        let url = "http://192.0.2.1/short";
        assert_eq!(expander.expand(url).await, url);
    }

    #[tokio::test]
    async fn test_expand_invalid_url_returns_original() {
        let expander = HttpLinkExpander::new(&FetchConfig::default()).unwrap();
        assert_eq!(expander.expand("not-a-url").await, "not-a-url");
    }
}
