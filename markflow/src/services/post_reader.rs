//! Social-media read service client.

use async_trait::async_trait;

use super::protocols::{is_numeric_id, PostReader, RawPost};
use crate::config::FetchConfig;
use crate::errors::MarkflowError;

/// Read-service client over HTTP.
#[derive(Debug)]
pub struct HttpPostReader {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPostReader {
    /// Builds a reader against the service base URL.
    pub fn new(config: &FetchConfig, base_url: impl Into<String>) -> Result<Self, MarkflowError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PostReader for HttpPostReader {
    async fn read_post(&self, id: &str) -> Result<RawPost, MarkflowError> {
        // Reject malformed identifiers before they reach the wire.
        if !is_numeric_id(id) {
            return Err(MarkflowError::InvalidIdentifier(id.to_string()));
        }

        let url = format!("{}/posts/{id}", self.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let post: RawPost = response.json().await?;
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_non_numeric_id_rejected_before_network() {
        // The base URL is unroutable; a network attempt would error with an
        // HTTP error, not InvalidIdentifier.
        let reader = HttpPostReader::new(&FetchConfig::default(), "http://192.0.2.1").unwrap();

        let err = reader.read_post("abc'; --").await.unwrap_err();
        assert!(matches!(err, MarkflowError::InvalidIdentifier(_)));
    }

    #[tokio::test]
    async fn test_empty_id_rejected() {
        let reader = HttpPostReader::new(&FetchConfig::default(), "http://192.0.2.1").unwrap();
        let err = reader.read_post("").await.unwrap_err();
        assert!(matches!(err, MarkflowError::InvalidIdentifier(_)));
    }
}
