//! Code-host REST API client.

use async_trait::async_trait;
use serde::Deserialize;

use super::protocols::{CodeHostApi, RepoInfo};
use crate::config::FetchConfig;
use crate::errors::MarkflowError;

const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Code-host API client over HTTP.
///
/// Authentication uses an optional bearer token passed in explicitly;
/// the client never reads credentials from the environment.
#[derive(Debug)]
pub struct HttpCodeHostApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCodeHostApi {
    /// Builds a client against the default API host.
    pub fn new(config: &FetchConfig, token: Option<String>) -> Result<Self, MarkflowError> {
        Self::with_base_url(config, token, DEFAULT_BASE_URL)
    }

    /// Builds a client against a custom API host.
    pub fn with_base_url(
        config: &FetchConfig,
        token: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, MarkflowError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, url: &str, accept: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.get(url).header("Accept", accept);
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}

/// Wire shape of the repository endpoint; only the fields we keep.
#[derive(Debug, Deserialize)]
struct RepoResponse {
    name: String,
    full_name: String,
    description: Option<String>,
    stargazers_count: u64,
    language: Option<String>,
    #[serde(default)]
    topics: Vec<String>,
}

#[async_trait]
impl CodeHostApi for HttpCodeHostApi {
    async fn get_repo(&self, owner: &str, repo: &str) -> Result<RepoInfo, MarkflowError> {
        let url = format!("{}/repos/{owner}/{repo}", self.base_url);
        let response = self
            .request(&url, "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?;
        let repo: RepoResponse = response.json().await?;
        Ok(RepoInfo {
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            stars: repo.stargazers_count,
            language: repo.language,
            topics: repo.topics,
        })
    }

    async fn get_readme(&self, owner: &str, repo: &str) -> Result<Option<String>, MarkflowError> {
        let url = format!("{}/repos/{owner}/{repo}/readme", self.base_url);
        let response = self.request(&url, "application/vnd.github.raw+json").send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status()?;
        Ok(Some(response.text().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpCodeHostApi::with_base_url(
            &FetchConfig::default(),
            None,
            "https://api.example.com/",
        )
        .unwrap();
        assert_eq!(api.base_url, "https://api.example.com");
    }

    #[test]
    fn test_repo_response_parsing() {
        let json = r#"{
            "name": "markflow",
            "full_name": "acme/markflow",
            "description": null,
            "stargazers_count": 12,
            "language": "Rust",
            "topics": ["bookmarks", "pipeline"]
        }"#;
        let repo: RepoResponse = serde_json::from_str(json).unwrap();
        assert_eq!(repo.full_name, "acme/markflow");
        assert_eq!(repo.stargazers_count, 12);
        assert_eq!(repo.topics.len(), 2);
    }
}
