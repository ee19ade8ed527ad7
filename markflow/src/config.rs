//! Configuration types for the enrichment pipeline.
//!
//! All collaborators receive their settings through these structs; nothing
//! in the crate reads environment variables or other ambient state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for outbound HTTP calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Timeout for link expansion requests in seconds.
    #[serde(default = "default_expand_timeout")]
    pub expand_timeout_seconds: f64,
    /// Timeout for all other external requests in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: f64,
    /// Maximum number of redirects to follow.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Maximum response size in bytes read from any external call.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

fn default_expand_timeout() -> f64 {
    10.0
}

fn default_request_timeout() -> f64 {
    20.0
}

fn default_max_redirects() -> usize {
    10
}

fn default_user_agent() -> String {
    "markflow/0.1".to_string()
}

fn default_max_response_bytes() -> usize {
    10 * 1024 * 1024 // 10MB
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            expand_timeout_seconds: default_expand_timeout(),
            request_timeout_seconds: default_request_timeout(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl FetchConfig {
    /// Creates a new fetch configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the link expansion timeout.
    #[must_use]
    pub fn with_expand_timeout(mut self, seconds: f64) -> Self {
        self.expand_timeout_seconds = seconds;
        self
    }

    /// Sets the general request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, seconds: f64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Gets the expansion timeout as a Duration.
    #[must_use]
    pub fn expand_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.expand_timeout_seconds)
    }

    /// Gets the request timeout as a Duration.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout_seconds)
    }
}

/// Configuration for content resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Character budget for README excerpts.
    #[serde(default = "default_readme_max_chars")]
    pub readme_max_chars: usize,
    /// Character cap for direct page fetches in the article fallback.
    #[serde(default = "default_raw_fetch_max_chars")]
    pub raw_fetch_max_chars: usize,
    /// Bodies shorter than this are flagged as paywall-suspected.
    #[serde(default = "default_paywall_min_chars")]
    pub paywall_min_chars: usize,
    /// Domains known to be paywalled; skipped without a network call.
    #[serde(default = "default_paywalled_domains")]
    pub paywalled_domains: Vec<String>,
    /// Per-resolver call deadline in seconds.
    #[serde(default = "default_resolve_timeout")]
    pub resolve_timeout_seconds: f64,
}

fn default_readme_max_chars() -> usize {
    3000
}

fn default_raw_fetch_max_chars() -> usize {
    50_000
}

fn default_paywall_min_chars() -> usize {
    1000
}

fn default_paywalled_domains() -> Vec<String> {
    [
        "nytimes.com",
        "wsj.com",
        "ft.com",
        "bloomberg.com",
        "economist.com",
        "washingtonpost.com",
        "theatlantic.com",
        "newyorker.com",
        "theinformation.com",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_resolve_timeout() -> f64 {
    15.0
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            readme_max_chars: default_readme_max_chars(),
            raw_fetch_max_chars: default_raw_fetch_max_chars(),
            paywall_min_chars: default_paywall_min_chars(),
            paywalled_domains: default_paywalled_domains(),
            resolve_timeout_seconds: default_resolve_timeout(),
        }
    }
}

impl ResolverConfig {
    /// Creates a new resolver configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a paywalled domain.
    #[must_use]
    pub fn with_paywalled_domain(mut self, domain: impl Into<String>) -> Self {
        self.paywalled_domains.push(domain.into());
        self
    }

    /// Sets the README character budget.
    #[must_use]
    pub fn with_readme_max_chars(mut self, chars: usize) -> Self {
        self.readme_max_chars = chars;
        self
    }

    /// Gets the resolver deadline as a Duration.
    #[must_use]
    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.resolve_timeout_seconds)
    }
}

/// Locations of the persisted pipeline files.
///
/// Concurrent pipeline runs against the same files are unsafe
/// (last-writer-wins); serializing runs is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the pending queue document.
    pub queue_path: PathBuf,
    /// Path of the run state document.
    pub state_path: PathBuf,
    /// Path of the archive artifact scanned for prior identifiers.
    pub archive_path: PathBuf,
}

impl StoreConfig {
    /// Creates a store configuration rooted at a data directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            queue_path: dir.join("pending-bookmarks.json"),
            state_path: dir.join("state.json"),
            archive_path: dir.join("archive.md"),
        }
    }
}

/// Combined configuration for the enrichment pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum bookmarks enriched concurrently.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Whether media attachments are carried onto enriched records.
    #[serde(default)]
    pub include_media: bool,
    /// Fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Resolver configuration.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Persisted file locations.
    pub store: StoreConfig,
}

fn default_max_concurrent() -> usize {
    4
}

impl PipelineConfig {
    /// Creates a pipeline configuration with defaults, rooted at a data dir.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            include_media: false,
            fetch: FetchConfig::default(),
            resolver: ResolverConfig::default(),
            store: StoreConfig::in_dir(data_dir),
        }
    }

    /// Sets the concurrency bound.
    #[must_use]
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max;
        self
    }

    /// Enables media attachment on enriched records.
    #[must_use]
    pub fn with_media(mut self) -> Self {
        self.include_media = true;
        self
    }
}
