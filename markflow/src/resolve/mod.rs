//! Per-kind content resolution.
//!
//! `ResolverSet` is the dispatch table over the closed [`LinkKind`] enum:
//! each kind maps to exactly one strategy (or an ordered fallback chain).
//! New kinds extend the table, not the call sites.

mod article;
mod code_host;
mod social;

pub use code_host::parse_owner_repo;
pub use social::post_id_from_url;

use std::sync::Arc;

use tracing::debug;

use crate::config::ResolverConfig;
use crate::errors::MarkflowError;
use crate::models::{Content, LinkKind};
use crate::services::{CodeHostApi, ContentExtractor, PageFetcher, PostReader};

/// Per-item context available to resolvers.
#[derive(Debug, Clone, Copy)]
pub struct ResolveCtx<'a> {
    /// Identifier of the bookmark containing the link being resolved.
    pub bookmark_id: &'a str,
}

/// Dispatch table from link kind to resolver strategy.
pub struct ResolverSet {
    post_reader: Arc<dyn PostReader>,
    extractor: Arc<dyn ContentExtractor>,
    code_host: Arc<dyn CodeHostApi>,
    page_fetcher: Arc<dyn PageFetcher>,
    config: ResolverConfig,
}

impl ResolverSet {
    /// Creates a resolver set over the given collaborators.
    #[must_use]
    pub fn new(
        post_reader: Arc<dyn PostReader>,
        extractor: Arc<dyn ContentExtractor>,
        code_host: Arc<dyn CodeHostApi>,
        page_fetcher: Arc<dyn PageFetcher>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            post_reader,
            extractor,
            code_host,
            page_fetcher,
            config,
        }
    }

    /// Resolves content for one link.
    ///
    /// Every strategy runs under the configured deadline. `Ok(None)` means
    /// the kind resolves to no content by design (video, image, media
    /// pages) or the strategy degrades silently (post lookups). `Err` is an
    /// item-local failure the pipeline records; it never aborts siblings.
    pub async fn resolve(
        &self,
        kind: LinkKind,
        url: &str,
        ctx: ResolveCtx<'_>,
    ) -> Result<Option<Content>, MarkflowError> {
        let deadline = self.config.resolve_timeout();
        let result = tokio::time::timeout(deadline, self.dispatch(kind, url, ctx)).await;

        match result {
            Ok(inner) => inner,
            // Deadline expiry degrades exactly like the strategy's own
            // failure mode: unavailable for articles, silence for posts,
            // a reported failure otherwise.
            Err(_) => match kind {
                LinkKind::SocialArticle | LinkKind::GenericArticle => {
                    debug!(url = %url, kind = %kind, "resolution timed out");
                    Ok(Some(Content::unavailable("resolution timed out")))
                }
                LinkKind::SocialPost => {
                    debug!(url = %url, "post lookup timed out");
                    Ok(None)
                }
                _ => Err(MarkflowError::timeout(
                    format!("resolve {kind} {url}"),
                    self.config.resolve_timeout_seconds,
                )),
            },
        }
    }

    async fn dispatch(
        &self,
        kind: LinkKind,
        url: &str,
        ctx: ResolveCtx<'_>,
    ) -> Result<Option<Content>, MarkflowError> {
        match kind {
            LinkKind::CodeHost => {
                code_host::resolve(self.code_host.as_ref(), url, &self.config).await
            }
            LinkKind::SocialArticle => {
                social::resolve_article(self.post_reader.as_ref(), ctx.bookmark_id).await
            }
            LinkKind::SocialPost => social::resolve_post(self.post_reader.as_ref(), url).await,
            LinkKind::GenericArticle => {
                article::resolve(
                    self.extractor.as_ref(),
                    self.page_fetcher.as_ref(),
                    url,
                    &self.config,
                )
                .await
            }
            // No content resolution for media kinds by design.
            LinkKind::Video | LinkKind::Image | LinkKind::SocialMedia => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mocks::{MockCodeHost, MockExtractor, MockPageFetcher, MockPostReader};

    fn resolver_set() -> ResolverSet {
        ResolverSet::new(
            Arc::new(MockPostReader::new()),
            Arc::new(MockExtractor::new()),
            Arc::new(MockCodeHost::new()),
            Arc::new(MockPageFetcher::new()),
            ResolverConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_media_kinds_resolve_to_none() {
        let set = resolver_set();
        let ctx = ResolveCtx { bookmark_id: "1" };

        for kind in [LinkKind::Video, LinkKind::Image, LinkKind::SocialMedia] {
            let content = set
                .resolve(kind, "https://example.com/a.png", ctx)
                .await
                .unwrap();
            assert!(content.is_none(), "{kind} should not resolve content");
        }
    }

    #[tokio::test]
    async fn test_social_post_failure_is_silent() {
        let reader = MockPostReader::new().failing();
        let set = ResolverSet::new(
            Arc::new(reader),
            Arc::new(MockExtractor::new()),
            Arc::new(MockCodeHost::new()),
            Arc::new(MockPageFetcher::new()),
            ResolverConfig::default(),
        );
        let ctx = ResolveCtx { bookmark_id: "1" };

        let content = set
            .resolve(LinkKind::SocialPost, "https://x.com/a/status/77", ctx)
            .await
            .unwrap();
        assert!(content.is_none());
    }

    #[tokio::test]
    async fn test_code_host_failure_propagates() {
        let set = ResolverSet::new(
            Arc::new(MockPostReader::new()),
            Arc::new(MockExtractor::new()),
            Arc::new(MockCodeHost::new().failing()),
            Arc::new(MockPageFetcher::new()),
            ResolverConfig::default(),
        );
        let ctx = ResolveCtx { bookmark_id: "1" };

        let result = set
            .resolve(LinkKind::CodeHost, "https://github.com/a/b", ctx)
            .await;
        assert!(result.is_err());
    }
}
