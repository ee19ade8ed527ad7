//! The per-item enrichment orchestrator and run entry point.
//!
//! Each bookmark moves through a fixed stage sequence; content resolution
//! fans out over the bookmark's links. Items are independent: the batch
//! runs under a bounded-concurrency fan-out and one item's failure never
//! cancels its siblings.

mod report;


pub use report::{FailureRecord, ItemStage, RunOptions, RunReport};

use futures::StreamExt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::dedup::{DedupEngine, KnownIdentifiers};
use crate::errors::MarkflowError;
use crate::events::EventSink;
use crate::links::{classify, extract_urls, LinkExpander};
use crate::models::{Bookmark, ContextPost, EnrichedRecord, Link};
use crate::resolve::{ResolveCtx, ResolverSet};
use crate::services::{
    is_numeric_id, BookmarkSource, CodeHostApi, ContentExtractor, PageFetcher, PostReader,
};
use crate::store::{PendingQueueStore, StateStore};

/// The external collaborators a pipeline is wired with.
///
/// Everything arrives explicitly; the pipeline reads no ambient state.
pub struct Collaborators {
    /// The upstream bookmark source.
    pub source: Arc<dyn BookmarkSource>,
    /// The shortened-link expander.
    pub expander: Arc<dyn LinkExpander>,
    /// The social-media read service.
    pub post_reader: Arc<dyn PostReader>,
    /// The content-extraction service.
    pub extractor: Arc<dyn ContentExtractor>,
    /// The code-host API.
    pub code_host: Arc<dyn CodeHostApi>,
    /// Direct page fetcher for the article fallback.
    pub page_fetcher: Arc<dyn PageFetcher>,
    /// Identifier source for dedup exclusion.
    pub archive: Arc<dyn KnownIdentifiers>,
    /// Event sink for run observability.
    pub events: Arc<dyn EventSink>,
}

/// The fetch→classify→resolve→dedup→merge pipeline.
pub struct EnrichmentPipeline {
    source: Arc<dyn BookmarkSource>,
    expander: Arc<dyn LinkExpander>,
    post_reader: Arc<dyn PostReader>,
    resolvers: ResolverSet,
    dedup: DedupEngine,
    queue_store: PendingQueueStore,
    state_store: StateStore,
    events: Arc<dyn EventSink>,
    config: PipelineConfig,
}

impl EnrichmentPipeline {
    /// Wires a pipeline from its collaborators and configuration.
    #[must_use]
    pub fn new(collaborators: Collaborators, config: PipelineConfig) -> Self {
        let resolvers = ResolverSet::new(
            Arc::clone(&collaborators.post_reader),
            collaborators.extractor,
            collaborators.code_host,
            collaborators.page_fetcher,
            config.resolver.clone(),
        );
        Self {
            source: collaborators.source,
            expander: collaborators.expander,
            post_reader: collaborators.post_reader,
            resolvers,
            dedup: DedupEngine::new(collaborators.archive),
            queue_store: PendingQueueStore::new(config.store.queue_path.clone()),
            state_store: StateStore::new(config.store.state_path.clone()),
            events: collaborators.events,
            config,
        }
    }

    /// Runs one fetch cycle: fetch, dedup, enrich, merge, update state.
    ///
    /// Only a source fetch failure is fatal; in that case nothing is
    /// written. Item-local failures are collected into the report and do
    /// not change the outcome.
    pub async fn run(&self, options: &RunOptions) -> Result<RunReport, MarkflowError> {
        let run_id = crate::util::generate_run_id();
        let started_at = crate::util::iso_timestamp();
        self.events
            .emit("run.started", Some(serde_json::json!({ "run_id": run_id })))
            .await;

        let batch = self.source.fetch(&options.fetch).await?;
        let fetched = batch.len();

        let queue = self.queue_store.load();
        let pending_ids = queue.ids();
        let outcome = self.dedup.filter(batch, &pending_ids, &options.policy());
        self.events
            .emit(
                "run.deduped",
                Some(serde_json::json!({
                    "run_id": run_id,
                    "kept": outcome.kept.len(),
                    "skipped": outcome.skipped.len(),
                })),
            )
            .await;

        // Fan out over items with bounded concurrency, keeping the original
        // batch index so same-timestamp records merge in source order.
        let concurrency = self.config.max_concurrent.max(1);
        let mut results: Vec<(usize, EnrichedRecord, Vec<FailureRecord>)> =
            futures::stream::iter(outcome.kept.into_iter().enumerate())
                .map(|(idx, bookmark)| async move {
                    let (record, failures) = self.enrich_one(&bookmark).await;
                    (idx, record, failures)
                })
                .buffer_unordered(concurrency)
                .collect()
                .await;
        results.sort_by_key(|(idx, _, _)| *idx);

        let mut failures = Vec::new();
        let mut records = Vec::new();
        for (_, record, item_failures) in results {
            for failure in &item_failures {
                self.events.try_emit(
                    "item.failed",
                    Some(serde_json::json!({
                        "id": failure.id,
                        "stage": failure.stage,
                        "error": failure.error,
                    })),
                );
            }
            failures.extend(item_failures);
            records.push(record);
        }
        let enriched = records.len();

        let merged = self.queue_store.merge_and_save(records)?;
        self.state_store.touch_last_check()?;

        let report = RunReport {
            run_id: run_id.clone(),
            started_at,
            finished_at: crate::util::iso_timestamp(),
            fetched,
            skipped: outcome.skipped,
            enriched,
            failures,
            queue_len: merged.count,
        };
        info!(
            run_id = %run_id,
            fetched = report.fetched,
            enriched = report.enriched,
            skipped = report.skipped.len(),
            failures = report.failures.len(),
            "run completed"
        );
        self.events
            .emit("run.completed", Some(serde_json::json!(report.to_dict())))
            .await;
        Ok(report)
    }

    /// Enriches one bookmark through the full stage sequence.
    ///
    /// Never fails: every per-link or per-lookup failure is recorded and
    /// the record finalizes with null or unavailable content in its place.
    pub async fn enrich_one(&self, bookmark: &Bookmark) -> (EnrichedRecord, Vec<FailureRecord>) {
        let mut failures = Vec::new();
        let mut record = EnrichedRecord::from_bookmark(bookmark);
        self.emit_stage(&bookmark.id, ItemStage::Fetched);

        // Expand embedded links, then classify the destinations.
        let mut links = Vec::new();
        for original in extract_urls(&bookmark.text) {
            let resolved = self.expander.expand(&original).await;
            links.push((original, resolved));
        }
        self.emit_stage(&bookmark.id, ItemStage::LinksExpanded);

        let mut links: Vec<Link> = links
            .into_iter()
            .map(|(original, resolved)| {
                let kind = classify(&resolved);
                Link::new(original, resolved, kind)
            })
            .collect();
        self.emit_stage(&bookmark.id, ItemStage::LinksClassified);

        // Resolve content per link; one link's failure leaves its content
        // null and the siblings untouched.
        let ctx = ResolveCtx {
            bookmark_id: &bookmark.id,
        };
        for link in &mut links {
            match self.resolvers.resolve(link.kind, &link.resolved, ctx).await {
                Ok(content) => link.content = content,
                Err(err) => {
                    warn!(id = %bookmark.id, url = %link.resolved, error = %err, "content resolution failed");
                    failures.push(FailureRecord::new(
                        &bookmark.id,
                        ItemStage::ContentResolved,
                        err.to_string(),
                    ));
                }
            }
        }
        record.links = links;
        self.emit_stage(&bookmark.id, ItemStage::ContentResolved);

        record.reply_context = self.reply_context(bookmark).await;
        record.quote_context = quote_context(bookmark, &record.links);
        self.emit_stage(&bookmark.id, ItemStage::ContextAttached);

        if let Some(ref folder) = bookmark.source_folder {
            record.tags.push(folder.clone());
        }
        // Media rides along only when the enrichment gate is on; the raw
        // record's attachments are otherwise dropped on purpose.
        if self.config.include_media {
            record.media = bookmark.media.clone();
        }
        self.emit_stage(&bookmark.id, ItemStage::Finalized);

        (record, failures)
    }

    /// Best-effort lookup of the post a bookmark replies to.
    async fn reply_context(&self, bookmark: &Bookmark) -> Option<ContextPost> {
        let parent_id = bookmark.reply_to_id.as_deref()?;
        if !is_numeric_id(parent_id) {
            warn!(id = %bookmark.id, parent = %parent_id, "skipping reply lookup for malformed parent id");
            return None;
        }
        match self.post_reader.read_post(parent_id).await {
            Ok(post) => Some(ContextPost {
                id: post.id,
                author: post.author_handle,
                text: post.text,
                url: post.url,
            }),
            Err(err) => {
                warn!(id = %bookmark.id, parent = %parent_id, error = %err, "reply lookup failed");
                None
            }
        }
    }

    fn emit_stage(&self, id: &str, stage: ItemStage) {
        self.events.try_emit(
            "item.stage",
            Some(serde_json::json!({ "id": id, "stage": stage })),
        );
    }
}

/// Quote context, preferring the natively-attached quoted post over any
/// quote-like link resolved from the body text.
fn quote_context(bookmark: &Bookmark, links: &[Link]) -> Option<ContextPost> {
    if let Some(ref quoted) = bookmark.quoted_post {
        return Some(ContextPost {
            id: quoted.id.clone(),
            author: quoted.author_handle.clone(),
            text: quoted.text.clone(),
            url: None,
        });
    }
    links.iter().find_map(|link| match link.content {
        Some(crate::models::Content::QuotedPost {
            ref id,
            ref author,
            ref body,
            ref url,
        }) => Some(ContextPost {
            id: id.clone(),
            author: author.clone(),
            text: body.clone(),
            url: Some(url.clone()),
        }),
        _ => None,
    })
}
