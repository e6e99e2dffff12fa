/// Search orchestrator: fetch, filter, enrich, score, rank, cache
use crate::cache::{result_key, subscriber_key, CacheStore, CACHE_TTL_SECONDS};
use crate::error::SearchFailed;
use crate::models::{ScoredVideo, VideoCandidate};
use crate::ranking::{composite_score, is_short_form};
use crate::youtube::VideoSource;
use anyhow::Result;
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Over-fetch size to compensate for short-form filtering
const MAX_CANDIDATES: u32 = 50;
/// Cap on the returned result list
const MAX_RESULTS: usize = 20;

/// Coordinates the whole keyword-to-ranked-list pipeline.
///
/// Both collaborators are injected: the video source so tests run without
/// network traffic, the cache store so a fake replaces the filesystem.
pub struct SearchOrchestrator {
    source: Arc<dyn VideoSource>,
    cache: Arc<dyn CacheStore>,
}

impl SearchOrchestrator {
    pub fn new(source: Arc<dyn VideoSource>, cache: Arc<dyn CacheStore>) -> Self {
        Self { source, cache }
    }

    /// Run a keyword search and return up to 20 videos, best score first.
    ///
    /// An empty or whitespace-only keyword yields an empty list without
    /// touching the source or the cache. Any error escaping the pipeline
    /// is logged once and surfaced as a single [`SearchFailed`].
    pub async fn search(&self, keyword: &str) -> Result<Vec<ScoredVideo>, SearchFailed> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            debug!("empty keyword, returning empty result set");
            return Ok(Vec::new());
        }

        if let Some(cached) = self.cached_results(keyword).await {
            info!("serving {} cached results for '{}'", cached.len(), keyword);
            return Ok(cached);
        }

        match self.run_pipeline(keyword).await {
            Ok(results) => Ok(results),
            Err(e) => {
                error!("search pipeline failed for '{}': {:#}", keyword, e);
                Err(SearchFailed::new(e))
            }
        }
    }

    /// Read a previously computed result set, treating any cache problem
    /// as a miss
    async fn cached_results(&self, keyword: &str) -> Option<Vec<ScoredVideo>> {
        let payload = self.cache.get(&result_key(keyword)).await?;
        match serde_json::from_str(&payload) {
            Ok(results) => Some(results),
            Err(e) => {
                warn!("discarding unreadable cached result set: {}", e);
                None
            }
        }
    }

    async fn run_pipeline(&self, keyword: &str) -> Result<Vec<ScoredVideo>> {
        let candidates = self.source.search(keyword, MAX_CANDIDATES).await?;
        if candidates.is_empty() {
            info!("no candidates for '{}'", keyword);
            return Ok(Vec::new());
        }
        debug!("fetched {} candidates for '{}'", candidates.len(), keyword);

        let survivors = self.filter_short_form(candidates).await;
        debug!("{} candidates survive short-form filtering", survivors.len());

        let mut results = self.enrich_and_score(survivors).await;

        // Stable sort: equal scores keep their pre-sort relative order
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(MAX_RESULTS);

        self.store_results(keyword, &results).await;
        info!("returning {} results for '{}'", results.len(), keyword);
        Ok(results)
    }

    /// Drop every candidate the classifier marks as short-form.
    ///
    /// Classification runs concurrently per candidate; `join_all` keeps
    /// the verdicts in candidate order.
    async fn filter_short_form(&self, candidates: Vec<VideoCandidate>) -> Vec<VideoCandidate> {
        let verdicts = join_all(
            candidates
                .iter()
                .map(|c| is_short_form(self.source.as_ref(), c)),
        )
        .await;

        candidates
            .into_iter()
            .zip(verdicts)
            .filter_map(|(candidate, short)| (!short).then_some(candidate))
            .collect()
    }

    /// Fetch statistics for every survivor and attach a composite score.
    ///
    /// Fetches run concurrently but the output stays in candidate order;
    /// ranking is decided by the sort, never by fetch completion order.
    async fn enrich_and_score(&self, candidates: Vec<VideoCandidate>) -> Vec<ScoredVideo> {
        let now = Utc::now();
        join_all(candidates.into_iter().map(|candidate| async move {
            let view_count = match self.source.video_statistics(&candidate.video_id).await {
                Ok(stats) => stats.view_count,
                Err(e) => {
                    warn!(
                        "view count fetch failed for {}, defaulting to 0: {}",
                        candidate.video_id, e
                    );
                    0
                }
            };
            let subscriber_count = self.subscriber_count(&candidate.channel_id).await;
            let score = composite_score(candidate.published_at, view_count, subscriber_count, now);

            ScoredVideo {
                candidate,
                view_count,
                subscriber_count,
                score,
            }
        }))
        .await
    }

    /// Subscriber count for a channel, cache first, live fetch on a miss.
    /// Fetch failures degrade to 0 rather than aborting the item.
    async fn subscriber_count(&self, channel_id: &str) -> u64 {
        let key = subscriber_key(channel_id);
        if let Some(cached) = self.cache.get(&key).await {
            if let Ok(count) = cached.trim().parse::<u64>() {
                return count;
            }
            warn!("discarding unreadable cached subscriber count for {}", channel_id);
        }

        match self.source.channel_statistics(channel_id).await {
            Ok(stats) => {
                self.cache
                    .put(&key, &stats.subscriber_count.to_string(), CACHE_TTL_SECONDS)
                    .await;
                stats.subscriber_count
            }
            Err(e) => {
                warn!(
                    "subscriber count fetch failed for {}, defaulting to 0: {}",
                    channel_id, e
                );
                0
            }
        }
    }

    /// Persist the final ordered list; a failed write is logged by the
    /// store and never fails the search
    async fn store_results(&self, keyword: &str, results: &[ScoredVideo]) {
        match serde_json::to_string(results) {
            Ok(payload) => {
                self.cache
                    .put(&result_key(keyword), &payload, CACHE_TTL_SECONDS)
                    .await;
            }
            Err(e) => warn!("failed to serialize result set for caching: {}", e),
        }
    }
}
