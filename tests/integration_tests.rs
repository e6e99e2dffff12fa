use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tempfile::TempDir;

use yt_ranker::cache::{result_key, CacheStore, FileCacheStore};
use yt_ranker::models::{ChannelStatistics, ScoredVideo, VideoCandidate, VideoStatistics};
use yt_ranker::search::SearchOrchestrator;
use yt_ranker::youtube::VideoSource;

/// Scripted video source for end-to-end runs.
///
/// Every tenth candidate is tagged short-form via its duration; view and
/// subscriber counts grow with the candidate index so the expected ranking
/// is easy to reason about.
struct ScriptedSource {
    candidates: Vec<VideoCandidate>,
}

impl ScriptedSource {
    fn with_lofi_catalog() -> Self {
        let now = Utc::now();
        let candidates = (1..=50)
            .map(|n| VideoCandidate {
                video_id: format!("vid{:02}", n),
                title: format!("lofi mix {}", n),
                description: "beats to relax to".to_string(),
                channel_id: format!("UC{:02}", n),
                channel_title: format!("Channel {:02}", n),
                published_at: now - Duration::days(n as i64),
                duration: None,
            })
            .collect();
        Self { candidates }
    }

    fn index(video_id: &str) -> u64 {
        video_id.trim_start_matches("vid").parse().unwrap_or(0)
    }
}

#[async_trait]
impl VideoSource for ScriptedSource {
    async fn search(&self, _query: &str, max_results: u32) -> Result<Vec<VideoCandidate>> {
        Ok(self
            .candidates
            .iter()
            .take(max_results as usize)
            .cloned()
            .collect())
    }

    async fn video_statistics(&self, video_id: &str) -> Result<VideoStatistics> {
        Ok(VideoStatistics {
            view_count: Self::index(video_id) * 10_000,
        })
    }

    async fn content_duration(&self, video_id: &str) -> Result<Option<String>> {
        // Multiples of five are 45-second clips, everything else runs long
        if Self::index(video_id) % 5 == 0 {
            Ok(Some("PT45S".to_string()))
        } else {
            Ok(Some("PT8M20S".to_string()))
        }
    }

    async fn channel_statistics(&self, channel_id: &str) -> Result<ChannelStatistics> {
        let n: u64 = channel_id.trim_start_matches("UC").parse().unwrap_or(0);
        Ok(ChannelStatistics {
            subscriber_count: n * 1_000,
        })
    }
}

async fn file_cache(dir: &TempDir) -> Arc<FileCacheStore> {
    let cache = FileCacheStore::new(dir.path().to_path_buf());
    cache.initialize().await.unwrap();
    Arc::new(cache)
}

#[tokio::test]
async fn test_end_to_end_lofi_search() {
    let temp_dir = TempDir::new().unwrap();
    let cache = file_cache(&temp_dir).await;
    let orchestrator = SearchOrchestrator::new(Arc::new(ScriptedSource::with_lofi_catalog()), cache);

    let results = orchestrator.search("lofi").await.unwrap();

    // 50 candidates, 10 short clips removed, capped at 20
    assert_eq!(results.len(), 20);

    // No 45-second clip survives
    assert!(results
        .iter()
        .all(|r| ScriptedSource::index(&r.candidate.video_id) % 5 != 0));

    // Descending score order
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    // Statistics were attached during enrichment
    assert!(results.iter().all(|r| r.view_count > 0));
    assert!(results.iter().all(|r| r.subscriber_count > 0));
}

#[tokio::test]
async fn test_result_set_is_cached_under_normalized_key() {
    let temp_dir = TempDir::new().unwrap();
    let cache = file_cache(&temp_dir).await;
    let orchestrator =
        SearchOrchestrator::new(Arc::new(ScriptedSource::with_lofi_catalog()), cache.clone());

    let results = orchestrator.search("  LoFi ").await.unwrap();

    let payload = cache.get(&result_key("lofi")).await.expect("cached entry");
    let cached: Vec<ScoredVideo> = serde_json::from_str(&payload).unwrap();

    assert_eq!(cached.len(), results.len());
    for (live, stored) in results.iter().zip(&cached) {
        assert_eq!(live.candidate.video_id, stored.candidate.video_id);
        assert_eq!(live.view_count, stored.view_count);
        assert_eq!(live.score, stored.score);
    }
}

#[tokio::test]
async fn test_repeat_search_survives_source_outage() {
    struct FailingSource;

    #[async_trait]
    impl VideoSource for FailingSource {
        async fn search(&self, _q: &str, _m: u32) -> Result<Vec<VideoCandidate>> {
            anyhow::bail!("api unavailable")
        }
        async fn video_statistics(&self, _v: &str) -> Result<VideoStatistics> {
            anyhow::bail!("api unavailable")
        }
        async fn content_duration(&self, _v: &str) -> Result<Option<String>> {
            anyhow::bail!("api unavailable")
        }
        async fn channel_statistics(&self, _c: &str) -> Result<ChannelStatistics> {
            anyhow::bail!("api unavailable")
        }
    }

    let temp_dir = TempDir::new().unwrap();
    let cache = file_cache(&temp_dir).await;

    // Warm the cache with a working source
    let orchestrator =
        SearchOrchestrator::new(Arc::new(ScriptedSource::with_lofi_catalog()), cache.clone());
    let warm = orchestrator.search("lofi").await.unwrap();
    assert_eq!(warm.len(), 20);

    // The cached set keeps serving after the source goes dark
    let degraded = SearchOrchestrator::new(Arc::new(FailingSource), cache);
    let served = degraded.search("lofi").await.unwrap();
    assert_eq!(served.len(), 20);

    // An uncached query against the dark source fails loudly
    let err = degraded.search("jazz").await.unwrap_err();
    assert!(err.to_string().contains("search failed"));
    assert!(err.to_string().contains("api unavailable"));
}

#[tokio::test]
async fn test_keyword_tagged_long_video_is_filtered() {
    let mut source = ScriptedSource::with_lofi_catalog();
    source.candidates[0].title = "lofi mix 1 #shorts".to_string();

    let temp_dir = TempDir::new().unwrap();
    let cache = file_cache(&temp_dir).await;
    let orchestrator = SearchOrchestrator::new(Arc::new(source), cache);

    let results = orchestrator.search("lofi").await.unwrap();
    assert!(results.iter().all(|r| r.candidate.video_id != "vid01"));
}

#[tokio::test]
async fn test_empty_keyword_short_circuits() {
    let temp_dir = TempDir::new().unwrap();
    let cache = file_cache(&temp_dir).await;
    let orchestrator = SearchOrchestrator::new(Arc::new(ScriptedSource::with_lofi_catalog()), cache);

    assert!(orchestrator.search("").await.unwrap().is_empty());
    assert!(orchestrator.search(" \n\t ").await.unwrap().is_empty());

    // No cache file may be written for the empty query
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}
