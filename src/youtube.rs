/// YouTube Data API v3 client
use crate::models::{ChannelStatistics, VideoCandidate, VideoStatistics};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Source of video candidates and statistics.
///
/// The orchestrator only talks to this trait, so tests can swap in a mock
/// without any network traffic.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Search for video-type results matching the query
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<VideoCandidate>>;

    /// Fetch view statistics for a single video
    async fn video_statistics(&self, video_id: &str) -> Result<VideoStatistics>;

    /// Fetch the ISO-8601 content duration for a video, if the source
    /// reports one
    async fn content_duration(&self, video_id: &str) -> Result<Option<String>>;

    /// Fetch subscriber statistics for a channel
    async fn channel_statistics(&self, channel_id: &str) -> Result<ChannelStatistics>;
}

/// Live client against the YouTube Data API v3
#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    region_code: String,
}

impl YouTubeClient {
    /// Create a new client with a bounded per-request timeout
    pub fn new(api_key: String, region_code: String, timeout_seconds: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            region_code,
        }
    }

    fn endpoint(&self, resource: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", API_BASE_URL, resource))?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value> {
        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "YouTube API returned HTTP {} for {}",
                response.status(),
                url.path()
            ));
        }
        Ok(response.json().await?)
    }

    /// Pull the items array out of a list response, tolerating its absence
    fn items(body: &Value) -> Vec<Value> {
        body.get("items")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default()
    }

    /// Counts arrive as JSON strings ("12345"); absent or malformed → 0
    fn parse_count(stats: Option<&Value>, field: &str) -> u64 {
        stats
            .and_then(|s| s.get(field))
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0)
    }

    fn parse_candidate(item: &Value) -> Option<VideoCandidate> {
        let video_id = item
            .get("id")
            .and_then(|id| id.get("videoId"))
            .and_then(|v| v.as_str())?
            .to_string();
        let snippet = item.get("snippet")?;

        let text = |field: &str| -> String {
            snippet
                .get(field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        let published_at = snippet
            .get("publishedAt")
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))?;

        Some(VideoCandidate {
            video_id,
            title: text("title"),
            description: text("description"),
            channel_id: text("channelId"),
            channel_title: text("channelTitle"),
            published_at,
            // search.list responses carry no contentDetails; the classifier
            // fetches the duration separately when it needs one
            duration: None,
        })
    }
}

#[async_trait]
impl VideoSource for YouTubeClient {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<VideoCandidate>> {
        let max_results = max_results.to_string();
        let url = self.endpoint(
            "search",
            &[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("maxResults", &max_results),
                ("regionCode", &self.region_code),
            ],
        )?;

        let body = self.get_json(url).await?;
        let candidates: Vec<VideoCandidate> = Self::items(&body)
            .iter()
            .filter_map(Self::parse_candidate)
            .collect();

        debug!("search returned {} candidates", candidates.len());
        Ok(candidates)
    }

    async fn video_statistics(&self, video_id: &str) -> Result<VideoStatistics> {
        let url = self.endpoint("videos", &[("part", "statistics"), ("id", video_id)])?;
        let body = self.get_json(url).await?;

        let stats = Self::items(&body)
            .first()
            .and_then(|item| item.get("statistics").cloned());
        if stats.is_none() {
            warn!("no statistics returned for video {}", video_id);
        }

        Ok(VideoStatistics {
            view_count: Self::parse_count(stats.as_ref(), "viewCount"),
        })
    }

    async fn content_duration(&self, video_id: &str) -> Result<Option<String>> {
        let url = self.endpoint("videos", &[("part", "contentDetails"), ("id", video_id)])?;
        let body = self.get_json(url).await?;

        Ok(Self::items(&body)
            .first()
            .and_then(|item| item.get("contentDetails"))
            .and_then(|cd| cd.get("duration"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }

    async fn channel_statistics(&self, channel_id: &str) -> Result<ChannelStatistics> {
        let url = self.endpoint("channels", &[("part", "statistics"), ("id", channel_id)])?;
        let body = self.get_json(url).await?;

        let stats = Self::items(&body)
            .first()
            .and_then(|item| item.get("statistics").cloned());

        Ok(ChannelStatistics {
            subscriber_count: Self::parse_count(stats.as_ref(), "subscriberCount"),
        })
    }
}
