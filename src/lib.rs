/// YouTube Search & Rank
///
/// Keyword search over the YouTube Data API with short-form filtering,
/// composite recency/popularity/authority scoring, and a TTL result cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod ranking;
pub mod search;
pub mod youtube;

// Re-export main types for easy access
pub use crate::cache::{CacheStore, FileCacheStore, MemoryCacheStore};
pub use crate::config::Config;
pub use crate::error::SearchFailed;
pub use crate::models::{ChannelStatistics, ScoredVideo, VideoCandidate, VideoStatistics};
pub use crate::search::SearchOrchestrator;
pub use crate::youtube::{VideoSource, YouTubeClient};
