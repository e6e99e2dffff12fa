/// Shared data types for the search-and-rank pipeline
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate video returned by the search source, immutable once fetched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoCandidate {
    /// Video identifier
    pub video_id: String,
    /// Video title
    pub title: String,
    /// Video description (may be truncated by the source)
    pub description: String,
    /// Owning channel identifier
    pub channel_id: String,
    /// Owning channel display name
    pub channel_title: String,
    /// Publish timestamp
    pub published_at: DateTime<Utc>,
    /// ISO-8601 duration encoding, when the source response carried one
    pub duration: Option<String>,
}

/// Per-video view statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoStatistics {
    /// Total view count (0 when absent or malformed upstream)
    pub view_count: u64,
}

/// Per-channel subscriber statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelStatistics {
    /// Subscriber count (0 when absent, hidden, or malformed upstream)
    pub subscriber_count: u64,
}

/// A candidate enriched with statistics and a composite ranking score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredVideo {
    /// The underlying candidate
    pub candidate: VideoCandidate,
    /// View count at scoring time
    pub view_count: u64,
    /// Channel subscriber count at scoring time
    pub subscriber_count: u64,
    /// Composite ranking score (higher ranks first)
    pub score: f64,
}
