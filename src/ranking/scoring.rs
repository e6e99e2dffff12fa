/// Composite ranking score from recency, views, and subscriber count
use chrono::{DateTime, Utc};

/// Weight given to the recency sub-score
const RECENCY_WEIGHT: f64 = 0.5;
/// Weight given to the view-count sub-score
const VIEW_WEIGHT: f64 = 0.3;
/// Weight given to the subscriber-count sub-score
const SUBSCRIBER_WEIGHT: f64 = 0.2;

const ONE_YEAR_MS: f64 = 365.0 * 24.0 * 60.0 * 60.0 * 1000.0;

/// Compute the composite ranking score for a video.
///
/// Recency decays linearly from 1 to 0 over one year and is floored at 0
/// for anything older. View and subscriber counts contribute on a log10
/// scale; the +1 keeps the logarithm defined at zero. Weights are fixed
/// ranking policy, not tunable per call.
pub fn composite_score(
    published_at: DateTime<Utc>,
    view_count: u64,
    subscriber_count: u64,
    now: DateTime<Utc>,
) -> f64 {
    let age_ms = (now - published_at).num_milliseconds() as f64;
    let recency = (1.0 - age_ms / ONE_YEAR_MS).max(0.0);
    let views = ((view_count as f64) + 1.0).log10() / 10.0;
    let subscribers = ((subscriber_count as f64) + 1.0).log10() / 10.0;

    RECENCY_WEIGHT * recency + VIEW_WEIGHT * views + SUBSCRIBER_WEIGHT * subscribers
}
