/// Short-form content classification
use super::duration::parse_iso8601_seconds;
use crate::models::VideoCandidate;
use crate::youtube::VideoSource;
use tracing::{debug, warn};

/// Anything at or below this runs as short-form
const SHORT_FORM_MAX_SECONDS: u64 = 60;

/// Indicator terms checked against lower-cased title and description.
/// English variants plus the Korean ones the service's audience uses.
const SHORT_FORM_TERMS: &[&str] = &[
    "#shorts", "#short", "shorts", "short", "쇼츠", "숏츠", "숏폼",
];

/// Decide whether a candidate is short-form content.
///
/// A candidate is short-form when an indicator term appears in its title or
/// description, or when its duration is 60 seconds or less. If no duration
/// is attached to the candidate it is fetched from the source; a failed or
/// empty fetch falls back to the keyword verdict alone, so a classification
/// hiccup never drops a legitimate result.
pub async fn is_short_form(source: &dyn VideoSource, candidate: &VideoCandidate) -> bool {
    let keyword_flag = has_short_form_term(&candidate.title, &candidate.description);

    let duration = match &candidate.duration {
        Some(encoded) => Some(encoded.clone()),
        None => match source.content_duration(&candidate.video_id).await {
            Ok(duration) => duration,
            Err(e) => {
                warn!(
                    "duration lookup failed for {}, keeping keyword verdict: {}",
                    candidate.video_id, e
                );
                None
            }
        },
    };

    match duration {
        Some(encoded) => {
            let seconds = parse_iso8601_seconds(&encoded);
            let verdict = keyword_flag || seconds <= SHORT_FORM_MAX_SECONDS;
            debug!(
                "classified {} ({}s, keyword={}): short_form={}",
                candidate.video_id, seconds, keyword_flag, verdict
            );
            verdict
        }
        None => keyword_flag,
    }
}

fn has_short_form_term(title: &str, description: &str) -> bool {
    let title = title.to_lowercase();
    let description = description.to_lowercase();
    SHORT_FORM_TERMS
        .iter()
        .any(|term| title.contains(term) || description.contains(term))
}
