/// Ranking pipeline pieces: duration parsing, short-form classification,
/// and composite scoring.

pub mod duration;
pub mod scoring;
pub mod shorts;

pub use duration::parse_iso8601_seconds;
pub use scoring::composite_score;
pub use shorts::is_short_form;
