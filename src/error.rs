use thiserror::Error;

/// Caller-facing search failure.
///
/// The orchestrator wraps whatever went wrong mid-pipeline into this one
/// error; partial results are never surfaced alongside it.
#[derive(Debug, Error)]
#[error("search failed: {message}")]
pub struct SearchFailed {
    /// Human-readable underlying cause
    pub message: String,
}

impl SearchFailed {
    pub fn new(cause: impl std::fmt::Display) -> Self {
        Self {
            message: cause.to_string(),
        }
    }
}
