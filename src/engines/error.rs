//! Search client errors

use super::traits::SearchVariant;

/// Failures that reach the caller of a search
///
/// Transport problems are retried before they surface as `Transient`. A
/// response with the wrong shape is reported right away as
/// `MalformedResponse`, since asking again returns the same shape.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("{variant} search failed after {attempts} attempt(s): {source}")]
    Transient {
        variant: SearchVariant,
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },

    #[error("malformed {variant} search response: {reason}")]
    MalformedResponse {
        variant: SearchVariant,
        reason: String,
    },
}

impl SearchError {
    /// Whether retrying could have helped
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}
