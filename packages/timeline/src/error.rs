//! Typed errors for the timeline library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Only fatal conditions live
//! here: best-effort collaborators report failure through
//! [`BestEffort`](crate::types::best_effort::BestEffort) instead.

use thiserror::Error;

/// Errors that can fail a timeline request.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// Query was missing or blank
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// An external provider failed (transport, status, or response shape)
    #[error("{provider} request failed: {source}")]
    Provider {
        provider: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A provider answered, but not in the expected shape
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TimelineError {
    /// Wrap a provider failure, tagging it with the provider's name.
    pub fn provider(
        provider: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            source: source.into(),
        }
    }

    /// Wrap a storage failure.
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage(source.into())
    }

    /// Whether the caller supplied bad input (as opposed to an infrastructure failure).
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Self::InvalidQuery { .. })
    }
}

#[cfg(any(feature = "sqlite", feature = "postgres"))]
impl From<sqlx::Error> for TimelineError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Result type alias for timeline operations.
pub type Result<T> = std::result::Result<T, TimelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_message_names_provider() {
        let err = TimelineError::provider("wikipedia", "connection reset");
        assert_eq!(err.to_string(), "wikipedia request failed: connection reset");
        assert!(!err.is_invalid_query());
    }

    #[test]
    fn test_invalid_query_is_flagged() {
        let err = TimelineError::InvalidQuery {
            reason: "query must not be empty".to_string(),
        };
        assert!(err.is_invalid_query());
    }
}
