//! Per-user search history.

use async_trait::async_trait;

use crate::error::Result;

/// Bounded list of recent search terms per user, most recent first.
#[async_trait]
pub trait SearchHistory: Send + Sync {
    /// Record a term for a user. Returns the updated history.
    ///
    /// Terms are trimmed and lower-cased. A term already in the history is
    /// left where it is. Blank terms are rejected.
    async fn record(&self, user: &str, term: &str) -> Result<Vec<String>>;

    /// The user's recent terms (empty for unknown users).
    async fn recent(&self, user: &str) -> Result<Vec<String>>;
}
