//! Cache store trait for timeline records.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::record::TimelineRecord;

/// Keyed read/insert of timeline records by normalized query.
///
/// There is no update or delete. `put` on an existing key keeps the first
/// record; the orchestrator only calls it after `get` came back empty.
#[async_trait]
pub trait TimelineStore: Send + Sync {
    /// Get a cached record by normalized query.
    async fn get(&self, query: &str) -> Result<Option<TimelineRecord>>;

    /// Insert a new record.
    async fn put(&self, record: &TimelineRecord) -> Result<()>;
}
