//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Result, TimelineError};
use crate::traits::store::TimelineStore;
use crate::types::record::TimelineRecord;

/// In-memory timeline cache.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, TimelineRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all cached records.
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.write() {
            records.clear();
        }
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> TimelineError {
    TimelineError::storage("memory store lock poisoned")
}

#[async_trait]
impl TimelineStore for MemoryStore {
    async fn get(&self, query: &str) -> Result<Option<TimelineRecord>> {
        Ok(self.records.read().map_err(poisoned)?.get(query).cloned())
    }

    async fn put(&self, record: &TimelineRecord) -> Result<()> {
        self.records
            .write()
            .map_err(poisoned)?
            .entry(record.query.clone())
            .or_insert_with(|| record.clone());
        Ok(())
    }
}
