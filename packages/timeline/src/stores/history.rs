//! In-memory per-user search history.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Result, TimelineError};
use crate::traits::history::SearchHistory;

/// Maximum number of terms kept per user.
pub const HISTORY_LIMIT: usize = 10;

/// Search history kept in memory, most recent first.
#[derive(Default)]
pub struct MemorySearchHistory {
    terms: RwLock<HashMap<String, Vec<String>>>,
}

impl MemorySearchHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> TimelineError {
    TimelineError::storage("search history lock poisoned")
}

#[async_trait]
impl SearchHistory for MemorySearchHistory {
    async fn record(&self, user: &str, term: &str) -> Result<Vec<String>> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Err(TimelineError::InvalidQuery {
                reason: "search term must not be empty".to_string(),
            });
        }

        let mut terms = self.terms.write().map_err(poisoned)?;
        let history = terms.entry(user.to_string()).or_default();

        if !history.contains(&term) {
            history.insert(0, term);
            history.truncate(HISTORY_LIMIT);
        }

        Ok(history.clone())
    }

    async fn recent(&self, user: &str) -> Result<Vec<String>> {
        Ok(self
            .terms
            .read()
            .map_err(poisoned)?
            .get(user)
            .cloned()
            .unwrap_or_default())
    }
}
