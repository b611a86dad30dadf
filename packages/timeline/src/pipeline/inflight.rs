//! Per-key single-flight guard.
//!
//! Concurrent cache misses for the same normalized query serialize on a
//! per-key lock, so only the first one fetches, generates and persists.
//! Later holders re-check the cache after acquiring the key.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Map of keys currently being resolved.
#[derive(Default)]
pub struct InFlight {
    keys: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other request holds `key`, then hold it.
    pub async fn acquire(&self, key: &str) -> InFlightGuard<'_> {
        let lock = {
            let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
            keys.entry(key.to_string()).or_default().clone()
        };

        let permit = lock.lock_owned().await;

        InFlightGuard {
            owner: self,
            key: key.to_string(),
            permit: Some(permit),
        }
    }

    /// Number of keys with a holder or waiter.
    pub fn len(&self) -> usize {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Holds a key until dropped.
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
    key: String,
    permit: Option<OwnedMutexGuard<()>>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut keys = self
            .owner
            .keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Map entry + our permit: nobody else is waiting on this key
        if keys
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 2)
        {
            keys.remove(&self.key);
        }

        // Release while the map is still locked so a new acquirer can't
        // clone the removed entry in between
        self.permit.take();
    }
}
