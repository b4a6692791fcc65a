//! In-memory response cache
//!
//! Successful gateway responses are memoized for the lifetime of the process,
//! keyed by the canonical `(endpoint, params)` string. An optional TTL bounds
//! staleness; without one, entries live until an explicit [`ResponseCache::clear`].
//! Expired entries are dropped lazily on lookup.

use crate::clock::Clock;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// A process-lifetime cache of raw JSON responses.
///
/// Safe to share across threads; concurrent writers to the same key simply
/// overwrite each other, which is acceptable because every successful write
/// for a key holds an equally valid response.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    /// Creates a cache with an optional time-to-live per entry.
    ///
    /// # Arguments
    ///
    /// * `ttl` - Maximum entry age, or `None` for process-lifetime entries
    /// * `clock` - Time source used for expiry checks
    pub fn new(ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Returns the cached value for a key, if present and not expired.
    pub fn load(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock();

        if let Some(ttl) = self.ttl {
            let expired = entries
                .get(key)
                .is_some_and(|entry| self.clock.now().duration_since(entry.stored_at) >= ttl);
            if expired {
                entries.remove(key);
                return None;
            }
        }

        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Stores a value under the given key, replacing any previous entry.
    pub fn store(&self, key: &str, value: Value) {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
        };
        self.entries.lock().insert(key.to_string(), entry);
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Returns the number of live entries.
    ///
    /// Expired-but-not-yet-pruned entries are counted; they disappear on the
    /// next `load` that touches them or on `clear`.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
