//! Cache Store Module
//!
//! Node-local TTL map. Expiry is checked lazily on read; nothing is ever
//! swept, so expired entries stay resident until the key is written again.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheEntry, Clock, SystemClock};

// == Cache Store ==
/// Key-value storage with per-entry TTL.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Time source for stamping and checking expiry
    clock: Arc<dyn Clock>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store on the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
        }
    }

    // == Set ==
    /// Stores a key-value pair, replacing any previous entry for the key.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - TTL in seconds; zero or negative stores an already expired entry
    pub fn set(&mut self, key: String, value: String, ttl: i64) {
        let entry = CacheEntry::new(value, ttl, self.clock.now_ms());
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Returns the value if the key is present and not yet expired.
    ///
    /// An expired key looks exactly like an absent one.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    // == Length ==
    /// Returns the number of resident entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no entry was ever written.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
