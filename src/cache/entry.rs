//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Cache Entry ==
/// A stored value and the instant it stops being served.
///
/// Entries are never mutated; a new write replaces the whole entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: i64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl_seconds` after `now_ms`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_seconds` - TTL in seconds; zero or negative gives an entry that is already expired
    /// * `now_ms` - Current time in Unix milliseconds
    pub fn new(value: String, ttl_seconds: i64, now_ms: i64) -> Self {
        let expires_at = now_ms.saturating_add(ttl_seconds.saturating_mul(1000));

        Self { value, expires_at }
    }

    // == Is Live ==
    /// An entry is live strictly before its expiry instant.
    pub fn is_live(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at
    }
}
