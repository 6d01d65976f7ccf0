//! Cache Module
//!
//! Node-local in-memory storage with lazily checked TTL expiration.

mod clock;
mod entry;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use store::CacheStore;
