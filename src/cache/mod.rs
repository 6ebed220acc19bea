//! Cache Module
//!
//! In-memory caching with lazy TTL expiration and LRU eviction.
//!
//! Entries and the recency list are engine internals and not exported:
//!
//! ```compile_fail
//! use ttl_lru_cache::cache::CacheEntry;
//! ```
//!
//! ```compile_fail
//! use ttl_lru_cache::cache::RecencyList;
//! ```

mod clock;
mod entry;
mod lru;
mod shared;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub(crate) use entry::CacheEntry;
pub use shared::Cache;
pub use store::CacheStore;
