//! TTL LRU Cache - a bounded, self-cleaning in-memory lookup layer
//!
//! Generic key-value cache combining least-recently-used capacity eviction
//! with per-entry time-to-live. Expiry is lazy: an expired entry is removed
//! when a read finds it, or when it is chosen for eviction. There is no
//! background sweeper.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Cache, CacheStore, Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
