//! Shared Cache Handle
//!
//! Thread-safe wrapper serializing every operation through one lock.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheStore, Clock};
use crate::config::CacheConfig;
use crate::error::Result;

// == Cache ==
/// Thread-safe LRU cache with per-entry TTL.
///
/// Cloning the handle is cheap and every clone refers to the same cache.
/// Each call holds the lock only for its own O(1) work (except
/// [`purge_expired`](Self::purge_expired), [`keys`](Self::keys) and
/// [`clear`](Self::clear), which are linear), so every operation is
/// linearizable.
///
/// Values are handed out as clones; wrap large values in an `Arc`.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ttl_lru_cache::Cache;
///
/// let cache = Cache::new(2);
/// cache.set("a", 1, Duration::from_secs(10));
/// cache.set("b", 2, Duration::from_secs(10));
/// assert_eq!(cache.get("a"), Some(1));
///
/// cache.set("c", 3, Duration::from_secs(10)); // evicts "b"
/// assert_eq!(cache.get("b"), None);
/// ```
#[derive(Debug)]
pub struct Cache<K, V> {
    inner: Arc<Mutex<CacheStore<K, V>>>,
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> From<CacheStore<K, V>> for Cache<K, V> {
    fn from(store: CacheStore<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 is accepted: such a cache never retains anything.
    /// Use [`from_config`](Self::from_config) to reject it.
    pub fn new(capacity: usize) -> Self {
        CacheStore::new(capacity).into()
    }

    /// Creates a cache from a validated configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Ok(CacheStore::from_config(config)?.into())
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(capacity: usize, clock: impl Clock + 'static) -> Self {
        CacheStore::new(capacity).with_clock(clock).into()
    }

    /// Inserts or updates `key`; see [`CacheStore::set`].
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        self.inner.lock().set(key, value, ttl);
    }

    /// Inserts or updates `key` with the configured default TTL.
    pub fn set_default(&self, key: K, value: V) {
        self.inner.lock().set_default(key, value);
    }

    /// Removes `key` if present. Returns whether it was.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().delete(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Snapshot of the keys, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Looks up `key`, marking it most recently used on a hit.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::thread;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_cache_is_send_sync() {
        assert_send_sync::<Cache<String, String>>();
        assert_send_sync::<Cache<u64, Arc<Vec<u8>>>>();
    }

    #[test]
    fn test_clones_share_state() {
        let cache = Cache::new(10);
        let other = cache.clone();

        cache.set("key", "value", Duration::from_secs(10));

        assert_eq!(other.get("key"), Some("value"));
        other.delete("key");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_with_clock_expiry() {
        let clock = ManualClock::new();
        let cache = Cache::with_clock(10, clock.clone());

        cache.set("k", 1, Duration::from_secs(1));
        clock.advance(Duration::from_secs(2));

        assert!(!cache.contains("k"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_threads_respect_capacity() {
        let cache: Cache<String, usize> = Cache::new(16);

        let handles: Vec<_> = (0..8)
            .map(|id| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..500 {
                        let key = format!("{}-{}", id, i % 40);
                        match i % 3 {
                            0 => cache.set(key, i, Duration::from_secs(5)),
                            1 => {
                                cache.get(&key);
                            }
                            _ => {
                                cache.delete(&key);
                            }
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker panicked");
        }

        assert!(cache.len() <= 16);
        cache.inner.lock().assert_consistent();
    }
}
