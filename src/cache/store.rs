//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with the recency list and
//! lazy TTL expiration. Not synchronized; see [`Cache`](crate::Cache) for
//! the shared handle.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::cache::lru::{RecencyList, SlotId};
use crate::cache::{CacheEntry, Clock, SystemClock};
use crate::config::{CacheConfig, DEFAULT_TTL};
use crate::error::Result;

// == Cache Store ==
/// Cache storage with LRU eviction and lazy TTL expiry.
///
/// The index maps each key to its slot in the recency list. Both structures
/// always hold the same set of keys.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key -> slot lookup
    index: HashMap<K, SlotId>,
    /// Entries in recency order
    recency: RecencyList<K, V>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL used by `set_default`
    default_ttl: Duration,
    clock: Box<dyn Clock>,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// No validation is done. With a capacity of 0 the store never retains
    /// anything: every insert of a new key is dropped and every get misses.
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            warn!("cache created with zero capacity, inserts will be dropped");
        }
        debug!(capacity, "cache store created");

        Self {
            index: HashMap::new(),
            recency: RecencyList::new(),
            capacity,
            default_ttl: DEFAULT_TTL,
            clock: Box::new(SystemClock),
        }
    }

    /// Creates a CacheStore from a validated configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.capacity).with_default_ttl(config.default_ttl))
    }

    /// Replaces the time source used for expiry.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the TTL used by `set_default`.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    // == Set ==
    /// Stores a key-value pair that expires `ttl` from now.
    ///
    /// If the key already exists, the value is overwritten, the TTL restarts
    /// and the key becomes most recently used. If the key is new and the
    /// store is full, the least recently used entry is evicted first,
    /// whether or not it has expired.
    ///
    /// A zero `ttl` stores an entry that never expires.
    pub fn set(&mut self, key: K, value: V, ttl: Duration) {
        let now = self.clock.now();

        if let Some(&slot) = self.index.get(&key) {
            if let Some(entry) = self.recency.get_mut(slot) {
                entry.refresh(value, now, ttl);
            }
            self.recency.move_to_front(slot);
            return;
        }

        if self.capacity == 0 {
            trace!("zero capacity, insert dropped");
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let slot = self
            .recency
            .push_front(CacheEntry::new(key.clone(), value, now, ttl));
        self.index.insert(key, slot);
    }

    /// Stores a key-value pair with the default TTL.
    pub fn set_default(&mut self, key: K, value: V) {
        self.set(key, value, self.default_ttl);
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether it was present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    // == Contains ==
    /// Returns true if `key` is present and live.
    ///
    /// Does not touch recency and does not remove an expired entry.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        self.index
            .get(key)
            .and_then(|&slot| self.recency.get(slot))
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Cleanup Expired ==
    /// Removes every expired entry and returns how many were removed.
    ///
    /// Only runs when called; nothing sweeps the store in the background.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let expired: Vec<K> = self
            .recency
            .iter()
            .filter(|entry| entry.is_expired(now))
            .map(|entry| entry.key.clone())
            .collect();

        let count = expired.len();
        for key in expired {
            self.remove_entry(&key);
        }

        if count > 0 {
            debug!(removed = count, "purged expired entries");
        }
        count
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        let removed = self.index.len();
        self.index.clear();
        self.recency.clear();
        debug!(removed, "cache cleared");
    }

    // == Keys ==
    /// Returns the keys from most to least recently used.
    ///
    /// Includes expired entries that have not been removed yet.
    pub fn keys(&self) -> Vec<K> {
        self.recency.iter().map(|entry| entry.key.clone()).collect()
    }

    // == Length ==
    /// Returns the current number of entries, including expired entries
    /// not yet removed.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Evicts the entry at the back of the recency list.
    fn evict_lru(&mut self) {
        let Some(slot) = self.recency.back() else {
            return;
        };
        if let Some(entry) = self.recency.remove(slot) {
            self.index.remove(&entry.key);
            trace!(slot, "evicted least recently used entry");
        }
    }

    fn remove_entry<Q>(&mut self, key: &Q) -> Option<CacheEntry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.index.remove(key)?;
        self.recency.remove(slot)
    }

    /// Panics if the index and the recency list disagree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.recency.len());
        assert!(self.index.len() <= self.capacity);
        let mut walked = 0;
        for entry in self.recency.iter() {
            let slot = self.index[&entry.key];
            let linked = self.recency.get(slot).map(|e| &e.key);
            assert!(linked == Some(&entry.key), "index points at another entry");
            walked += 1;
        }
        assert_eq!(walked, self.index.len());
    }
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// A hit makes the key most recently used. An expired entry is removed
    /// and reported as a miss.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        let now = self.clock.now();

        if self.recency.get(slot)?.is_expired(now) {
            self.remove_entry(key);
            trace!(slot, "removed expired entry on read");
            return None;
        }

        self.recency.move_to_front(slot);
        self.recency.get(slot).map(|entry| entry.value.clone())
    }
}
