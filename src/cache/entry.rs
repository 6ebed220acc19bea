//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use crate::cache::lru::{SlotId, NIL};

// == Cache Entry ==
/// A single cache entry: payload, expiry and its links in the recency list.
///
/// The entry and its list node are the same slot in the arena, so removing
/// the slot removes both.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The key this entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Absolute expiry instant, None = no expiration
    pub expires_at: Option<Instant>,
    /// Slot of the next more recently used entry
    pub(crate) prev: SlotId,
    /// Slot of the next less recently used entry
    pub(crate) next: SlotId,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new unlinked entry expiring `ttl` after `now`.
    ///
    /// A zero `ttl`, or one too large to add to `now`, yields an entry that
    /// never expires.
    pub fn new(key: K, value: V, now: Instant, ttl: Duration) -> Self {
        Self {
            key,
            value,
            expires_at: expiry_for(now, ttl),
            prev: NIL,
            next: NIL,
        }
    }

    // == Refresh ==
    /// Replaces the value and restarts the TTL from `now`.
    pub fn refresh(&mut self, value: V, now: Instant, ttl: Duration) {
        self.value = value;
        self.expires_at = expiry_for(now, ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Expiry is strict: an entry is still live at the exact instant it
    /// expires and expired at any later one.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has TTL and hasn't expired
    /// - `None` if the entry never expires
    #[allow(dead_code)]
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }
}

fn expiry_for(now: Instant, ttl: Duration) -> Option<Instant> {
    if ttl.is_zero() {
        None
    } else {
        now.checked_add(ttl)
    }
}
