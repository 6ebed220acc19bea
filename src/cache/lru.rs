//! LRU Recency List Module
//!
//! Arena of cache entries threaded by a doubly linked list in recency order.
//!
//! Entries live in a `Vec` of slots and link to each other by slot id rather
//! than by reference. The index stores slot ids, so moving or removing an
//! entry is O(1) and never leaves a dangling handle.

use crate::cache::CacheEntry;

/// Position of an entry in the arena.
pub type SlotId = usize;

/// Null link.
pub(crate) const NIL: SlotId = usize::MAX;

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// - Front (head) = most recently used
/// - Back (tail) = least recently used
#[derive(Debug)]
pub struct RecencyList<K, V> {
    slots: Vec<Option<CacheEntry<K, V>>>,
    /// Vacated slots available for reuse
    free: Vec<SlotId>,
    head: SlotId,
    tail: SlotId,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    // == Push Front ==
    /// Stores `entry` as the most recently used one and returns its slot.
    pub fn push_front(&mut self, mut entry: CacheEntry<K, V>) -> SlotId {
        entry.prev = NIL;
        entry.next = self.head;

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        if let Some(old_head) = self.entry_mut(self.head) {
            old_head.prev = slot;
        } else {
            self.tail = slot;
        }
        self.head = slot;
        self.len += 1;
        slot
    }

    // == Move To Front ==
    /// Marks the entry at `slot` as most recently used.
    pub fn move_to_front(&mut self, slot: SlotId) {
        if slot == self.head || self.get(slot).is_none() {
            return;
        }
        self.unlink(slot);

        let old_head = self.head;
        if let Some(entry) = self.entry_mut(slot) {
            entry.prev = NIL;
            entry.next = old_head;
        }
        if let Some(head) = self.entry_mut(old_head) {
            head.prev = slot;
        } else {
            self.tail = slot;
        }
        self.head = slot;
    }

    // == Remove ==
    /// Unlinks the entry at `slot` and hands it back, freeing the slot.
    pub fn remove(&mut self, slot: SlotId) -> Option<CacheEntry<K, V>> {
        self.get(slot)?;
        self.unlink(slot);

        let entry = self.slots[slot].take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(entry)
    }

    // == Back ==
    /// Returns the slot of the least recently used entry.
    pub fn back(&self) -> Option<SlotId> {
        (self.tail != NIL).then_some(self.tail)
    }

    /// Returns the slot of the most recently used entry.
    #[allow(dead_code)]
    pub fn front(&self) -> Option<SlotId> {
        (self.head != NIL).then_some(self.head)
    }

    pub fn get(&self, slot: SlotId) -> Option<&CacheEntry<K, V>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut CacheEntry<K, V>> {
        self.entry_mut(slot)
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every entry and releases the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    // == Iter ==
    /// Walks entries from most to least recently used without reordering.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn entry_mut(&mut self, slot: SlotId) -> Option<&mut CacheEntry<K, V>> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Detaches `slot` from its neighbours. The slot itself keeps stale links.
    fn unlink(&mut self, slot: SlotId) {
        let (prev, next) = match self.get(slot) {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };

        match self.entry_mut(prev) {
            Some(p) => p.next = next,
            None => self.head = next,
        }
        match self.entry_mut(next) {
            Some(n) => n.prev = prev,
            None => self.tail = prev,
        }
    }
}

/// Iterator over entries in recency order, front to back.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: SlotId,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a CacheEntry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.cursor)?;
        self.cursor = entry.next;
        Some(entry)
    }
}
