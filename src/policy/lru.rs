//! # Least Recently Used (LRU) Cache
//!
//! A fixed-capacity cache composing two [`HashTable`]s with a recency chain.
//! Values live in the chain's nodes; `lookup` maps each key to its node's
//! [`SlotId`] and `reverse_lookup` maps each node back to its key, so the
//! tail node's key can be found in O(1) during eviction.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                         LruCache<K, V, H>                            │
//!   │                                                                      │
//!   │   lookup: HashTable<K, SlotId, H>    reverse_lookup: HashTable<SlotId, K>
//!   │   ┌─────────┬────────┐               ┌────────┬─────────┐            │
//!   │   │  page_1 │  id_2 ─┼──┐         ┌──┼─ id_2  │  page_1 │            │
//!   │   │  page_2 │  id_1 ─┼─┐│         │┌─┼─ id_1  │  page_2 │            │
//!   │   │  page_3 │  id_3 ─┼┐││         ││┌┼─ id_3  │  page_3 │            │
//!   │   └─────────┴────────┘│││         │││└────────┴─────────┘            │
//!   │                       ▼▼▼         ▼▼▼                                │
//!   │   chain: IntrusiveList<V>                                            │
//!   │     head ──► [id_1: B] ◄──► [id_2: A] ◄──► [id_3: C] ◄── tail        │
//!   │              MRU                                LRU                  │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! For every node reachable from `head`,
//! `lookup[reverse_lookup[id]] == id`, and every key in `lookup` names a node
//! that is linked in the chain. All three structures always hold `len`
//! entries.
//!
//! ## Operations Flow
//!
//! ```text
//!   put(D) with capacity = 3
//!
//!   Before:   head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!
//!     1. push [D] at head, insert D → id into lookup, id → D into reverse_lookup
//!     2. len = 4 > capacity:
//!          detach tail [C], reverse_lookup[id_C] = C,
//!          remove C from lookup, remove id_C from reverse_lookup
//!
//!   After:    head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   get(B)
//!     1. lookup[B] = id_B
//!     2. detach id_B, attach at head
//!
//!   After:    head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//! ```
//!
//! ## Operations
//!
//! | Method            | Complexity | Promotes? |
//! |-------------------|------------|-----------|
//! | `get`             | O(1) avg   | yes       |
//! | `put`             | O(1) avg*  | yes       |
//! | `peek`            | O(1) avg   | no        |
//! | `touch`           | O(1) avg   | yes       |
//! | `remove`          | O(1) avg   | n/a       |
//! | `pop_lru`         | O(1) avg   | n/a       |
//! | `recency_rank`    | O(n)       | no        |
//!
//! `*` amortized over the internal tables' rehashing.
//!
//! ## Example Usage
//!
//! ```
//! use chainkit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! assert_eq!(cache.get(&"a"), Some(&1));
//!
//! // "b" is now least recently used and is evicted.
//! assert_eq!(cache.put("c", 3), Some(("b", 2)));
//! assert_eq!(cache.get(&"b"), None);
//! ```
//!
//! ## Thread Safety
//!
//! `LruCache` is single-threaded; wrap it in a lock for shared use.

use std::fmt;
use std::hash::Hash;
use std::mem;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};
use crate::store::table::{FxKeyHasher, HashTable, KeyHasher};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Capacity of a cache built with [`LruCache::default`].
pub const DEFAULT_CACHE_CAPACITY: usize = 4;

/// Fixed-capacity LRU cache over two hash tables and a recency chain.
pub struct LruCache<K, V, H = FxKeyHasher> {
    chain: IntrusiveList<V>,
    lookup: HashTable<K, SlotId, H>,
    reverse_lookup: HashTable<SlotId, K>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V, FxKeyHasher>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// ```
    /// use chainkit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(LruCache::<u32, String>::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_hasher(capacity, FxKeyHasher)
    }
}

impl<K, V> Default for LruCache<K, V, FxKeyHasher>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::from_parts(DEFAULT_CACHE_CAPACITY, FxKeyHasher)
    }
}

impl<K, V, H> LruCache<K, V, H>
where
    K: Eq + Clone,
    H: KeyHasher<K>,
{
    /// Creates a cache whose key lookup table uses `hasher`.
    pub fn with_hasher(capacity: usize, hasher: H) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new(
                "lru cache capacity must be greater than zero",
            ));
        }
        Ok(Self::from_parts(capacity, hasher))
    }

    fn from_parts(capacity: usize, hasher: H) -> Self {
        Self {
            chain: IntrusiveList::new(),
            lookup: HashTable::with_hasher(hasher),
            reverse_lookup: HashTable::new(),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Returns the number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Returns the maximum number of resident entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if `key` is resident. Does not promote.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.lookup.contains(key)
    }

    /// Returns the value for `key` and promotes it to most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = self.promote(key)?;
        self.chain.get(id)
    }

    /// Like [`get`](Self::get), but returns a mutable reference.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.promote(key)?;
        self.chain.get_mut(id)
    }

    /// Returns the value for `key` without touching recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &id = self.lookup.get(key)?;
        self.chain.get(id)
    }

    /// Inserts or overwrites `key` and promotes it to most recently used.
    ///
    /// If the insert pushes the cache over capacity, the least recently used
    /// entry is evicted and returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.replace_value(&key, value) {
            Ok(_) => None,
            Err(value) => self.insert_new(key, value),
        }
    }

    /// Removes `key` from the chain and both tables, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let &id = self.lookup.get(key)?;
        self.unlink(key, id)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.evict_tail()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some(entry)
    }

    /// Returns the least recently used entry without removing or promoting it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_call();

        let id = self.chain.back_id()?;
        let key = self.reverse_lookup.get(&id)?;
        let value = self.chain.get(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_found();

        Some((key, value))
    }

    /// Promotes `key` to most recently used; returns `false` if absent.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.lookup.get(key) else {
            return false;
        };
        self.chain.move_to_front(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    /// Returns the distance of `key` from the MRU end (0 = most recent).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let &target = self.lookup.get(key)?;
        for (rank, id) in self.chain.iter_ids().enumerate() {
            #[cfg(feature = "metrics")]
            self.metrics.record_recency_rank_scan_step();

            if id == target {
                #[cfg(feature = "metrics")]
                self.metrics.record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }

    /// Removes every entry; capacity is unchanged.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.chain.clear();
        self.lookup.clear();
        self.reverse_lookup.clear();
    }

    /// Iterates from most to least recently used without promoting.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.chain
            .iter_entries()
            .filter_map(|(id, value)| self.reverse_lookup.get(&id).map(|key| (key, value)))
    }

    /// Validates the key/node bijection, sizes and the capacity bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: fmt::Debug,
    {
        let len = self.chain.len();
        if self.lookup.len() != len || self.reverse_lookup.len() != len {
            return Err(InvariantError::new(format!(
                "chain holds {} nodes but lookup holds {} and reverse_lookup holds {}",
                len,
                self.lookup.len(),
                self.reverse_lookup.len()
            )));
        }
        if len > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                len, self.capacity
            )));
        }

        let mut walked = 0usize;
        for id in self.chain.iter_ids() {
            let key = self.reverse_lookup.get(&id).ok_or_else(|| {
                InvariantError::new(format!("node {:?} has no reverse_lookup entry", id))
            })?;
            if self.lookup.get(key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "lookup[{:?}] does not point back to node {:?}",
                    key, id
                )));
            }
            walked += 1;
        }
        if walked != len {
            return Err(InvariantError::new(format!(
                "walked {} nodes from head but chain len = {}",
                walked, len
            )));
        }
        if let Some((key, _)) = self.lookup.iter().find(|(_, id)| !self.chain.contains(**id)) {
            return Err(InvariantError::new(format!(
                "lookup key {:?} points at a node outside the chain",
                key
            )));
        }

        self.lookup.check_invariants()?;
        self.reverse_lookup.check_invariants()?;
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self)
    where
        K: fmt::Debug,
    {
        self.chain.debug_validate_invariants();
        if let Err(e) = self.check_invariants() {
            panic!("{}", e);
        }
    }

    fn promote(&mut self, key: &K) -> Option<SlotId> {
        let Some(&id) = self.lookup.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.chain.move_to_front(id);
        Some(id)
    }

    /// Overwrites a resident key's value and promotes it; hands `value` back
    /// if `key` is not resident.
    fn replace_value(&mut self, key: &K, value: V) -> Result<V, V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        let Some(&id) = self.lookup.get(key) else {
            return Err(value);
        };
        let Some(slot) = self.chain.get_mut(id) else {
            return Err(value);
        };
        let previous = mem::replace(slot, value);
        self.chain.move_to_front(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_update();

        Ok(previous)
    }

    /// Links a new node at head, then evicts the tail if over capacity.
    fn insert_new(&mut self, key: K, value: V) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.chain.push_front(value);
        self.lookup.insert(key.clone(), id);
        self.reverse_lookup.insert(id, key);

        if self.len() <= self.capacity {
            return None;
        }

        let evicted = self.evict_tail();
        tracing::debug!(
            len = self.len(),
            capacity = self.capacity,
            "lru cache evicted least recently used entry"
        );
        #[cfg(feature = "metrics")]
        if evicted.is_some() {
            self.metrics.record_evicted_entry();
        }
        evicted
    }

    /// Resolves the tail node's key, then drops the entry everywhere.
    fn evict_tail(&mut self) -> Option<(K, V)> {
        let id = self.chain.back_id()?;
        let key = self.reverse_lookup.get(&id)?.clone();
        let value = self.unlink(&key, id)?;
        Some((key, value))
    }

    /// Removes a resolved `key`/`id` entry from the chain and both tables.
    fn unlink(&mut self, key: &K, id: SlotId) -> Option<V> {
        let value = self.chain.remove(id);
        let forward = self.lookup.remove(key);
        let reverse = self.reverse_lookup.remove(&id);
        debug_assert!(value.is_some(), "node {:?} missing from chain", id);
        debug_assert_eq!(forward, Ok(id));
        debug_assert!(reverse.is_ok(), "node {:?} missing from reverse_lookup", id);
        value
    }
}

#[cfg(feature = "metrics")]
impl<K, V, H> LruCache<K, V, H> {
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            cache_len: self.chain.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, H> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V, H> {
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V, H> fmt::Debug for LruCache<K, V, H>
where
    K: Eq + Clone + fmt::Debug,
    V: fmt::Debug,
    H: KeyHasher<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("entries", &DebugEntries(self))
            .finish()
    }
}

struct DebugEntries<'a, K, V, H>(&'a LruCache<K, V, H>);

impl<K, V, H> fmt::Debug for DebugEntries<'_, K, V, H>
where
    K: Eq + Clone + fmt::Debug,
    V: fmt::Debug,
    H: KeyHasher<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<K, V, H> Extend<(K, V)> for LruCache<K, V, H>
where
    K: Eq + Clone,
    H: KeyHasher<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, H> CoreCache<K, V> for LruCache<K, V, H>
where
    K: Eq + Clone,
    H: KeyHasher<K>,
{
    /// Upserts like [`LruCache::put`], but returns the replaced value; an
    /// entry evicted to make room is dropped.
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.replace_value(&key, value) {
            Ok(previous) => Some(previous),
            Err(value) => {
                self.insert_new(key, value);
                None
            },
        }
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LruCache::clear(self);
    }
}

impl<K, V, H> MutableCache<K, V> for LruCache<K, V, H>
where
    K: Eq + Clone,
    H: KeyHasher<K>,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V, H> LruCacheTrait<K, V> for LruCache<K, V, H>
where
    K: Eq + Clone,
    H: KeyHasher<K>,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    #[inline]
    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_mru_to_lru<V>(cache: &LruCache<&'static str, V>) -> Vec<&'static str> {
        cache.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = LruCache::<u32, u32>::new(0).unwrap_err();
        assert!(err.message().contains("capacity"));
    }

    #[test]
    fn default_capacity_is_four() {
        let cache: LruCache<u32, u32> = LruCache::default();
        assert_eq!(cache.capacity(), DEFAULT_CACHE_CAPACITY);
        assert!(cache.is_empty());
    }

    #[test]
    fn eviction_scenario() {
        let mut cache = LruCache::new(2).unwrap();
        assert_eq!(cache.put("a", 1), None);
        assert_eq!(cache.put("b", 2), None);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"c"), Some(&3));
        assert_eq!(cache.len(), 2);
        cache.debug_validate_invariants();
    }

    #[test]
    fn update_keeps_len_and_promotes() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.put("a", 10), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(&"a"), Some(&10));
        assert_eq!(keys_mru_to_lru(&cache), vec!["a", "b"]);
        cache.debug_validate_invariants();
    }

    #[test]
    fn repromoting_head_only_overwrites_value() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("b", 20);
        assert_eq!(keys_mru_to_lru(&cache), vec!["b", "a"]);
        assert_eq!(cache.get(&"b"), Some(&20));
        assert_eq!(keys_mru_to_lru(&cache), vec!["b", "a"]);
    }

    #[test]
    fn miss_has_no_side_effects() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.get(&"zzz"), None);
        assert_eq!(keys_mru_to_lru(&cache), vec!["b", "a"]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn peek_does_not_promote() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.peek(&"a"), Some(&1));
        assert_eq!(cache.put("c", 3), Some(("a", 1)));
        assert!(!cache.contains(&"a"));
    }

    #[test]
    fn capacity_one_evicts_every_new_key() {
        let mut cache = LruCache::new(1).unwrap();
        cache.put(1, "one");
        assert_eq!(cache.put(2, "two"), Some((1, "one")));
        assert_eq!(cache.put(3, "three"), Some((2, "two")));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&3), Some(&"three"));
        cache.debug_validate_invariants();
    }

    #[test]
    fn remove_clears_both_tables_and_chain() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        assert_eq!(cache.remove(&"b"), Some(2));
        assert_eq!(cache.remove(&"b"), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(keys_mru_to_lru(&cache), vec!["c", "a"]);
        cache.debug_validate_invariants();

        cache.put("d", 4);
        assert_eq!(cache.len(), 3);
        cache.debug_validate_invariants();
    }

    #[test]
    fn pop_and_peek_lru() {
        let mut cache = LruCache::new(3).unwrap();
        assert_eq!(cache.pop_lru(), None);
        assert_eq!(cache.peek_lru(), None);

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        assert_eq!(cache.peek_lru(), Some((&"a", &1)));
        assert_eq!(cache.pop_lru(), Some(("a", 1)));
        assert_eq!(cache.peek_lru(), Some((&"b", &2)));
        assert_eq!(cache.len(), 2);
        cache.debug_validate_invariants();
    }

    #[test]
    fn touch_and_recency_rank() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        assert_eq!(cache.recency_rank(&"c"), Some(0));
        assert_eq!(cache.recency_rank(&"a"), Some(2));

        assert!(cache.touch(&"a"));
        assert!(!cache.touch(&"missing"));
        assert_eq!(cache.recency_rank(&"a"), Some(0));
        assert_eq!(cache.recency_rank(&"b"), Some(2));
        assert_eq!(cache.recency_rank(&"missing"), None);
    }

    #[test]
    fn get_mut_promotes_and_mutates() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("a", vec![1]);
        cache.put("b", vec![2]);
        if let Some(v) = cache.get_mut(&"a") {
            v.push(3);
        }
        assert_eq!(cache.peek(&"a"), Some(&vec![1, 3]));
        assert_eq!(cache.put("c", vec![]), Some(("b", vec![2])));
    }

    #[test]
    fn clear_and_reuse() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, 1);
        cache.put(2, 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
        cache.put(3, 3);
        assert_eq!(cache.len(), 1);
        cache.debug_validate_invariants();
    }

    #[test]
    fn custom_hasher_with_collisions() {
        let mut cache = LruCache::with_hasher(3, |_: &u32| 0u64).unwrap();
        for k in 0..10u32 {
            cache.put(k, k * 2);
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&9), Some(&18));
        assert_eq!(cache.get(&6), None);
        cache.debug_validate_invariants();
    }

    #[test]
    fn extend_and_debug() {
        let mut cache = LruCache::new(2).unwrap();
        cache.extend([("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(keys_mru_to_lru(&cache), vec!["c", "b"]);

        let dbg = format!("{:?}", cache);
        assert!(dbg.contains("capacity: 2"));
        assert!(dbg.contains(r#""c": 3"#));
    }

    #[test]
    fn eviction_with_unresolved_tail_changes_nothing() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        let tail = cache.chain.back_id().unwrap();
        assert_eq!(cache.reverse_lookup.remove(&tail), Ok("a"));

        assert_eq!(cache.pop_lru(), None);
        assert_eq!(cache.chain.len(), 2);
        assert_eq!(cache.chain.back_id(), Some(tail));
        assert_eq!(cache.lookup.get(&"a"), Some(&tail));
        assert_eq!(cache.peek(&"a"), Some(&1));
    }

    #[test]
    fn remove_then_reinsert_reuses_slot_without_aliasing() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.remove(&"a"), Some(1));
        cache.put("c", 3);
        assert_eq!(cache.peek(&"a"), None);
        assert_eq!(cache.peek(&"c"), Some(&3));
        assert_eq!(cache.pop_lru(), Some(("b", 2)));
        assert_eq!(cache.pop_lru(), Some(("c", 3)));
        assert!(cache.is_empty());
        cache.debug_validate_invariants();
    }

    #[test]
    fn core_cache_insert_returns_replaced_value() {
        fn fill<C: CoreCache<u32, u32>>(cache: &mut C, keys: std::ops::Range<u32>) -> Vec<Option<u32>> {
            keys.map(|k| cache.insert(k % 2, k)).collect()
        }

        let mut cache = LruCache::new(2).unwrap();
        assert_eq!(
            fill(&mut cache, 0..5),
            vec![None, None, Some(0), Some(1), Some(2)]
        );
        assert_eq!(CoreCache::len(&cache), 2);
        assert_eq!(CoreCache::capacity(&cache), 2);
        assert!(!CoreCache::contains(&cache, &2));
        assert_eq!(CoreCache::get(&mut cache, &0), Some(&4));
        assert_eq!(cache.peek_lru(), Some((&1, &3)));
        cache.debug_validate_invariants();

        CoreCache::clear(&mut cache);
        assert!(CoreCache::is_empty(&cache));
    }

    #[test]
    fn lru_trait_surface_matches_inherent_methods() {
        fn drain<C: LruCacheTrait<&'static str, i32>>(cache: &mut C) -> Vec<&'static str> {
            let mut keys = Vec::new();
            while let Some((key, _)) = cache.pop_lru() {
                keys.push(key);
            }
            keys
        }

        let mut cache = LruCache::new(4).unwrap();
        for (k, v) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
            cache.put(k, v);
        }
        assert!(LruCacheTrait::touch(&mut cache, &"a"));
        assert_eq!(LruCacheTrait::recency_rank(&cache, &"a"), Some(0));
        assert_eq!(LruCacheTrait::peek_lru(&cache), Some((&"b", &2)));
        assert_eq!(
            MutableCache::remove_batch(&mut cache, &["c", "zzz"]),
            vec![Some(3), None]
        );
        assert_eq!(drain(&mut cache), vec!["b", "d", "a"]);
    }

    #[test]
    fn many_inserts_force_internal_rehash() {
        let mut cache = LruCache::new(64).unwrap();
        for k in 0..200u32 {
            cache.put(k, k);
        }
        assert_eq!(cache.len(), 64);
        for k in 136..200u32 {
            assert_eq!(cache.peek(&k), Some(&k));
        }
        cache.debug_validate_invariants();
    }
}

#[cfg(test)]
mod property_tests {
    use std::collections::VecDeque;

    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Put(u8, u16),
        Get(u8),
        Peek(u8),
        Remove(u8),
        Touch(u8),
        PopLru,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0u8..24, any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
            3 => (0u8..24).prop_map(Op::Get),
            1 => (0u8..24).prop_map(Op::Peek),
            1 => (0u8..24).prop_map(Op::Remove),
            1 => (0u8..24).prop_map(Op::Touch),
            1 => Just(Op::PopLru),
        ]
    }

    /// Reference model: front = MRU.
    #[derive(Default)]
    struct Model {
        order: VecDeque<(u8, u16)>,
    }

    impl Model {
        fn position(&self, key: u8) -> Option<usize> {
            self.order.iter().position(|(k, _)| *k == key)
        }

        fn promote(&mut self, key: u8) -> Option<u16> {
            let pos = self.position(key)?;
            let entry = self.order.remove(pos)?;
            self.order.push_front(entry);
            Some(entry.1)
        }
    }

    proptest! {
        /// Property: matches a VecDeque recency model and keeps the bijection intact
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_recency_model(
            capacity in 1usize..8,
            ops in prop::collection::vec(op_strategy(), 0..200)
        ) {
            let mut cache = LruCache::new(capacity).unwrap();
            let mut model = Model::default();

            for op in ops {
                match op {
                    Op::Put(k, v) => {
                        let evicted = cache.put(k, v);
                        let expected = match model.position(k) {
                            Some(pos) => {
                                model.order.remove(pos);
                                model.order.push_front((k, v));
                                None
                            },
                            None => {
                                model.order.push_front((k, v));
                                if model.order.len() > capacity {
                                    model.order.pop_back()
                                } else {
                                    None
                                }
                            },
                        };
                        prop_assert_eq!(evicted, expected);
                    },
                    Op::Get(k) => {
                        prop_assert_eq!(cache.get(&k).copied(), model.promote(k));
                    },
                    Op::Peek(k) => {
                        let expected = model.position(k).map(|pos| model.order[pos].1);
                        prop_assert_eq!(cache.peek(&k).copied(), expected);
                    },
                    Op::Remove(k) => {
                        let expected = model
                            .position(k)
                            .and_then(|pos| model.order.remove(pos))
                            .map(|(_, v)| v);
                        prop_assert_eq!(cache.remove(&k), expected);
                    },
                    Op::Touch(k) => {
                        prop_assert_eq!(cache.touch(&k), model.promote(k).is_some());
                    },
                    Op::PopLru => {
                        prop_assert_eq!(cache.pop_lru(), model.order.pop_back());
                    },
                }

                let actual: Vec<(u8, u16)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                let expected: Vec<(u8, u16)> = model.order.iter().copied().collect();
                prop_assert_eq!(actual, expected);
                prop_assert!(cache.check_invariants().is_ok());
            }
        }

        /// Property: with capacity >= distinct keys, nothing is evicted and get returns the latest put
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_no_eviction_when_capacity_suffices(
            puts in prop::collection::vec((0u8..16, any::<u32>()), 1..100)
        ) {
            let mut cache = LruCache::new(16).unwrap();
            let mut latest = std::collections::HashMap::new();
            for (k, v) in puts {
                prop_assert_eq!(cache.put(k, v), None);
                latest.insert(k, v);
                prop_assert_eq!(cache.get(&k), Some(&v));
            }
            prop_assert_eq!(cache.len(), latest.len());
            for (k, v) in latest {
                prop_assert_eq!(cache.get(&k), Some(&v));
            }
        }
    }
}
