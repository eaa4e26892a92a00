//! # Cache Traits
//!
//! Policy-independent cache operations, layered so generic code can ask for
//! exactly the capabilities it needs.
//!
//! ```text
//!   ┌───────────────────────────────────┐
//!   │         CoreCache<K, V>           │
//!   │  insert / get / contains          │
//!   │  len / is_empty / capacity / clear│
//!   └─────────────────┬─────────────────┘
//!                     ▼
//!   ┌───────────────────────────────────┐
//!   │        MutableCache<K, V>         │
//!   │  remove / remove_batch            │
//!   └─────────────────┬─────────────────┘
//!                     ▼
//!   ┌───────────────────────────────────┐
//!   │        LruCacheTrait<K, V>        │
//!   │  pop_lru / peek_lru               │
//!   │  touch / recency_rank             │
//!   └───────────────────────────────────┘
//! ```
//!
//! | Trait           | Extends        | Adds                                  |
//! |-----------------|----------------|---------------------------------------|
//! | `CoreCache`     | -              | Upsert, lookup, size and clearing     |
//! | `MutableCache`  | `CoreCache`    | Removal by key                        |
//! | `LruCacheTrait` | `MutableCache` | Recency-ordered eviction and queries  |
//!
//! [`LruCache`](crate::policy::lru::LruCache) implements all three. Its
//! inherent `put` reports the evicted pair instead; `CoreCache::insert`
//! reports the replaced value and drops whatever was evicted.
//!
//! ## Example
//!
//! ```
//! use chainkit::policy::lru::LruCache;
//! use chainkit::traits::{CoreCache, LruCacheTrait, MutableCache};
//!
//! fn warm<C: CoreCache<u32, String>>(cache: &mut C, keys: &[u32]) {
//!     for &k in keys {
//!         cache.insert(k, format!("page-{}", k));
//!     }
//! }
//!
//! let mut cache: LruCache<u32, String> = LruCache::new(2).unwrap();
//! warm(&mut cache, &[1, 2, 3]);
//! assert_eq!(CoreCache::len(&cache), 2);
//! assert_eq!(LruCacheTrait::peek_lru(&cache).map(|(k, _)| *k), Some(2));
//! assert_eq!(MutableCache::remove(&mut cache, &3), Some("page-3".to_string()));
//! ```

/// Operations every cache supports.
pub trait CoreCache<K, V> {
    /// Inserts or overwrites `key`, returning the previous value if it was
    /// resident. May evict another entry to stay within capacity.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key`, updating policy state (e.g. recency).
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is resident, without updating policy state.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries.
    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Caches that allow removal of arbitrary keys.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value if it was resident.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes each key in order; results line up with `keys`.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Recency-ordered operations of an LRU cache.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without changing the order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used; `false` if it is not resident.
    fn touch(&mut self, key: &K) -> bool;

    /// Distance of `key` from the most recently used end (0 = MRU).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
