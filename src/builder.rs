//! Builders for hash tables and LRU caches.
//!
//! Collect construction parameters fluently, then validate them once in
//! `try_build()` (returns [`ConfigError`]) or `build()` (panics).
//!
//! ## Example
//!
//! ```rust
//! use chainkit::builder::{HashTableBuilder, LruCacheBuilder};
//!
//! let mut table = HashTableBuilder::new()
//!     .capacity(32)
//!     .load_factor(0.5)
//!     .build::<u64, String>();
//! table.put(1, "hello".to_string()).unwrap();
//! assert_eq!(table.capacity(), 32);
//!
//! let mut cache = LruCacheBuilder::new(100).build::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use crate::error::ConfigError;
use crate::policy::lru::{DEFAULT_CACHE_CAPACITY, LruCache};
use crate::store::table::{DEFAULT_LOAD_FACTOR, DEFAULT_TABLE_CAPACITY, FxKeyHasher, HashTable, KeyHasher};

/// Builder for [`HashTable`].
#[derive(Debug, Clone)]
pub struct HashTableBuilder<H = FxKeyHasher> {
    capacity: usize,
    load_factor: f64,
    hasher: H,
}

impl HashTableBuilder<FxKeyHasher> {
    /// Starts from the default capacity, load factor and hasher.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_TABLE_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            hasher: FxKeyHasher,
        }
    }
}

impl Default for HashTableBuilder<FxKeyHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> HashTableBuilder<H> {
    /// Sets the initial bucket count.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the load-factor threshold that triggers a rehash.
    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Replaces the key hasher.
    pub fn hasher<H2>(self, hasher: H2) -> HashTableBuilder<H2> {
        HashTableBuilder {
            capacity: self.capacity,
            load_factor: self.load_factor,
            hasher,
        }
    }

    /// Builds the table, validating the configuration.
    pub fn try_build<K, V>(self) -> Result<HashTable<K, V, H>, ConfigError>
    where
        K: Eq,
        H: KeyHasher<K>,
    {
        HashTable::try_with_config(self.capacity, self.load_factor, self.hasher)
    }

    /// Builds the table.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn build<K, V>(self) -> HashTable<K, V, H>
    where
        K: Eq,
        H: KeyHasher<K>,
    {
        match self.try_build() {
            Ok(table) => table,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Builder for [`LruCache`].
#[derive(Debug, Clone)]
pub struct LruCacheBuilder<H = FxKeyHasher> {
    capacity: usize,
    hasher: H,
}

impl LruCacheBuilder<FxKeyHasher> {
    /// Starts a builder for a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            hasher: FxKeyHasher,
        }
    }
}

impl Default for LruCacheBuilder<FxKeyHasher> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl<H> LruCacheBuilder<H> {
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replaces the hasher used by the key lookup table.
    pub fn hasher<H2>(self, hasher: H2) -> LruCacheBuilder<H2> {
        LruCacheBuilder {
            capacity: self.capacity,
            hasher,
        }
    }

    /// Builds the cache; fails if `capacity` is zero.
    pub fn try_build<K, V>(self) -> Result<LruCache<K, V, H>, ConfigError>
    where
        K: Eq + Clone,
        H: KeyHasher<K>,
    {
        LruCache::with_hasher(self.capacity, self.hasher)
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn build<K, V>(self) -> LruCache<K, V, H>
    where
        K: Eq + Clone,
        H: KeyHasher<K>,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }
}
