//! # Separate-Chaining Hash Table
//!
//! A hash table whose buckets are [`DynamicArray`]s of [`KeyValuePair`]s, held
//! in a [`DynamicArray`] of buckets. Keys are placed in bucket
//! `hash(key) % capacity`; collisions are resolved purely by chaining (a
//! linear scan of one bucket), never by probing.
//!
//! ## Architecture
//!
//! ```text
//!   buckets: DynamicArray<DynamicArray<KeyValuePair<K, V>>>   capacity = 10
//!
//!   000 -> []
//!   001 -> ["b": 2]
//!   002 -> ["a": 1, "k": 11]      ◄── two keys hashing to bucket 2,
//!   003 -> []                          kept in insertion order
//!   ...
//!   009 -> ["z": 26]
//! ```
//!
//! ## Rehashing
//!
//! ```text
//!   put(key) when (len + 1) / capacity > load_factor:
//!     1. capacity' = capacity * 2
//!     2. allocate capacity' empty buckets
//!     3. move every pair to bucket hash(key) % capacity'
//!     4. append the new pair to its bucket
//! ```
//!
//! Rehashing is the only operation that moves pairs between or within
//! buckets. `update` rewrites a value in place; `remove` deletes the first
//! matching pair (insertion order) through the bucket's own `remove_at`.
//!
//! ## Hashing
//!
//! The hash function is injected through [`KeyHasher`]. Any
//! `Fn(&K) -> u64` closure is a `KeyHasher`; the default [`FxKeyHasher`]
//! feeds the key's `Hash` impl into `rustc_hash::FxHasher`, which is
//! deterministic across runs and processes.
//!
//! ## Operations
//!
//! | Method         | Complexity   | Description                               |
//! |----------------|--------------|-------------------------------------------|
//! | `put(k, v)`    | O(1) avg*    | Insert new key; error if present          |
//! | `insert(k, v)` | O(1) avg*    | Insert or overwrite (upsert)              |
//! | `get(&k)`      | O(1) avg     | Lookup, `None` if absent                  |
//! | `update(&k,v)` | O(1) avg     | Overwrite value; error if absent          |
//! | `remove(&k)`   | O(1) avg     | Remove key; error if absent               |
//! | `contains(&k)` | O(1) avg     | Membership test                           |
//!
//! `*` amortized; a put that crosses the load factor rehashes in O(n).
//!
//! ## Example Usage
//!
//! ```
//! use chainkit::error::TableError;
//! use chainkit::store::table::HashTable;
//!
//! let mut table: HashTable<String, u32> = HashTable::new();
//! table.put("apples".to_string(), 3).unwrap();
//! table.update(&"apples".to_string(), 5).unwrap();
//! assert_eq!(table.get(&"apples".to_string()), Some(&5));
//! assert_eq!(table.remove(&"pears".to_string()), Err(TableError::KeyNotFound));
//! ```
//!
//! ## Thread Safety
//!
//! `HashTable` has no internal locking; concurrent use needs external
//! synchronization.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use rustc_hash::FxHasher;

use crate::ds::DynamicArray;
use crate::error::{ConfigError, InvariantError, TableError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::TableMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TableMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MetricsSnapshotProvider, TableMetricsRecorder};

/// Bucket count of a table built with [`HashTable::new`].
pub const DEFAULT_TABLE_CAPACITY: usize = 10;

/// Load-factor threshold of a table built with [`HashTable::new`].
pub const DEFAULT_LOAD_FACTOR: f64 = 0.7;

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Deterministic mapping from a key to a non-negative integer.
///
/// Equal keys must produce equal hashes for the lifetime of the table.
pub trait KeyHasher<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u64;
}

impl<K: ?Sized, F> KeyHasher<K> for F
where
    F: Fn(&K) -> u64,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self(key)
    }
}

/// Default [`KeyHasher`]: the key's `Hash` impl fed through `FxHasher`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FxKeyHasher;

impl<K: Hash + ?Sized> KeyHasher<K> for FxKeyHasher {
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

// ---------------------------------------------------------------------------
// KeyValuePair
// ---------------------------------------------------------------------------

/// Entry stored in a bucket: an immutable key with a mutable value.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyValuePair<K, V> {
    key: K,
    value: V,
}

impl<K, V> KeyValuePair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Display for KeyValuePair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {:?}", self.key, self.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for KeyValuePair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

// ---------------------------------------------------------------------------
// HashTable
// ---------------------------------------------------------------------------

type Bucket<K, V> = DynamicArray<KeyValuePair<K, V>>;

fn empty_buckets<K, V>(capacity: usize) -> DynamicArray<Bucket<K, V>> {
    // Zero-capacity buckets allocate lazily on their first push.
    (0..capacity).map(|_| DynamicArray::with_capacity(0)).collect()
}

/// Separate-chaining hash table with load-factor driven rehashing.
pub struct HashTable<K, V, H = FxKeyHasher> {
    buckets: DynamicArray<Bucket<K, V>>,
    len: usize,
    load_factor: f64,
    hasher: H,
    #[cfg(feature = "metrics")]
    metrics: TableMetrics,
}

impl<K, V> HashTable<K, V, FxKeyHasher>
where
    K: Eq + Hash,
{
    /// Creates a table with [`DEFAULT_TABLE_CAPACITY`] buckets, a
    /// [`DEFAULT_LOAD_FACTOR`] threshold and the default hasher.
    pub fn new() -> Self {
        Self::with_hasher(FxKeyHasher)
    }
}

impl<K, V> Default for HashTable<K, V, FxKeyHasher>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> HashTable<K, V, H>
where
    K: Eq,
    H: KeyHasher<K>,
{
    /// Creates a table with default capacity and load factor using `hasher`.
    pub fn with_hasher(hasher: H) -> Self {
        Self::from_parts(DEFAULT_TABLE_CAPACITY, DEFAULT_LOAD_FACTOR, hasher)
    }

    /// Creates a table with explicit parameters.
    ///
    /// # Panics
    ///
    /// Panics if parameters are invalid. See [`try_with_config`](Self::try_with_config).
    pub fn with_config(capacity: usize, load_factor: f64, hasher: H) -> Self {
        match Self::try_with_config(capacity, load_factor, hasher) {
            Ok(table) => table,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a table with explicit parameters, validating them.
    ///
    /// `capacity` must be non-zero and `load_factor` finite and positive.
    /// The initial buckets must also hold at least one pair before the first
    /// rehash (`capacity * load_factor >= 1`); a single doubling per `put`
    /// then always restores the load-factor bound.
    ///
    /// ```
    /// use chainkit::store::table::{FxKeyHasher, HashTable};
    ///
    /// let table = HashTable::<u32, u32>::try_with_config(16, 0.75, FxKeyHasher).unwrap();
    /// assert_eq!(table.capacity(), 16);
    ///
    /// assert!(HashTable::<u32, u32>::try_with_config(0, 0.75, FxKeyHasher).is_err());
    /// assert!(HashTable::<u32, u32>::try_with_config(8, f64::NAN, FxKeyHasher).is_err());
    /// assert!(HashTable::<u32, u32>::try_with_config(2, 0.25, FxKeyHasher).is_err());
    /// ```
    pub fn try_with_config(
        capacity: usize,
        load_factor: f64,
        hasher: H,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new(
                "hash table capacity must be greater than zero",
            ));
        }
        if !load_factor.is_finite() || load_factor <= 0.0 {
            return Err(ConfigError::new(format!(
                "load_factor must be finite and greater than zero, got {}",
                load_factor
            )));
        }
        if (capacity as f64) * load_factor < 1.0 {
            return Err(ConfigError::new(format!(
                "load_factor {} leaves {} buckets unable to hold a single pair",
                load_factor, capacity
            )));
        }
        Ok(Self::from_parts(capacity, load_factor, hasher))
    }

    fn from_parts(capacity: usize, load_factor: f64, hasher: H) -> Self {
        Self {
            buckets: empty_buckets(capacity),
            len: 0,
            load_factor,
            hasher,
            #[cfg(feature = "metrics")]
            metrics: TableMetrics::default(),
        }
    }

    /// Returns the number of stored pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no pairs are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the load-factor threshold that triggers a rehash.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the number of pairs chained in bucket `index`.
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        self.buckets.slot(index).map(DynamicArray::len)
    }

    /// Iterates over bucket `index` in chain order (oldest pair first).
    ///
    /// Yields nothing if `index >= capacity`.
    pub fn bucket_iter(&self, index: usize) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .slot(index)
            .into_iter()
            .flat_map(|bucket| bucket.iter())
            .map(|pair| (&pair.key, &pair.value))
    }

    /// Inserts a new pair; fails with [`TableError::KeyAlreadyExists`] if
    /// `key` is already stored.
    pub fn put(&mut self, key: K, value: V) -> Result<(), TableError> {
        if self.contains(&key) {
            return Err(TableError::KeyAlreadyExists);
        }
        self.reserve_one();
        self.push_pair(key, value);
        #[cfg(feature = "metrics")]
        self.metrics.record_put();
        Ok(())
    }

    /// Inserts or overwrites; returns the previous value if `key` was stored.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(&key) {
            let previous = mem::replace(slot, value);
            #[cfg(feature = "metrics")]
            self.metrics.record_update();
            return Some(previous);
        }
        self.reserve_one();
        self.push_pair(key, value);
        #[cfg(feature = "metrics")]
        self.metrics.record_put();
        None
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        let (bucket, pos) = self.locate(key);
        self.buckets
            .slot(bucket)?
            .slot(pos?)
            .map(KeyValuePair::value)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (bucket, pos) = self.locate(key);
        self.buckets
            .slot_mut(bucket)?
            .slot_mut(pos?)
            .map(KeyValuePair::value_mut)
    }

    /// Returns `true` if `key` is stored.
    pub fn contains(&self, key: &K) -> bool {
        self.locate(key).1.is_some()
    }

    /// Overwrites the value for an existing key in place and returns the old
    /// value; fails with [`TableError::KeyNotFound`] if `key` is absent.
    pub fn update(&mut self, key: &K, value: V) -> Result<V, TableError> {
        let slot = self.get_mut(key).ok_or(TableError::KeyNotFound)?;
        let previous = mem::replace(slot, value);
        #[cfg(feature = "metrics")]
        self.metrics.record_update();
        Ok(previous)
    }

    /// Removes `key` and returns its value; fails with
    /// [`TableError::KeyNotFound`] if `key` is absent.
    pub fn remove(&mut self, key: &K) -> Result<V, TableError> {
        let (bucket, pos) = self.locate(key);
        let pos = pos.ok_or(TableError::KeyNotFound)?;
        let pair = self.buckets[bucket]
            .remove_at(pos as isize)
            .map_err(|_| TableError::KeyNotFound)?;
        self.len -= 1;
        #[cfg(feature = "metrics")]
        self.metrics.record_remove();
        Ok(pair.value)
    }

    /// Removes every pair; the bucket count is kept.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Iterates over `(key, value)` pairs in bucket order.
    ///
    /// The order is unspecified and changes across rehashes.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter())
            .map(|pair| (&pair.key, &pair.value))
    }

    /// Iterates over the stored keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Iterates over the stored values.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Validates placement, uniqueness, length and the load-factor bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: fmt::Debug,
    {
        let mut counted = 0usize;
        for (index, bucket) in self.buckets.iter().enumerate() {
            for (pos, pair) in bucket.iter().enumerate() {
                let expected = self.bucket_index(&pair.key);
                if expected != index {
                    return Err(InvariantError::new(format!(
                        "key {:?} stored in bucket {} but hashes to bucket {}",
                        pair.key, index, expected
                    )));
                }
                if bucket.iter().skip(pos + 1).any(|other| other.key == pair.key) {
                    return Err(InvariantError::new(format!(
                        "key {:?} stored more than once in bucket {}",
                        pair.key, index
                    )));
                }
                counted += 1;
            }
        }
        if counted != self.len {
            return Err(InvariantError::new(format!(
                "counted {} pairs but len = {}",
                counted, self.len
            )));
        }
        if self.len as f64 / self.capacity() as f64 > self.load_factor {
            return Err(InvariantError::new(format!(
                "load {}/{} exceeds load factor {}",
                self.len,
                self.capacity(),
                self.load_factor
            )));
        }
        Ok(())
    }

    #[inline]
    fn bucket_index(&self, key: &K) -> usize {
        (self.hasher.hash_key(key) % self.capacity() as u64) as usize
    }

    /// Returns the bucket for `key` and, if present, its position inside it.
    fn locate(&self, key: &K) -> (usize, Option<usize>) {
        let bucket = self.bucket_index(key);
        let pos = self
            .buckets
            .slot(bucket)
            .and_then(|pairs| pairs.iter().position(|pair| pair.key == *key));
        (bucket, pos)
    }

    /// Doubles the bucket count once if one more pair would push the load
    /// above the threshold.
    fn reserve_one(&mut self) {
        let capacity = self.capacity();
        if (self.len + 1) as f64 / capacity as f64 <= self.load_factor {
            return;
        }
        match capacity.checked_mul(2) {
            Some(new_capacity) => self.rehash(new_capacity),
            None => tracing::warn!(capacity, "hash table bucket count cannot double further"),
        }
    }

    fn rehash(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity();
        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for bucket in old_buckets {
            for pair in bucket {
                let index = self.bucket_index(&pair.key);
                self.buckets[index].push(pair);
            }
        }

        tracing::debug!(
            old_capacity,
            new_capacity,
            len = self.len,
            "hash table rehashed"
        );
        #[cfg(feature = "metrics")]
        self.metrics.record_rehash();
    }

    fn push_pair(&mut self, key: K, value: V) {
        let index = self.bucket_index(&key);
        self.buckets[index].push(KeyValuePair::new(key, value));
        self.len += 1;
    }
}

#[cfg(feature = "metrics")]
impl<K, V, H> HashTable<K, V, H> {
    /// Returns a snapshot of the table's counters and gauges.
    pub fn metrics_snapshot(&self) -> TableMetricsSnapshot {
        TableMetricsSnapshot {
            puts: self.metrics.puts,
            updates: self.metrics.updates,
            removes: self.metrics.removes,
            rehashes: self.metrics.rehashes,
            len: self.len,
            capacity: self.buckets.len(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, H> MetricsSnapshotProvider<TableMetricsSnapshot> for HashTable<K, V, H> {
    fn snapshot(&self) -> TableMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// Renders `{"a": 1, "b": 2}` in bucket order.
impl<K, V, H> fmt::Display for HashTable<K, V, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let pairs = self.buckets.iter().flat_map(|bucket| bucket.iter());
        for (i, pair) in pairs.enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", pair)?;
        }
        f.write_str("}")
    }
}

/// Renders one line per bucket: `003 -> ["a": 1, "k": 11]`.
impl<K, V, H> fmt::Debug for HashTable<K, V, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            writeln!(f, "{:03} -> {:?}", index, bucket)?;
        }
        Ok(())
    }
}
