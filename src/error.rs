//! Error types for the chainkit library.
//!
//! ## Key Components
//!
//! - [`ArrayError`]: Returned by [`DynamicArray`](crate::ds::DynamicArray)
//!   when an index falls outside the live range or a removal hits an empty
//!   array.
//! - [`TableError`]: Returned by [`HashTable`](crate::store::table::HashTable) when a
//!   `put` finds the key already present, or an `update`/`remove` finds it
//!   missing.
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. zero capacity, non-positive load factor).
//! - [`InvariantError`]: Returned by `check_invariants` methods when internal
//!   structure invariants are violated.
//!
//! Lookups (`get`, `peek`, `contains`) never produce errors; they return
//! `Option` or `bool`.
//!
//! ## Example Usage
//!
//! ```
//! use chainkit::error::{ConfigError, TableError};
//! use chainkit::policy::lru::LruCache;
//! use chainkit::store::table::HashTable;
//!
//! let bad: Result<LruCache<u32, u32>, ConfigError> = LruCache::new(0);
//! assert!(bad.is_err());
//!
//! let mut table: HashTable<&str, i32> = HashTable::new();
//! table.put("a", 1).unwrap();
//! assert_eq!(table.put("a", 2), Err(TableError::KeyAlreadyExists));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ArrayError
// ---------------------------------------------------------------------------

/// Error returned by positional operations on a dynamic array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayError {
    /// The index (as given by the caller) is outside the live range.
    IndexOutOfRange { index: isize, len: usize },
    /// A removal was attempted on an array with no elements.
    EmptyContainer,
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            },
            ArrayError::EmptyContainer => f.write_str("cannot remove from an empty array"),
        }
    }
}

impl std::error::Error for ArrayError {}

// ---------------------------------------------------------------------------
// TableError
// ---------------------------------------------------------------------------

/// Error returned by keyed mutations on a hash table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// `put` was called with a key that is already stored.
    KeyAlreadyExists,
    /// `update` or `remove` was called with a key that is not stored.
    KeyNotFound,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::KeyAlreadyExists => f.write_str("key already exists"),
            TableError::KeyNotFound => f.write_str("key does not exist"),
        }
    }
}

impl std::error::Error for TableError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal invariants are violated.
///
/// Produced by `check_invariants` methods (e.g.
/// [`LruCache::check_invariants`](crate::policy::lru::LruCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LruCache::new`](crate::policy::lru::LruCache::new) and
/// [`HashTable::try_with_config`](crate::store::table::HashTable::try_with_config),
/// and by builder `try_build()` methods.
///
/// # Example
///
/// ```
/// use chainkit::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
