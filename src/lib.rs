//! chainkit: a growable array, a separate-chaining hash table built on it,
//! and a fixed-capacity LRU cache composing two hash tables with a recency
//! chain.
//!
//! ```text
//!   LruCache ──► HashTable ──► DynamicArray
//!      │
//!      └──► IntrusiveList ──► SlotArena ──► DynamicArray
//! ```
//!
//! Data flows upward only; no structure calls back into its owner.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod store;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use ds::DynamicArray;
pub use error::{ArrayError, ConfigError, InvariantError, TableError};
pub use policy::lru::LruCache;
pub use store::table::HashTable;
