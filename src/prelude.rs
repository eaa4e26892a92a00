pub use crate::builder::{HashTableBuilder, LruCacheBuilder};
pub use crate::ds::{DynamicArray, IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ArrayError, ConfigError, InvariantError, TableError};
pub use crate::policy::lru::LruCache;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{LruMetricsSnapshot, TableMetricsSnapshot};
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
pub use crate::store::table::{FxKeyHasher, HashTable, KeyHasher, KeyValuePair};
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
