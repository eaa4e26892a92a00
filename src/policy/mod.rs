//! Eviction policies built on the [`store`](crate::store) tables.

pub mod lru;
