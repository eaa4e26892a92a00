//! Key-value stores backing the cache policies.

pub mod table;
