//! Data-synchronization layer
//!
//! A keyed cache sits between views and the resource clients. Reads go through
//! [`QueryCache::get_or_fetch`], which serves fresh entries from memory, joins an
//! in-flight load for the same key, or starts a new load. Mutations made through
//! [`LabStore`] invalidate the keys they affect so the next read refetches.
//!
//! The store is an ordinary value: construct one per application instance and
//! pass it by reference.

pub mod cache;
pub mod key;
pub mod store;

pub use cache::{CacheStats, LoadState, QueryCache, SyncConfig};
pub use key::QueryKey;
pub use store::LabStore;
