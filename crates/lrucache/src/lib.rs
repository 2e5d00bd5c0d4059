//! # lrucache
//!
//! Fixed-capacity LRU cache with O(1) get/put.
//!
//! ## Architecture
//! - **Index**: AHash map from key to arena handle (O(1))
//! - **Recency List**: doubly-linked list threaded through a slot arena,
//!   most recently used at the front (O(1) promotion and eviction)
//! - **SharedLruCache**: `Arc<RwLock<..>>` handle with hit/miss statistics
//!   for callers that share one cache between threads
//!
//! Misses are reported as `None`; the only fallible operation is
//! construction, which rejects a capacity below 1.

#![warn(missing_docs)]

mod arena;
mod capacity;
mod error;
mod lru;
mod shared;
mod stats;

pub use capacity::Capacity;
pub use error::{Error, Result};
pub use lru::{Iter, Keys, LruCache};
pub use shared::SharedLruCache;
pub use stats::{CacheStats, StatsSnapshot};
