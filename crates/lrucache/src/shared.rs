//! SharedLruCache: thread-safe handle around an LRU cache

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::capacity::Capacity;
use crate::error::Result;
use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Cloneable, lock-protected LRU cache with hit/miss statistics
///
/// Each method holds the lock for the whole lookup-and-relink step, so the
/// index and the recency list are never observed half updated. `get` and
/// `put` reorder entries and take the write lock; `peek`, `contains`,
/// `len` and `keys` only read and share the read lock.
pub struct SharedLruCache<K, V> {
    /// LRU cache for hot data
    cache: Arc<RwLock<LruCache<K, V>>>,

    /// Cache statistics
    stats: Arc<CacheStats>,
}

impl<K, V> Clone for SharedLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<K, V> SharedLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new SharedLruCache with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of items in cache
    ///
    /// # Returns
    /// * `Err(Error::InvalidCapacity)` when `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::with_capacity(Capacity::new(capacity)?))
    }

    /// Create a new SharedLruCache from an already validated capacity
    pub fn with_capacity(capacity: Capacity) -> Self {
        Self {
            cache: Arc::new(RwLock::new(LruCache::with_capacity(capacity))),
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Get a copy of a value, marking it most recently used
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut cache = self.cache.write();
        match cache.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Get a copy of a value without touching the recency order
    ///
    /// Peeks do not count towards hits or misses.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.read().peek(key).cloned()
    }

    /// Check membership without touching the recency order
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.read().contains(key)
    }

    /// Insert or overwrite a value
    pub fn put(&self, key: K, value: V) {
        let mut cache = self.cache.write();
        if cache.contains(&key) {
            cache.put(key, value);
            self.stats.record_update();
            return;
        }

        if cache.push(key, value).is_some() {
            self.stats.record_eviction();
        }
        self.stats.record_insert();
    }

    /// Remove a key from the cache
    ///
    /// # Returns
    /// * `true` if an entry was removed
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.cache.write().remove(key);
        if removed {
            self.stats.record_removal();
        }
        removed
    }

    /// Remove and return the least recently used entry
    pub fn pop_lru(&self) -> Option<(K, V)> {
        let entry = self.cache.write().pop_lru();
        if entry.is_some() {
            self.stats.record_removal();
        }
        entry
    }

    /// Snapshot of keys, most recently used first
    pub fn keys(&self) -> Vec<K> {
        self.cache.read().keys().cloned().collect()
    }

    /// The entry next in line for eviction
    pub fn peek_lru(&self) -> Option<(K, V)> {
        self.cache
            .read()
            .peek_lru()
            .map(|(key, value)| (key.clone(), value.clone()))
    }
}

impl<K, V> SharedLruCache<K, V> {
    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zero all statistics counters
    pub fn reset_stats(&self) {
        self.stats.reset();
        debug!("cache statistics reset");
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.read().capacity()
    }

    /// Drop every entry (statistics are kept)
    pub fn clear(&self) {
        let mut cache = self.cache.write();
        let dropped = cache.len();
        cache.clear();
        debug!(dropped, "cache cleared");
    }
}
