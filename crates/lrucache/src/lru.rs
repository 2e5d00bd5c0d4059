//! LRU (Least Recently Used) cache implementation
//!
//! The index maps each key to a [`Handle`] into the slot arena; the arena
//! slots carry `prev`/`next` handles that thread the recency list from
//! `head` (most recently used) to `tail` (least recently used).
//!
//! ```text
//!   map: { a -> #2, b -> #0, c -> #1 }
//!
//!   head ──► [#2 a] ◄──► [#0 b] ◄──► [#1 c] ◄── tail
//!            MRU                      LRU
//! ```
//!
//! Every lookup and every relink is O(1). The map and the list are only
//! ever mutated together inside this module.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::arena::{Arena, Handle};
use crate::capacity::Capacity;
use crate::error::Result;

/// Upper bound on slots reserved up front, so huge capacities stay lazy
const PREALLOC_LIMIT: usize = 1024;

/// Node in the LRU doubly-linked list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// LRU cache with fixed capacity
///
/// # Example
/// ```
/// use lrucache::LruCache;
///
/// let mut cache = LruCache::new(2)?;
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a");      // promote a
/// cache.put("c", 3);    // evicts b
///
/// assert!(!cache.contains(&"b"));
/// assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec!["c", "a"]);
/// # Ok::<(), lrucache::Error>(())
/// ```
pub struct LruCache<K, V> {
    map: HashMap<K, Handle, RandomState>,
    nodes: Arena<Node<K, V>>,
    head: Option<Handle>,
    tail: Option<Handle>,
    capacity: Capacity,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Returns
    /// * `Err(Error::InvalidCapacity)` when `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::with_capacity(Capacity::new(capacity)?))
    }

    /// Create a new LRU cache from an already validated capacity
    pub fn with_capacity(capacity: Capacity) -> Self {
        let prealloc = capacity.get().min(PREALLOC_LIMIT);
        debug!(capacity = capacity.get(), "created LRU cache");

        Self {
            map: HashMap::with_capacity_and_hasher(prealloc, RandomState::new()),
            nodes: Arena::with_capacity(prealloc),
            head: None,
            tail: None,
            capacity,
        }
    }

    /// Get a value from the cache, marking it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.map.get(key)?;
        self.move_to_front(handle);
        self.nodes.get(handle).map(|node| &node.value)
    }

    /// Mutable variant of [`get`](Self::get); also promotes the entry
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.map.get(key)?;
        self.move_to_front(handle);
        self.nodes.get_mut(handle).map(|node| &mut node.value)
    }

    /// Get a value without touching the recency order
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.map.get(key)?;
        self.nodes.get(handle).map(|node| &node.value)
    }

    /// Check membership without touching the recency order
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Insert a key-value pair into the cache
    ///
    /// An existing key has its value replaced and is promoted. A new key
    /// goes to the front, evicting the least recently used entry first if
    /// the cache is full.
    pub fn put(&mut self, key: K, value: V) {
        self.push(key, value);
    }

    /// Insert a key-value pair and report what left the cache
    ///
    /// # Returns
    /// * `Some((key, old_value))` - key was present and its value replaced
    /// * `Some((lru_key, lru_value))` - the cache was full and this entry was evicted
    /// * `None` - a new entry was added without eviction
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&handle) = self.map.get(&key) {
            let old = self
                .nodes
                .get_mut(handle)
                .map(|node| std::mem::replace(&mut node.value, value));
            self.move_to_front(handle);
            return old.map(|old| (key, old));
        }

        let evicted = if self.map.len() >= self.capacity.get() {
            let evicted = self.pop_lru();
            trace!(capacity = self.capacity.get(), "evicted least recently used entry");
            evicted
        } else {
            None
        };

        let handle = self.nodes.insert(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.attach_front(handle);
        self.map.insert(key, handle);

        evicted
    }

    /// Remove a key from the cache
    ///
    /// # Returns
    /// * `true` if an entry was removed, `false` if the key was absent
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.pop(key).is_some()
    }

    /// Remove a key from the cache and return its value
    pub fn pop<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.map.remove(key)?;
        self.unlink(handle);
        self.nodes.remove(handle).map(|node| node.value)
    }

    /// Remove and return the least recently used entry
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        self.unlink(tail);
        let node = self.nodes.remove(tail)?;
        self.map.remove(&node.key);
        Some((node.key, node.value))
    }
}

impl<K, V> LruCache<K, V> {
    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// The entry that the next insertion into a full cache would evict
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let node = self.nodes.get(self.tail?)?;
        Some((&node.key, &node.value))
    }

    /// Iterate entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.nodes.len(),
        }
    }

    /// Iterate keys from most to least recently used
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) {
            return;
        }

        self.unlink(handle);
        self.attach_front(handle);
    }

    fn attach_front(&mut self, handle: Handle) {
        let old_head = self.head;

        if let Some(node) = self.nodes.get_mut(handle) {
            node.prev = None;
            node.next = old_head;
        }

        if let Some(head) = old_head.and_then(|idx| self.nodes.get_mut(idx)) {
            head.prev = Some(handle);
        }

        self.head = Some(handle);
        if self.tail.is_none() {
            self.tail = Some(handle);
        }
    }

    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = match self.nodes.get_mut(handle) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = self.nodes.get_mut(prev_idx) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = self.nodes.get_mut(next_idx) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity.get())
            .field("entries", &DebugEntries(self))
            .finish()
    }
}

struct DebugEntries<'a, K, V>(&'a LruCache<K, V>);

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for DebugEntries<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(key, value)` pairs, most recently used first
///
/// Created by [`LruCache::iter`]. Use `.rev()` to walk from the least
/// recently used end.
pub struct Iter<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over keys, most recently used first
///
/// Created by [`LruCache::keys`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}
