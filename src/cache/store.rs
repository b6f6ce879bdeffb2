//! Cache Store Module
//!
//! Byte-bounded LRU store combining a HashMap with recency tracking.
//! Not synchronized; see `SharedStore` for the locked facade.

use std::collections::HashMap;
use std::fmt;

use crate::cache::{ByteView, CacheStats, LruTracker};

/// Callback invoked with each entry the store evicts.
pub type OnEvicted = Box<dyn Fn(&str, &ByteView) + Send + Sync>;

// == LRU Store ==
/// Key/value storage bounded by total bytes (`len(key) + len(value)` per entry).
///
/// A `max_bytes` of zero means unbounded.
pub struct LruStore {
    /// Key-value storage
    entries: HashMap<String, ByteView>,
    /// LRU access tracker
    lru: LruTracker,
    /// Byte budget, 0 = unbounded
    max_bytes: usize,
    /// Bytes currently accounted
    used_bytes: usize,
    /// Optional eviction hook
    on_evicted: Option<OnEvicted>,
    /// Performance statistics
    stats: CacheStats,
}

impl LruStore {
    // == Constructor ==
    /// Creates a store with the given byte budget and optional eviction hook.
    pub fn new(max_bytes: usize, on_evicted: Option<OnEvicted>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            max_bytes,
            used_bytes: 0,
            on_evicted,
            stats: CacheStats::new(),
        }
    }

    // == Add ==
    /// Inserts or replaces `key`, marking it most recently used, then evicts
    /// least recently used entries until the byte budget holds.
    pub fn add(&mut self, key: &str, value: ByteView) {
        match self.entries.get_mut(key) {
            Some(existing) => {
                self.used_bytes = self.used_bytes + value.len() - existing.len();
                *existing = value;
            }
            None => {
                self.used_bytes += key.len() + value.len();
                self.entries.insert(key.to_string(), value);
            }
        }
        self.lru.touch(key);

        while self.max_bytes != 0 && self.used_bytes > self.max_bytes {
            if !self.remove_oldest() {
                break;
            }
        }
    }

    // == Get ==
    /// Looks up `key`, promoting it to most recently used on a hit.
    pub fn get(&mut self, key: &str) -> Option<ByteView> {
        match self.entries.get(key) {
            Some(value) => {
                let value = value.clone();
                self.lru.touch(key);
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry. Returns false when empty.
    pub fn remove_oldest(&mut self) -> bool {
        let Some(key) = self.lru.evict_oldest() else {
            return false;
        };
        if let Some(value) = self.entries.remove(&key) {
            self.used_bytes -= key.len() + value.len();
            self.stats.record_eviction();
            if let Some(on_evicted) = &self.on_evicted {
                on_evicted(&key, &value);
            }
        }
        true
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes currently accounted against the budget.
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Checks presence without touching recency or stats.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_totals(self.entries.len(), self.used_bytes);
        stats
    }
}

impl fmt::Debug for LruStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruStore")
            .field("entries", &self.entries.len())
            .field("max_bytes", &self.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_store_add_and_get() {
        let mut store = LruStore::new(0, None);

        store.add("key1", ByteView::from("1234"));

        assert_eq!(store.get("key1"), Some(ByteView::from("1234")));
        assert_eq!(store.get("key2"), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.used_bytes(), 8);
    }

    #[test]
    fn test_store_overwrite_adjusts_size() {
        let mut store = LruStore::new(0, None);

        store.add("k", ByteView::from("aa"));
        store.add("k", ByteView::from("aaaaa"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.used_bytes(), 6);
        assert_eq!(store.get("k").unwrap().to_string(), "aaaaa");

        store.add("k", ByteView::from("a"));
        assert_eq!(store.used_bytes(), 2);
    }

    #[test]
    fn test_store_miss_does_not_mutate() {
        let mut store = LruStore::new(0, None);
        store.add("a", ByteView::from("1"));
        store.add("b", ByteView::from("2"));

        assert!(store.get("zzz").is_none());

        assert_eq!(store.used_bytes(), 4);
        store.remove_oldest();
        assert!(!store.contains("a"));
        assert!(store.contains("b"));
    }

    #[test]
    fn test_store_evicts_least_recently_used() {
        let mut store = LruStore::new(20, None);

        store.add("k1", ByteView::from("v1"));
        store.add("k2", ByteView::from("v2"));
        store.get("k1");
        store.add("k3", ByteView::from("0123456789abcd"));

        assert!(store.contains("k1"));
        assert!(!store.contains("k2"));
        assert!(store.contains("k3"));
        assert!(store.used_bytes() <= 20);
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_unbounded_never_evicts() {
        let mut store = LruStore::new(0, None);
        for i in 0..1000 {
            store.add(&format!("key{}", i), ByteView::from("value"));
        }
        assert_eq!(store.len(), 1000);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_oversized_entry_evicts_everything() {
        let mut store = LruStore::new(10, None);
        store.add("a", ByteView::from("1"));

        store.add("big", ByteView::from("0123456789"));

        assert!(store.is_empty());
        assert_eq!(store.used_bytes(), 0);
    }

    #[test]
    fn test_store_on_evicted_callback() {
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&evicted);
        let callback: OnEvicted = Box::new(move |key, value| {
            sink.lock().unwrap().push((key.to_string(), value.to_string()));
        });

        let cap = "key1".len() + "value1".len();
        let mut store = LruStore::new(cap, Some(callback));
        store.add("key1", ByteView::from("value1"));
        store.add("k2", ByteView::from("k2"));
        store.add("k3", ByteView::from("k3"));
        store.add("k4", ByteView::from("k4"));

        let evicted = evicted.lock().unwrap();
        assert_eq!(
            *evicted,
            vec![
                ("key1".to_string(), "value1".to_string()),
                ("k2".to_string(), "k2".to_string()),
            ]
        );
    }

    #[test]
    fn test_store_stats() {
        let mut store = LruStore::new(0, None);

        store.add("key1", ByteView::from("value1"));
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.used_bytes, 10);
    }
}
