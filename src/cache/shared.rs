//! Shared Store Module
//!
//! Mutex-guarded facade over `LruStore`; one lock per store instance.

use parking_lot::Mutex;

use crate::cache::{ByteView, CacheStats, LruStore, OnEvicted};

// == Shared Store ==
/// Thread-safe wrapper so only one add/get runs at a time per store.
///
/// The eviction hook runs while the lock is held and must not block.
#[derive(Debug)]
pub struct SharedStore {
    inner: Mutex<LruStore>,
}

impl SharedStore {
    pub fn new(max_bytes: usize, on_evicted: Option<OnEvicted>) -> Self {
        Self {
            inner: Mutex::new(LruStore::new(max_bytes, on_evicted)),
        }
    }

    pub fn add(&self, key: &str, value: ByteView) {
        self.inner.lock().add(key, value);
    }

    pub fn get(&self, key: &str) -> Option<ByteView> {
        self.inner.lock().get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}
