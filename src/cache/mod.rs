//! Cache Module
//!
//! Provides the byte-bounded LRU store backing each cache group.

mod byteview;
mod lru;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use byteview::ByteView;
pub use lru::LruTracker;
pub use shared::SharedStore;
pub use stats::CacheStats;
pub use store::{LruStore, OnEvicted};
