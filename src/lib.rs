//! Ringcache - A sharded read-through cache
//!
//! Every node holds a byte-bounded LRU store and a consistent-hash view of the
//! fleet. A miss is forwarded to the key's owning node over HTTP, or loaded
//! from the data source when this node is the owner; concurrent misses for the
//! same key share a single fetch.

pub mod api;
pub mod cache;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod group;
pub mod models;
pub mod peers;
pub mod ring;

pub use api::{create_router, AppState};
pub use cache::ByteView;
pub use config::Config;
pub use error::{CacheError, Result};
pub use group::{loader_fn, CacheGroup, GroupBuilder, Loader, Registry};
pub use peers::{HttpPool, PeerGetter, PeerPicker};
