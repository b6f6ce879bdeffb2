//! Cache Group
//!
//! A named cache namespace: local store, peer routing and loader behind one
//! `get`.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, info, warn};

use crate::cache::{ByteView, CacheStats, OnEvicted, SharedStore};
use crate::coalesce::Coalescer;
use crate::error::{CacheError, Result};
use crate::group::{GroupStats, GroupStatsSnapshot, Loader, Registry};
use crate::peers::PeerPicker;

// == Group Builder ==
/// Collects group settings; `build`/`register` validate them.
pub struct GroupBuilder {
    name: String,
    cache_bytes: usize,
    loader: Option<Arc<dyn Loader>>,
    on_evicted: Option<OnEvicted>,
}

impl GroupBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cache_bytes: 0,
            loader: None,
            on_evicted: None,
        }
    }

    /// Byte budget of the local store; 0 means unbounded.
    pub fn cache_bytes(mut self, cache_bytes: usize) -> Self {
        self.cache_bytes = cache_bytes;
        self
    }

    pub fn loader(self, loader: impl Loader + 'static) -> Self {
        self.shared_loader(Arc::new(loader))
    }

    pub fn shared_loader(mut self, loader: Arc<dyn Loader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Hook called for each evicted entry, with the store lock held.
    pub fn on_evicted<F>(mut self, on_evicted: F) -> Self
    where
        F: Fn(&str, &ByteView) + Send + Sync + 'static,
    {
        self.on_evicted = Some(Box::new(on_evicted));
        self
    }

    /// Builds a group without registering it anywhere.
    pub fn build(self) -> Result<CacheGroup> {
        let loader = self.loader.ok_or_else(|| {
            CacheError::Config(format!("group {} has no loader", self.name))
        })?;

        Ok(CacheGroup {
            inner: Arc::new(GroupInner {
                store: SharedStore::new(self.cache_bytes, self.on_evicted),
                name: self.name,
                loader,
                peers: OnceLock::new(),
                coalescer: Coalescer::new(),
                stats: GroupStats::default(),
            }),
        })
    }

    /// Builds the group and adds it to `registry`.
    pub fn register(self, registry: &Registry) -> Result<CacheGroup> {
        let group = self.build()?;
        registry.register(group.clone())?;
        Ok(group)
    }
}

// == Cache Group ==
/// Cheap-to-clone handle to a group; clones share all state.
#[derive(Clone)]
pub struct CacheGroup {
    inner: Arc<GroupInner>,
}

struct GroupInner {
    name: String,
    store: SharedStore,
    loader: Arc<dyn Loader>,
    peers: OnceLock<Arc<dyn PeerPicker>>,
    coalescer: Coalescer<ByteView>,
    stats: GroupStats,
}

impl CacheGroup {
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    // == Register Peers ==
    /// Installs the peer picker. Allowed once per group.
    pub fn register_peers(&self, peers: Arc<dyn PeerPicker>) -> Result<()> {
        self.inner.peers.set(peers).map_err(|_| {
            CacheError::Config(format!(
                "peers already registered for group {}",
                self.inner.name
            ))
        })?;
        info!(group = %self.inner.name, "peers registered");
        Ok(())
    }

    // == Get ==
    /// Returns the value for `key`.
    ///
    /// Order: local store, then (coalesced per key) the ring owner if it is a
    /// remote peer, then the loader. Only loader results are stored locally.
    pub async fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        let inner = &self.inner;
        inner.stats.record_get();
        if let Some(value) = inner.store.get(key) {
            inner.stats.record_hit();
            debug!(group = %inner.name, key, "cache hit");
            return Ok(value);
        }

        inner.stats.record_load();
        let loading = Arc::clone(inner);
        let owned_key = key.to_string();
        inner
            .coalescer
            .run(key, move || async move { loading.fetch(&owned_key).await })
            .await
    }

    /// Whether `key` is in this node's local store. Does not affect recency.
    pub fn is_cached(&self, key: &str) -> bool {
        self.inner.store.contains(key)
    }

    pub fn stats(&self) -> GroupStatsSnapshot {
        self.inner.stats.snapshot()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.inner.store.stats()
    }
}

impl GroupInner {
    async fn fetch(&self, key: &str) -> Result<ByteView> {
        let peer = self.peers.get().and_then(|picker| picker.pick_peer(key));
        if let Some(peer) = peer {
            match peer.get(&self.name, key).await {
                Ok(bytes) => {
                    self.stats.record_peer_load();
                    return Ok(ByteView::from(bytes));
                }
                Err(err) => {
                    self.stats.record_peer_error();
                    warn!(group = %self.name, key, error = %err, "peer fetch failed, loading locally");
                }
            }
        }

        self.load_locally(key).await
    }

    async fn load_locally(&self, key: &str) -> Result<ByteView> {
        let bytes = match self.loader.load(key).await {
            Ok(bytes) => bytes,
            Err(err) => {
                self.stats.record_local_load_error();
                return Err(CacheError::Loader(err.to_string()));
            }
        };
        self.stats.record_local_load();

        let value = ByteView::from(bytes);
        self.store.add(key, value.clone());
        Ok(value)
    }
}

impl fmt::Debug for CacheGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheGroup")
            .field("name", &self.inner.name)
            .field("store", &self.inner.store)
            .field("has_peers", &self.inner.peers.get().is_some())
            .finish()
    }
}
