//! Peer Pool
//!
//! Owns the consistent-hash view of the fleet and one HTTP client per peer.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::peers::{HttpGetter, PeerGetter, PeerPicker};
use crate::ring::{HashRing, DEFAULT_REPLICAS};

/// Path prefix the peer protocol is served under.
pub const DEFAULT_BASE_PATH: &str = "/_ringcache/";

/// Canonical form of a node base URL: trimmed, no trailing slash.
pub fn normalize_peer_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// == Peer Table ==
/// Immutable snapshot of ring plus clients; replaced wholesale on `set`.
#[derive(Debug)]
struct PeerTable {
    ring: HashRing,
    getters: HashMap<String, Arc<HttpGetter>>,
}

// == HTTP Pool ==
/// Picks the owning peer for a key and hands out its HTTP client.
#[derive(Debug)]
pub struct HttpPool {
    /// This node's base URL, e.g. `http://localhost:8001`
    self_url: String,
    base_path: String,
    replicas: usize,
    client: reqwest::Client,
    table: RwLock<Arc<PeerTable>>,
}

impl HttpPool {
    // == Constructor ==
    /// Creates a pool for the node reachable at `self_url`, with no peers yet.
    pub fn new(self_url: impl Into<String>) -> Self {
        Self::with_options(self_url, DEFAULT_BASE_PATH, DEFAULT_REPLICAS)
    }

    pub fn with_options(
        self_url: impl Into<String>,
        base_path: impl Into<String>,
        replicas: usize,
    ) -> Self {
        Self {
            self_url: normalize_peer_url(&self_url.into()),
            base_path: base_path.into(),
            replicas,
            client: reqwest::Client::new(),
            table: RwLock::new(Arc::new(PeerTable {
                ring: HashRing::new(replicas, None),
                getters: HashMap::new(),
            })),
        }
    }

    pub fn self_url(&self) -> &str {
        &self.self_url
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    // == Set ==
    /// Replaces the peer list (base URLs, self included).
    ///
    /// The new ring and client table are built off to the side and published
    /// in one swap, so concurrent lookups see either the old or the new view.
    pub fn set<I, S>(&self, input: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut peers: Vec<String> = Vec::new();
        for peer in input {
            let peer = normalize_peer_url(peer.as_ref());
            if !peer.is_empty() && !peers.contains(&peer) {
                peers.push(peer);
            }
        }

        let mut ring = HashRing::new(self.replicas, None);
        ring.add(&peers);
        let getters = peers
            .iter()
            .map(|peer| {
                let getter = HttpGetter::new(
                    format!("{}{}", peer, self.base_path),
                    self.client.clone(),
                );
                (peer.clone(), Arc::new(getter))
            })
            .collect();

        *self.table.write() = Arc::new(PeerTable { ring, getters });
        info!(node = %self.self_url, peers = ?peers, "peer set updated");
    }

    /// Returns the URL of the node owning `key`, self included.
    pub fn owner_of(&self, key: &str) -> Option<String> {
        self.table.read().ring.get(key).map(str::to_string)
    }
}

impl PeerPicker for HttpPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        let table = Arc::clone(&self.table.read());
        let owner = table.ring.get(key)?;
        if owner == self.self_url {
            return None;
        }
        debug!(node = %self.self_url, peer = owner, key, "picked remote owner");
        let getter = table.getters.get(owner)?;
        Some(Arc::clone(getter) as Arc<dyn PeerGetter>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODES: [&str; 3] = [
        "http://localhost:8001",
        "http://localhost:8002",
        "http://localhost:8003",
    ];

    #[test]
    fn test_empty_pool_picks_nothing() {
        let pool = HttpPool::new(NODES[0]);
        assert!(pool.pick_peer("Tom").is_none());
        assert_eq!(pool.owner_of("Tom"), None);
    }

    #[test]
    fn test_self_owned_keys_are_not_forwarded() {
        let pool = HttpPool::new(NODES[0]);
        pool.set(NODES);

        let mut local = 0;
        let mut remote = 0;
        for i in 0..200 {
            let key = format!("key-{}", i);
            let owner = pool.owner_of(&key).unwrap();
            match pool.pick_peer(&key) {
                Some(_) => {
                    assert_ne!(owner, NODES[0]);
                    remote += 1;
                }
                None => {
                    assert_eq!(owner, NODES[0]);
                    local += 1;
                }
            }
        }
        assert!(local > 0 && remote > 0);
    }

    #[test]
    fn test_only_self_means_always_local() {
        let pool = HttpPool::new(NODES[1]);
        pool.set([NODES[1]]);

        assert!(pool.pick_peer("anything").is_none());
        assert_eq!(pool.owner_of("anything").as_deref(), Some(NODES[1]));
    }

    #[test]
    fn test_set_replaces_previous_peers() {
        let pool = HttpPool::new(NODES[0]);
        pool.set([NODES[1]]);
        assert_eq!(pool.owner_of("Tom").as_deref(), Some(NODES[1]));

        pool.set([NODES[2]]);
        assert_eq!(pool.owner_of("Tom").as_deref(), Some(NODES[2]));
    }

    #[test]
    fn test_trailing_slashes_do_not_duplicate_self() {
        let pool = HttpPool::new("http://localhost:8001/");
        pool.set([
            "http://localhost:8001",
            "http://localhost:8001/",
            "http://localhost:8002/",
        ]);

        let table = Arc::clone(&pool.table.read());
        assert_eq!(table.getters.len(), 2);
        assert_eq!(table.ring.points().len(), 2 * DEFAULT_REPLICAS);

        for i in 0..200 {
            let key = format!("key-{}", i);
            let owner = pool.owner_of(&key).unwrap();
            assert!(!owner.ends_with('/'));
            assert_eq!(pool.pick_peer(&key).is_none(), owner == NODES[0]);
        }
    }

    #[test]
    fn test_normalize_peer_url() {
        assert_eq!(normalize_peer_url(" http://a:1/ "), "http://a:1");
        assert_eq!(normalize_peer_url("http://a:1//"), "http://a:1");
        assert_eq!(normalize_peer_url("http://a:1"), "http://a:1");
    }

    #[test]
    fn test_getter_url_includes_base_path() {
        let pool = HttpPool::with_options(NODES[0], "/_custom/", 5);
        pool.set([NODES[1]]);

        let table = Arc::clone(&pool.table.read());
        let getter = table.getters.get(NODES[1]).unwrap();
        assert_eq!(getter.base_url(), "http://localhost:8002/_custom/");
        assert_eq!(table.ring.points().len(), 5);
    }
}
