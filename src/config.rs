//! Configuration Module
//!
//! Handles loading and managing node configuration from environment variables.

use std::env;

use crate::peers::{normalize_peer_url, DEFAULT_BASE_PATH};
use crate::ring::DEFAULT_REPLICAS;

/// Node configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL other nodes reach this one at
    pub self_url: String,
    /// Base URLs of every node in the fleet
    pub peers: Vec<String>,
    /// Path prefix of the peer protocol
    pub base_path: String,
    /// Virtual points per node on the hash ring
    pub replicas: usize,
    /// Byte budget of the local store (0 = unbounded)
    pub cache_bytes: usize,
    /// Name of the group this node serves
    pub group_name: String,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SELF_URL` - This node's base URL (default: http://localhost:8001)
    /// - `CACHE_PEERS` - Comma separated node URLs (default: self only)
    /// - `CACHE_BASE_PATH` - Peer protocol prefix (default: /_ringcache/)
    /// - `CACHE_REPLICAS` - Virtual points per node (default: 50)
    /// - `CACHE_BYTES` - Local store budget in bytes (default: 2048)
    /// - `CACHE_GROUP` - Group name (default: scores)
    /// - `SERVER_PORT` - HTTP server port (default: 8001)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let self_url = env::var("CACHE_SELF_URL")
            .map(|v| normalize_peer_url(&v))
            .unwrap_or(defaults.self_url);

        Self {
            peers: env::var("CACHE_PEERS")
                .map(|v| split_peers(&v))
                .unwrap_or_default(),
            base_path: env::var("CACHE_BASE_PATH")
                .map(|v| normalize_base_path(&v))
                .unwrap_or(defaults.base_path),
            replicas: parse_var("CACHE_REPLICAS").unwrap_or(defaults.replicas),
            cache_bytes: parse_var("CACHE_BYTES").unwrap_or(defaults.cache_bytes),
            group_name: env::var("CACHE_GROUP").unwrap_or(defaults.group_name),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            self_url,
        }
    }

    /// Peer URLs to put on the ring; always includes this node.
    pub fn peer_list(&self) -> Vec<String> {
        let mut peers: Vec<String> = Vec::new();
        let all = self.peers.iter().chain(std::iter::once(&self.self_url));
        for peer in all.map(|p| normalize_peer_url(p)) {
            if !peers.contains(&peer) {
                peers.push(peer);
            }
        }
        peers
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            self_url: "http://localhost:8001".to_string(),
            peers: Vec::new(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            replicas: DEFAULT_REPLICAS,
            cache_bytes: 2 << 10,
            group_name: "scores".to_string(),
            server_port: 8001,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Splits a comma separated URL list, dropping blanks and trailing slashes.
pub fn split_peers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_peer_url)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Ensures the prefix starts and ends with `/`.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}
