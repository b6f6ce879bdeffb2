//! Peers Module
//!
//! Peer selection and the HTTP transport between cache nodes.
//!
//! # Wire Protocol
//! - `GET {base_path}{group}/{key}` (both segments percent-encoded; `.` and
//!   `..` are sent as `!.` and `!..`)
//! - `200` body: protobuf-encoded `Response { value: bytes }`
//! - `400` malformed path, `404` unknown group, `500` load failure (plain text)

pub mod client;
pub mod pool;
pub mod protocol;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub use client::HttpGetter;
pub use pool::{normalize_peer_url, HttpPool, DEFAULT_BASE_PATH};

// == Peer Getter ==
/// Fetches a value for `(group, key)` from one remote node.
#[async_trait]
pub trait PeerGetter: Send + Sync {
    async fn get(&self, group: &str, key: &str) -> Result<Vec<u8>>;
}

// == Peer Picker ==
/// Locates the node that owns a key.
pub trait PeerPicker: Send + Sync {
    /// Returns the owning peer, or `None` when the key is owned locally
    /// (or no peers are known).
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}
