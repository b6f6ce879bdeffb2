//! Request DTOs for the cache node API
//!
//! Defines the query parameters accepted by the front API.

use serde::Deserialize;

/// Query string for the front API (`GET /api?key=K&group=G`)
///
/// # Fields
/// - `key`: The cache key to look up
/// - `group`: Optional group name, defaults to the node's configured group
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiQuery {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}
