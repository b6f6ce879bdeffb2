//! Response DTOs for the cache node API
//!
//! Defines the JSON bodies of the health and stats endpoints.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::group::{CacheGroup, GroupStatsSnapshot};

/// One entry of the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct GroupStatsResponse {
    /// Group name
    pub group: String,
    /// Group-level counters
    pub stats: GroupStatsSnapshot,
    /// Local store counters
    pub cache: CacheStats,
    /// Local store hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl GroupStatsResponse {
    /// Captures the current counters of `group`
    pub fn from_group(group: &CacheGroup) -> Self {
        let cache = group.cache_stats();
        Self {
            group: group.name().to_string(),
            stats: group.stats(),
            hit_rate: cache.hit_rate(),
            cache,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
