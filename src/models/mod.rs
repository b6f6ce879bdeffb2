//! Request and Response models for the cache node API
//!
//! DTOs used by the front API, stats and health endpoints. Peer traffic uses
//! the protobuf message in `peers::protocol` instead.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::ApiQuery;
pub use responses::{GroupStatsResponse, HealthResponse};
