//! Error types for the cache node
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache node.
///
/// Cloneable so a single load result can be handed to every caller that
/// joined the same in-flight wave.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Empty key passed to a group lookup
    #[error("key is required")]
    EmptyKey,

    /// Malformed peer request path
    #[error("bad request: {0}")]
    InvalidRequest(String),

    /// Group name not present in the registry
    #[error("no such group: {0}")]
    GroupNotFound(String),

    /// The data source failed to produce a value
    #[error("{0}")]
    Loader(String),

    /// Network failure talking to a peer
    #[error("peer transport error: {0}")]
    Transport(String),

    /// Peer answered with a non-success status
    #[error("server returned: {0}")]
    Status(String),

    /// Peer body could not be decoded as a Response message
    #[error("decoding response body: {0}")]
    Decode(String),

    /// Invalid setup (missing loader, duplicate registration)
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// HTTP status this error maps to when it crosses the transport boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::EmptyKey | CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        // Plain-text body, peers only look at the status
        (self.status_code(), self.to_string()).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache node.
pub type Result<T> = std::result::Result<T, CacheError>;
