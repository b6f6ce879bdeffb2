//! API Handlers
//!
//! HTTP request handlers for the peer protocol and the node's own endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::group::Registry;
use crate::models::{ApiQuery, GroupStatsResponse, HealthResponse};
use crate::peers::protocol;

const OCTET_STREAM: &str = "application/octet-stream";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Groups served by this node
    pub registry: Arc<Registry>,
    /// Prefix of the peer protocol, starts and ends with `/`
    pub base_path: String,
    /// Group used by `/api` when the query names none
    pub default_group: String,
}

impl AppState {
    pub fn new(
        registry: Arc<Registry>,
        base_path: impl Into<String>,
        default_group: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            base_path: base_path.into(),
            default_group: default_group.into(),
        }
    }
}

// == Peer Path Parsing ==
/// Splits `{base_path}{group}/{key}` into its decoded segments.
pub fn parse_peer_path(base_path: &str, path: &str) -> Result<(String, String)> {
    let rest = path
        .strip_prefix(base_path)
        .ok_or_else(|| CacheError::InvalidRequest(format!("unexpected path {}", path)))?;

    let (group, key) = rest
        .split_once('/')
        .filter(|(group, key)| !group.is_empty() && !key.is_empty())
        .ok_or_else(|| CacheError::InvalidRequest(format!("expected {}<group>/<key>", base_path)))?;

    Ok((
        protocol::unescape_segment(group)?,
        protocol::unescape_segment(key)?,
    ))
}

/// Handler for GET {base_path}{group}/{key}
///
/// Serves a value to a peer as a protobuf `Response`.
pub async fn peer_handler(State(state): State<AppState>, uri: Uri) -> Result<Response> {
    let (group_name, key) = parse_peer_path(&state.base_path, uri.path())?;
    debug!(group = %group_name, key = %key, "peer request");

    let group = state
        .registry
        .get(&group_name)
        .ok_or(CacheError::GroupNotFound(group_name))?;
    let view = group.get(&key).await?;

    let body = protocol::Response::new(view.byte_slice()).to_bytes();
    Ok(([(header::CONTENT_TYPE, OCTET_STREAM)], body).into_response())
}

/// Handler for GET /api?key=K[&group=G]
///
/// Returns the raw value bytes.
pub async fn api_handler(
    State(state): State<AppState>,
    Query(query): Query<ApiQuery>,
) -> Result<Response> {
    let key = query.key.unwrap_or_default();
    let group_name = query.group.unwrap_or(state.default_group);

    let group = state
        .registry
        .get(&group_name)
        .ok_or(CacheError::GroupNotFound(group_name))?;
    let view = group.get(&key).await?;

    Ok(([(header::CONTENT_TYPE, OCTET_STREAM)], view.byte_slice()).into_response())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<Vec<GroupStatsResponse>> {
    Json(
        state
            .registry
            .groups()
            .iter()
            .map(GroupStatsResponse::from_group)
            .collect(),
    )
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Anything outside the known routes, including paths outside the peer prefix.
pub async fn fallback_handler(uri: Uri) -> CacheError {
    CacheError::InvalidRequest(format!("unexpected path {}", uri.path()))
}
