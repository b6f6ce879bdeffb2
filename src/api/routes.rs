//! API Routes
//!
//! Configures the Axum router with the peer protocol and node endpoints.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{
    api_handler, fallback_handler, health_handler, peer_handler, stats_handler, AppState,
};

/// Creates the main router.
///
/// # Endpoints
/// - `GET {base_path}{group}/{key}` - Peer protocol
/// - `GET /api?key=K[&group=G]` - Raw value lookup
/// - `GET /stats` - Per-group statistics
/// - `GET /health` - Health check endpoint
///
/// Any other path is answered with 400.
pub fn create_router(state: AppState) -> Router {
    let peer_route = format!("{}*rest", state.base_path);

    Router::new()
        .route(&peer_route, get(peer_handler))
        .route("/api", get(api_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
