//! Ringcache node binary
//!
//! Runs one cache node: a demo group backed by an in-memory slow source, the
//! peer protocol and the front API on a single port.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ringcache::{create_router, loader_fn, AppState, Config, GroupBuilder, HttpPool, Registry};

/// Main entry point for a cache node.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Register the group with its loader
/// 4. Build the peer pool and register it with the group
/// 5. Serve the router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ringcache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ringcache node");

    let config = Config::from_env();
    info!(
        "Configuration loaded: self={}, peers={:?}, cache_bytes={}, replicas={}, port={}",
        config.self_url,
        config.peer_list(),
        config.cache_bytes,
        config.replicas,
        config.server_port
    );

    let registry = Arc::new(Registry::new());
    let group = GroupBuilder::new(config.group_name.clone())
        .cache_bytes(config.cache_bytes)
        .loader(loader_fn(slow_db_lookup))
        .register(&registry)?;

    let pool = Arc::new(HttpPool::with_options(
        config.self_url.clone(),
        config.base_path.clone(),
        config.replicas,
    ));
    pool.set(config.peer_list());
    group.register_peers(pool)?;

    let app = create_router(AppState::new(
        registry,
        config.base_path.clone(),
        config.group_name.clone(),
    ));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Node listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Node shutdown complete");
    Ok(())
}

/// Demo data source standing in for a slow database.
async fn slow_db_lookup(key: String) -> anyhow::Result<Vec<u8>> {
    let db: HashMap<&str, &str> = HashMap::from([("Tom", "630"), ("Jack", "589"), ("Sam", "567")]);

    info!(key = %key, "[SlowDB] search key");
    tokio::time::sleep(Duration::from_millis(50)).await;
    db.get(key.as_str())
        .map(|v| v.as_bytes().to_vec())
        .ok_or_else(|| anyhow!("{} not exist", key))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
