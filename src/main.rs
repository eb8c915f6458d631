//! Movies Gateway - read-only film, genre, and person API
//!
//! Serves records from a search index through a read-through cache.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movies_gateway::api::{create_router, AppState};
use movies_gateway::cache::{CachePort, MemoryCache, RedisCache};
use movies_gateway::config::{CacheBackend, Config};
use movies_gateway::search::ElasticSearch;
use movies_gateway::spawn_cleanup_task;

/// Main entry point for the gateway.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the cache store (Redis, or the in-process store plus its purge task)
/// 4. Create the search client
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movies_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Movies Gateway");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache={:?}, elastic={}, indices=({}, {}, {})",
        config.server_port,
        config.cache_backend,
        config.elastic_url,
        config.films_index,
        config.genres_index,
        config.persons_index
    );

    let (cache, cleanup_handle): (Arc<dyn CachePort>, Option<JoinHandle<()>>) =
        match config.cache_backend {
            CacheBackend::Redis => {
                let redis = RedisCache::connect(&config.redis_url)
                    .await
                    .with_context(|| format!("connecting to Redis at {}", config.redis_url))?;
                let cache: Arc<dyn CachePort> = Arc::new(redis);
                (cache, None)
            }
            CacheBackend::Memory => {
                let memory = MemoryCache::new();
                let handle = spawn_cleanup_task(memory.clone(), config.cleanup_interval);
                info!("In-process cache initialized, cleanup task started");
                let cache: Arc<dyn CachePort> = Arc::new(memory);
                (cache, Some(handle))
            }
        };

    let search = Arc::new(ElasticSearch::new(config.elastic_url.clone()));
    let state = AppState::new(cache, search, &config);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
