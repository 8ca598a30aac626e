//! Feedpulse server
//!
//! Run with: cargo run -p feedpulse-web

use std::net::SocketAddr;
use std::sync::Arc;

use feedpulse_db::{FallbackStore, FeedbackStore, JsonlStore, MemoryStore};
use feedpulse_llm::FeedbackClassifier;
use feedpulse_web::config::{Config, StorageBackend, StorageConfig};
use feedpulse_web::router::build_router;
use feedpulse_web::state::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

async fn open_store(storage: &StorageConfig) -> Arc<dyn FeedbackStore> {
    match storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory feedback storage");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::File => match JsonlStore::open(&storage.path).await {
            Ok(store) => {
                info!(path = %storage.path.display(), "Using file feedback storage");
                Arc::new(FallbackStore::new(Arc::new(store)))
            }
            Err(e) => {
                warn!(path = %storage.path.display(), error = %e,
                    "Could not open feedback file, using in-memory storage");
                Arc::new(FallbackStore::degraded())
            }
        },
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("feedpulse=debug,tower_http=info,info")),
        )
        .init();

    info!("💬 Feedpulse starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!("Could not load configuration: {e:#}. Using defaults.");
            Config::default()
        }
    };
    info!(llm = ?config.llm, storage = ?config.storage.backend, "Configuration loaded");

    let classifier = Arc::new(FeedbackClassifier::new(config.llm.ai_settings()));
    let store = open_store(&config.storage).await;
    let state = AppState::new(classifier, store);
    let app = build_router(state, &config.server);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}
