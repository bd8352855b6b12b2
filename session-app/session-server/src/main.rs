use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use session_api::{build_router, AppState};
use session_core::SessionStore;
use session_infrastructure::{MemorySessionStore, RedisSessionStore};
use session_shared::{config::AppConfig, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    session_shared::telemetry::init_telemetry();

    info!("Session server starting...");

    // Load configuration (.env, config files, environment)
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Configuration loaded: transport={:?}, store={:?}, ttl={}s",
        config.transport.mode, config.store.backend, config.expiration_ttl
    );

    // Session store
    let store = open_store(&config)?;

    // Create App State
    let state = AppState::new(store, &config)?;

    // Build router
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Session server stopped");
    Ok(())
}

fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn SessionStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            let store = Arc::new(MemorySessionStore::new());
            tokio::spawn(
                store
                    .clone()
                    .run_sweeper(Duration::from_secs(config.store.sweep_interval_secs.max(1))),
            );
            info!("Using in-memory session store");
            Ok(store)
        }
        StoreBackend::Redis => {
            let url = config
                .store
                .redis_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("STORE__REDIS_URL is not set"))?;
            let store = RedisSessionStore::new(url, config.store.max_connections)?;
            info!("Using redis session store");
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
