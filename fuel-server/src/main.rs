use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use fuel_server::config::ServerConfig;
use fuel_server::service::StationService;
use fuel_server::store::MemoryStore;
use fuel_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fuel_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let store = match &config.data_file {
        Some(path) => {
            let store = MemoryStore::open(path)?;
            tracing::info!(path = %path.display(), "opened snapshot store");
            store
        }
        None => {
            tracing::warn!("FUEL_DATA_FILE not set; data will not survive a restart");
            MemoryStore::in_memory()
        }
    };
    let store = Arc::new(store);

    let service = StationService::new(Arc::clone(&store), config.proximity.clone());
    let app = create_router(AppState::new(service));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "fuel station server listening");
    tracing::info!("  GET    /health                            - Health check");
    tracing::info!("  GET    /api/gas-stations?lat=&lng=&radius= - Nearby stations");
    tracing::info!("  POST   /api/gas-stations                  - Register a station");
    tracing::info!("  GET    /api/gas-stations/:id              - Station details");
    tracing::info!("  PUT    /api/gas-stations/:id              - Update a station");
    tracing::info!("  DELETE /api/gas-stations/:id              - Delete a station");
    tracing::info!("  GET    /api/gas-stations/:id/prices       - Price history");
    tracing::info!("  GET    /api/gas-stations/:id/latest-prices - Latest price per fuel");
    tracing::info!("  POST   /api/prices                        - Report a price");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close()?;
    tracing::info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
