//! Resmon API server.
//!
//! Main entry point for the reservoir monitoring REST API.

use std::net::SocketAddr;
use std::sync::Arc;

use resmon::config::ServiceConfig;
use resmon::db::repositories::LocalRepository;
use resmon::db::repository::ReservoirRepository;
use resmon::http::{create_router, AppState};

/// Environment variable naming a JSON seed file for the local store.
/// When unset the server starts with the built-in sample fixture.
const DATA_PATH_VAR: &str = "RESMON_DATA";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    tracing::info!("Starting Resmon API server");

    let config = ServiceConfig::from_env().map_err(|err| anyhow::anyhow!(err))?;

    let repository = match std::env::var(DATA_PATH_VAR) {
        Ok(path) => {
            tracing::info!("Loading reservoir data from {}", path);
            LocalRepository::from_json_file(&path)?
        }
        Err(_) => {
            tracing::warn!(
                "{} not set, starting with built-in sample data",
                DATA_PATH_VAR
            );
            LocalRepository::with_sample_data()
        }
    };
    tracing::info!("Tracking {} reservoirs", repository.reservoir_count());

    let addr: SocketAddr = config.bind_addr().parse()?;
    let state = AppState::new(
        Arc::new(repository) as Arc<dyn ReservoirRepository>,
        Arc::new(config),
    );
    let app = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
