use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tickethub_api::{app, AppState};
use tickethub_store::app_config::Config;
use tickethub_store::{FileStore, KeyValueStore, MemoryStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tickethub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting TicketHub API on port {}", config.server.port);

    let kv: Arc<dyn KeyValueStore> = match &config.storage.data_dir {
        Some(dir) => {
            tracing::info!(data_dir = %dir.display(), "Using file-backed booking store");
            Arc::new(FileStore::open(dir).await.context("Failed to open data directory")?)
        }
        None => {
            tracing::warn!("No data_dir configured, bookings will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(&config.booking_rules, kv);
    let _reaper = state.spawn_reaper();
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
