use std::sync::Arc;

use pricerank_core::{CsvLoader, FsPriceStore, PriceService};
use pricerank_web::{create_router, AppState, ConfigError, RequestThrottle, ServerConfig};
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("server i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl StartupError {
    const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
        }
    }
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    fmt().with_env_filter(filter).with_target(false).init();

    if let Err(error) = run().await {
        tracing::error!(%error, "pricerank stopped");
        std::process::exit(error.exit_code());
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::load()?;

    let store = FsPriceStore::new(config.data_dir.clone());
    let service = PriceService::new(
        Arc::new(store),
        CsvLoader::new(config.offset),
        config.scale,
    );
    let throttle = RequestThrottle::new(config.rate_window, config.rate_limit);
    let app = create_router(AppState::new(service), throttle);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        data_dir = %config.data_dir.display(),
        rate_limit = config.rate_limit.get(),
        rate_window_secs = config.rate_window.as_secs(),
        "pricerank listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("pricerank shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
    }
}
