//! Shift Planner Backend
//!
//! A REST API server for shift-planner profiles and schedules.
//! Also serves the bundled front-end and static holiday data.

use shift_planner_backend::{
    api, config::Config, context::AppContext, holidays::HolidayCache, store, store::StateStore,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    let store = connect_store(&config).await;

    // Warm the holiday cache before taking traffic
    let holidays = Arc::new(HolidayCache::from_dir(&config.assets.holidays_dir));
    {
        let holidays = holidays.clone();
        let count = tokio::task::spawn_blocking(move || holidays.load().len()).await?;
        if count == 0 {
            warn!("No holiday data available; /api/holidays will return 500");
        }
    }

    let ctx = AppContext::new(store, holidays);
    let app = api::router(ctx, config.assets.entry_path());

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("Server running on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Connect the state store, or run without one
///
/// A missing or unusable connection string is logged and leaves the API
/// answering 503; the server still starts.
async fn connect_store(config: &Config) -> Option<StateStore> {
    let Some(url) = config.store.connection_string.as_deref() else {
        error!("DATABASE_URL is not set; API requests will be rejected");
        return None;
    };

    match store::connect(url).await {
        Ok(store) => {
            info!("State store connected ({})", store.backend_name());
            Some(store)
        }
        Err(e) => {
            error!("Failed to connect state store: {}", e);
            None
        }
    }
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
