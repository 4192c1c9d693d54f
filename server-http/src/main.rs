mod data;
mod handlers;
mod routes;
mod state;

use data::UserData;
use shared::config::ServerSettings;
use shared::CacheSettings;
use state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting cache-aside HTTP server...");

    // Load environment variables from .env file (if exists)
    match dotenvy::dotenv() {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    // Load configuration; an invalid cache configuration is fatal.
    let settings = match CacheSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let server = ServerSettings::from_env();

    info!(
        "Cache backend: {:?} (enabled: {}, default ttl: {}s)",
        settings.backend, settings.enabled, settings.default_ttl.0
    );

    let backend = match storage_backends::from_settings(&settings) {
        Ok(backend) => backend,
        Err(e) => {
            error!("failed to initialize cache backend: {}", e);
            std::process::exit(1);
        }
    };

    // The dataset sleeps per lookup so cache hits are visible from curl.
    let data = Arc::new(UserData::new().with_delay(Duration::from_secs(3)));

    let state = AppState::new(backend, &settings, data);

    // Build router
    let router = routes::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(server.bind_addr())
        .await
        .expect("Failed to bind HTTP listener");

    info!("HTTP Server listening on http://{}", server.bind_addr());
    info!("Try: curl http://localhost:{}/tests", server.port);

    // Graceful shutdown handler
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");

    info!("Server shutdown complete");
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Shutting down gracefully...");
}
