//! Meet Goiás server binary.
//!
//! Serves the public nomination API and the session-gated admin surface from
//! a single process. Nominations persist to a JSON file on disk.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use meet_goias_server::config::ServerConfig;
use meet_goias_server::state::AppState;
use meet_goias_server::store::{JsonFileStorage, NominationStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "meet_goias_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the JSON-file storage substrate
    let storage = Arc::new(JsonFileStorage::new(config.data_path.clone()));
    let store = NominationStore::new(storage);

    match store.seed_if_empty().await {
        Ok(true) => tracing::info!("Seeded initial nominations"),
        Ok(false) => {}
        Err(err) => {
            tracing::error!(error = %err, "Failed to seed storage");
            std::process::exit(1);
        }
    }

    let addr = config.socket_addr();
    let state = AppState::new(config, store);
    let app = meet_goias_server::app(state);

    tracing::info!("meet-goias server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
