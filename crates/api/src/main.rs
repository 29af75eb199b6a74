use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use datalogger_core::drift::DriftEngine;
use datalogger_core::registry::DataloggerRegistry;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use datalogger_api::background;
use datalogger_api::config::ServerConfig;
use datalogger_api::router::build_app_router;
use datalogger_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datalogger_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });
    tracing::info!(
        host = %config.host,
        port = config.port,
        drift_interval_secs = config.drift_interval_secs,
        seeded = config.drift_seed.is_some(),
        "Loaded server configuration"
    );

    // --- Registry ---
    let registry = Arc::new(DataloggerRegistry::initialize());
    let ids: Vec<&str> = registry.ids().collect();
    tracing::info!(dataloggers = %ids.join(", "), "Registry initialized");

    // --- Drift engine ---
    let engine = match config.drift_seed {
        Some(seed) => DriftEngine::seeded(seed),
        None => DriftEngine::from_entropy(),
    };
    let drift_cancel = CancellationToken::new();
    let drift_handle = tokio::spawn(background::drift::run(
        Arc::clone(&registry),
        engine,
        Duration::from_secs(config.drift_interval_secs),
        drift_cancel.clone(),
    ));

    // --- App state + router ---
    let addr = SocketAddr::new(config.host, config.port);
    let state = AppState::new(Arc::clone(&registry), config);
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    drift_cancel.cancel();
    match tokio::time::timeout(Duration::from_secs(5), drift_handle).await {
        Ok(Ok(())) => tracing::info!("Drift engine stopped"),
        Ok(Err(e)) => tracing::error!(error = %e, "Drift engine task failed"),
        Err(_) => tracing::warn!("Drift engine did not stop within 5s"),
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
