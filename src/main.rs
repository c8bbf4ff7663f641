//! Kosan Server: booking backend for a kos rental marketplace.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use kosan_core::config::AppConfig;
use kosan_core::error::AppError;
use kosan_database::DatabasePool;
use kosan_database::repositories::{BookingRepository, PropertyRepository};
use kosan_database::store::{BookingStore, PropertyStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("KOSAN_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt().pretty().with_env_filter(filter).with_target(true).init();
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Kosan v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database, &config.booking).await?;
    kosan_database::migration::prepare_schema(&db, &config.database).await?;

    // ── Step 2: Stores and availability oracle ───────────────────
    let properties: Arc<dyn PropertyStore> = Arc::new(PropertyRepository::new(db.pool().clone()));
    let bookings: Arc<dyn BookingStore> = Arc::new(BookingRepository::new(db.pool().clone()));
    let oracle = kosan_database::oracle::build_oracle(&config.availability, db.pool())?;

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = kosan_api::build_state(config, properties, bookings, oracle)?;
    let app = kosan_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Kosan server listening on {}", addr);

    // ── Step 4: Graceful shutdown ────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                tracing::info!("Shutdown signal received, draining connections...");
                let _ = shutdown_tx.send(true);
            })
            .await
    });

    // Resolves on the signal, or with an error once the server stops on its own.
    let _ = shutdown_rx.wait_for(|stopping| *stopping).await;

    match tokio::time::timeout(grace, server).await {
        Ok(Ok(result)) => result.map_err(|e| AppError::internal(format!("Server error: {e}")))?,
        Ok(Err(e)) => return Err(AppError::internal(format!("Server task failed: {e}"))),
        Err(_) => tracing::warn!(
            grace_seconds = grace.as_secs(),
            "Connections still open after grace period"
        ),
    }

    db.close().await;
    tracing::info!("Kosan server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
