//! PostgreSQL connection pool management.
//!
//! Every session carries a `statement_timeout` equal to the longest booking
//! call budget, so a query abandoned by the orchestrator's timeout is also
//! cancelled on the server instead of holding row locks on `bookings`.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use kosan_core::config::{BookingConfig, DatabaseConfig};
use kosan_core::error::{AppError, ErrorKind};

/// `application_name` reported in `pg_stat_activity`.
const APPLICATION_NAME: &str = "kosan-server";

/// Wrapper around the sqlx PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connect using the pool settings in `config` and the call budgets in `booking`.
    pub async fn connect(config: &DatabaseConfig, booking: &BookingConfig) -> Result<Self, AppError> {
        let options = connect_options(config, booking)?;

        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or("<default>"),
            max_connections = config.max_connections,
            statement_timeout_ms = statement_timeout_ms(booking),
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database: {e}"),
                    e,
                )
            })?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        ping(&self.pool).await
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Parse the configured URL and attach the per-session settings.
fn connect_options(
    config: &DatabaseConfig,
    booking: &BookingConfig,
) -> Result<PgConnectOptions, AppError> {
    let options: PgConnectOptions = config.url.parse().map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            "database.url is not a valid PostgreSQL URL",
            e,
        )
    })?;

    Ok(options
        .application_name(APPLICATION_NAME)
        .options([("statement_timeout", statement_timeout_ms(booking))]))
}

/// Longest single booking call the orchestrator will wait for.
fn statement_timeout_ms(booking: &BookingConfig) -> u64 {
    booking
        .availability_timeout_ms
        .max(booking.persistence_timeout_ms)
}

/// Run `SELECT 1` against the pool.
pub(crate) async fn ping(pool: &PgPool) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|v| v == 1)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
}
