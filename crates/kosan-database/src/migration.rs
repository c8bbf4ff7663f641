//! Schema migrations and the booking overlap guard check.
//!
//! Double-booking prevention relies on the `bookings_no_overlap` exclusion
//! constraint (backed by `btree_gist`). The server refuses to start against
//! a schema that lacks it, whether or not it applied the migrations itself.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::{info, warn};

use kosan_core::config::DatabaseConfig;
use kosan_core::error::{AppError, ErrorKind};

use crate::connection::DatabasePool;

/// Embedded migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Name of the exclusion constraint that rejects overlapping live bookings.
pub const OVERLAP_CONSTRAINT: &str = "bookings_no_overlap";

/// Apply pending migrations when enabled, then check the overlap guard.
pub async fn prepare_schema(db: &DatabasePool, config: &DatabaseConfig) -> Result<(), AppError> {
    if config.run_migrations {
        info!(embedded = MIGRATOR.iter().count(), "Applying database migrations");
        MIGRATOR.run(db.pool()).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;
    } else {
        warn!("Migrations disabled; using the existing schema");
    }

    ensure_overlap_guard(db.pool()).await?;
    info!(constraint = OVERLAP_CONSTRAINT, "Booking overlap guard present");
    Ok(())
}

/// Fail unless `bookings` carries the overlap exclusion constraint.
async fn ensure_overlap_guard(pool: &PgPool) -> Result<(), AppError> {
    let present: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM pg_constraint
            WHERE conname = $1
              AND contype = 'x'
              AND conrelid = 'bookings'::regclass
        )
        "#,
    )
    .bind(OVERLAP_CONSTRAINT)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to inspect schema", e))?;

    if present {
        Ok(())
    } else {
        Err(AppError::configuration(format!(
            "bookings table is missing the {OVERLAP_CONSTRAINT} exclusion constraint"
        )))
    }
}
