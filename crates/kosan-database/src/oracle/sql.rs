//! Availability oracle backed by a SQL function on the booking database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use kosan_core::error::{AppError, ErrorKind};
use kosan_core::result::AppResult;
use kosan_core::traits::AvailabilityOracle;
use kosan_core::types::RoomId;

/// Calls `check_room_availability(room_id, start, end)`.
#[derive(Debug, Clone)]
pub struct SqlAvailabilityOracle {
    pool: PgPool,
}

impl SqlAvailabilityOracle {
    /// Creates a new SQL-backed oracle.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityOracle for SqlAvailabilityOracle {
    async fn is_available(
        &self,
        room_id: RoomId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool> {
        let available: bool = sqlx::query_scalar("SELECT check_room_availability($1, $2, $3)")
            .bind(room_id)
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Availability check query failed",
                    e,
                )
            })?;

        debug!(room_id = %room_id, %start, %end, available, "Availability checked");
        Ok(available)
    }

    fn name(&self) -> &'static str {
        "sql"
    }
}
