//! Booking repository backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use kosan_core::error::{AppError, ErrorKind};
use kosan_core::result::AppResult;
use kosan_core::types::{BookingId, PageRequest, PageResponse, UserId};
use kosan_entity::booking::{BookingRecord, BookingRequest, BookingStatus};

use crate::connection::ping;
use crate::store::BookingStore;

/// SQLSTATE raised by the `bookings_no_overlap` exclusion constraint.
const EXCLUSION_VIOLATION: &str = "23P01";

/// Repository for booking rows.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Creates a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_overlap_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == EXCLUSION_VIOLATION)
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn insert(&self, request: &BookingRequest) -> AppResult<BookingRecord> {
        sqlx::query_as::<_, BookingRecord>(
            "INSERT INTO bookings (user_id, room_id, start_time, end_time, duration_type, \
             total_price, status) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(request.user_id)
        .bind(request.room_id)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.duration_type)
        .bind(request.total_price)
        .bind(request.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_overlap_violation(&e) {
                warn!(room_id = %request.room_id, "Insert rejected by overlap constraint");
                AppError::with_source(
                    ErrorKind::Conflict,
                    "Room already has a booking in this interval",
                    e,
                )
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to insert booking", e)
            }
        })
    }

    async fn find_by_id(&self, id: BookingId) -> AppResult<Option<BookingRecord>> {
        sqlx::query_as::<_, BookingRecord>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BookingRecord>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count bookings", e)
            })?;

        let bookings = sqlx::query_as::<_, BookingRecord>(
            "SELECT * FROM bookings WHERE user_id = $1 \
             ORDER BY start_time DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn transition_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<Option<BookingRecord>> {
        sqlx::query_as::<_, BookingRecord>(
            "UPDATE bookings SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update booking status", e)
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        ping(&self.pool).await
    }
}
