//! In-memory booking store using a Tokio mutex.
//!
//! Suitable for single-node deployments and tests. The overlap check and
//! the insert happen under the same lock, so concurrent inserts for the
//! same room and interval behave like the PostgreSQL exclusion constraint:
//! exactly one wins.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use kosan_core::error::AppError;
use kosan_core::result::AppResult;
use kosan_core::traits::AvailabilityOracle;
use kosan_core::types::{BookingId, PageRequest, PageResponse, RoomId, UserId};
use kosan_entity::booking::{BookingRecord, BookingRequest, BookingStatus};

use crate::store::BookingStore;

/// Booking store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookingStore {
    bookings: Arc<Mutex<Vec<BookingRecord>>>,
}

impl MemoryBookingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookings in any status.
    pub async fn len(&self) -> usize {
        self.bookings.lock().await.len()
    }

    /// Whether the store holds no bookings.
    pub async fn is_empty(&self) -> bool {
        self.bookings.lock().await.is_empty()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn insert(&self, request: &BookingRequest) -> AppResult<BookingRecord> {
        let mut bookings = self.bookings.lock().await;

        let clash = bookings.iter().any(|b| {
            b.room_id == request.room_id && b.blocks(request.start_time, request.end_time)
        });
        if clash {
            warn!(room_id = %request.room_id, "Insert rejected by overlap check");
            return Err(AppError::conflict(
                "Room already has a booking in this interval",
            ));
        }

        let now = Utc::now();
        let record = BookingRecord {
            id: BookingId::new(),
            user_id: request.user_id,
            room_id: request.room_id,
            start_time: request.start_time,
            end_time: request.end_time,
            duration_type: request.duration_type,
            total_price: request.total_price,
            status: request.status,
            created_at: now,
            updated_at: now,
        };
        bookings.push(record.clone());

        debug!(booking_id = %record.id, total = bookings.len(), "Booking stored in memory");
        Ok(record)
    }

    async fn find_by_id(&self, id: BookingId) -> AppResult<Option<BookingRecord>> {
        let bookings = self.bookings.lock().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BookingRecord>> {
        let bookings = self.bookings.lock().await;
        let mut mine: Vec<BookingRecord> = bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(PageResponse::from_vec(mine, page))
    }

    async fn transition_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<Option<BookingRecord>> {
        let mut bookings = self.bookings.lock().await;
        let Some(booking) = bookings.iter_mut().find(|b| b.id == id && b.status == from) else {
            return Ok(None);
        };
        booking.status = to;
        booking.updated_at = Utc::now();
        Ok(Some(booking.clone()))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// The memory store doubles as its own oracle, answering from the same
/// rows the insert path checks.
#[async_trait]
impl AvailabilityOracle for MemoryBookingStore {
    async fn is_available(
        &self,
        room_id: RoomId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool> {
        let bookings = self.bookings.lock().await;
        Ok(!bookings
            .iter()
            .any(|b| b.room_id == room_id && b.blocks(start, end)))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
