//! Booking quote, submission, and lifecycle service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use kosan_core::error::AppError;
use kosan_core::result::AppResult;
use kosan_core::types::{BookingId, PageRequest, PageResponse, RoomId};
use kosan_database::store::{BookingStore, PropertyStore};
use kosan_entity::booking::{BookingRecord, BookingStatus};
use kosan_entity::duration::DurationCatalog;
use kosan_entity::property::Room;

use super::error::BookingError;
use super::orchestrator::SubmissionOrchestrator;
use crate::context::RequestContext;
use crate::quote::{BookingQuote, compute_quote};

/// Request to price a stay, and to book it.
///
/// `start_time` and `duration_key` are optional so that a half-filled form
/// still gets an inline answer instead of a rejected request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Room to quote.
    pub room_id: RoomId,
    /// RFC 3339 check-in time.
    pub start_time: Option<String>,
    /// Key of the selected duration in the catalog.
    pub duration_key: Option<String>,
}

/// Quotes, submits, and manages bookings.
#[derive(Clone)]
pub struct BookingService {
    /// Duration catalog.
    catalog: Arc<DurationCatalog>,
    /// Property and room store.
    properties: Arc<dyn PropertyStore>,
    /// Booking store.
    bookings: Arc<dyn BookingStore>,
    /// Availability check + insert sequencing.
    orchestrator: Arc<SubmissionOrchestrator>,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        catalog: Arc<DurationCatalog>,
        properties: Arc<dyn PropertyStore>,
        bookings: Arc<dyn BookingStore>,
        orchestrator: Arc<SubmissionOrchestrator>,
    ) -> Self {
        Self {
            catalog,
            properties,
            bookings,
            orchestrator,
        }
    }

    /// Price a stay from the room's stored pricing plan.
    ///
    /// Missing fields, an unknown duration key, or an unpriced duration are
    /// reported inside the returned quote rather than as errors.
    pub async fn quote(&self, req: &QuoteRequest) -> AppResult<BookingQuote> {
        let room = self.bookable_room(req.room_id).await?;
        let prices = room.price_table();
        let duration = req
            .duration_key
            .as_deref()
            .and_then(|key| self.catalog.get(key));

        Ok(compute_quote(
            req.start_time.as_deref(),
            duration,
            Some(&prices),
        ))
    }

    /// Quote server-side and submit the booking for the current user.
    pub async fn submit(&self, ctx: &RequestContext, req: &QuoteRequest) -> AppResult<BookingRecord> {
        let quote = self.quote(req).await?.to_quote().map_err(BookingError::from)?;

        if quote.check_in_time < ctx.request_time {
            return Err(AppError::validation("Check-in time is in the past"));
        }

        let record = self
            .orchestrator
            .submit_quote(req.room_id, &quote, ctx.user_id)
            .await?;
        Ok(record)
    }

    /// Fetch one of the current user's bookings.
    pub async fn get(&self, ctx: &RequestContext, id: BookingId) -> AppResult<BookingRecord> {
        let booking = self.find(id).await?;
        if booking.user_id != ctx.user_id {
            return Err(AppError::forbidden("Booking belongs to another user"));
        }
        Ok(booking)
    }

    /// The current user's bookings, newest check-in first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<BookingRecord>> {
        self.bookings.find_by_user(ctx.user_id, &page).await
    }

    /// Cancel one of the current user's pending bookings.
    pub async fn cancel(&self, ctx: &RequestContext, id: BookingId) -> AppResult<BookingRecord> {
        let booking = self.get(ctx, id).await?;
        if booking.status != BookingStatus::Pending {
            return Err(AppError::conflict(format!(
                "Only pending bookings can be cancelled (status is {})",
                booking.status
            )));
        }

        let cancelled = self
            .bookings
            .transition_status(id, BookingStatus::Pending, BookingStatus::Cancelled)
            .await?
            .ok_or_else(|| AppError::conflict("Booking changed status concurrently"))?;

        info!(booking_id = %id, user_id = %ctx.user_id, "Booking cancelled");
        Ok(cancelled)
    }

    /// Confirm a pending booking on a room the current user owns.
    pub async fn confirm(&self, ctx: &RequestContext, id: BookingId) -> AppResult<BookingRecord> {
        let booking = self.find(id).await?;

        let room = self
            .properties
            .find_room(booking.room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {} not found", booking.room_id)))?;
        let property = self
            .properties
            .find_property(room.property_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Property {} not found", room.property_id))
            })?;
        if property.owner_id != ctx.user_id {
            return Err(AppError::forbidden("Only the property owner can confirm bookings"));
        }

        let confirmed = self
            .bookings
            .transition_status(id, BookingStatus::Pending, BookingStatus::Confirmed)
            .await?
            .ok_or_else(|| {
                AppError::conflict(format!(
                    "Only pending bookings can be confirmed (status is {})",
                    booking.status
                ))
            })?;

        info!(booking_id = %id, owner_id = %ctx.user_id, "Booking confirmed");
        Ok(confirmed)
    }

    async fn find(&self, id: BookingId) -> AppResult<BookingRecord> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))
    }

    async fn bookable_room(&self, room_id: RoomId) -> AppResult<Room> {
        let room = self
            .properties
            .find_room(room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))?;
        if !room.is_active {
            warn!(room_id = %room_id, "Quote requested for inactive room");
            return Err(AppError::validation("Room is not accepting bookings"));
        }
        Ok(room)
    }
}
