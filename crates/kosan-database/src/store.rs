//! Store traits consumed by the service layer.
//!
//! Each trait has a PostgreSQL repository in [`crate::repositories`] and
//! an in-memory implementation in [`crate::memory`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use kosan_core::result::AppResult;
use kosan_core::types::{BookingId, PageRequest, PageResponse, PropertyId, RoomId, UserId};
use kosan_entity::booking::{BookingRecord, BookingRequest, BookingStatus};
use kosan_entity::pricing::PricingPlan;
use kosan_entity::property::{Property, Room};

/// Persistence of booking records.
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    /// Insert a new booking and return the stored row.
    ///
    /// Implementations must reject, atomically with the insert, a booking
    /// whose interval overlaps a live booking on the same room. Such a
    /// rejection is reported as an `ErrorKind::Conflict` error.
    async fn insert(&self, request: &BookingRequest) -> AppResult<BookingRecord>;

    /// Find a booking by id.
    async fn find_by_id(&self, id: BookingId) -> AppResult<Option<BookingRecord>>;

    /// List a user's bookings, newest check-in first.
    async fn find_by_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BookingRecord>>;

    /// Move a booking from `from` to `to`.
    ///
    /// Returns `None` when the booking does not exist or is not in `from`.
    async fn transition_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<Option<BookingRecord>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Filters for property search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyQuery {
    /// Case-insensitive exact city match.
    pub city: Option<String>,
    /// Case-insensitive substring of the property name.
    pub text: Option<String>,
}

impl PropertyQuery {
    /// Whether `property` satisfies every filter that is set.
    pub fn matches(&self, property: &Property) -> bool {
        let city_ok = self
            .city
            .as_deref()
            .is_none_or(|city| property.city.eq_ignore_ascii_case(city));
        let text_ok = self.text.as_deref().is_none_or(|text| {
            property
                .name
                .to_lowercase()
                .contains(&text.to_lowercase())
        });
        city_ok && text_ok
    }
}

/// Read access to properties and rooms, plus partner price edits.
#[async_trait]
pub trait PropertyStore: Send + Sync + 'static {
    /// Find a property by id.
    async fn find_property(&self, id: PropertyId) -> AppResult<Option<Property>>;

    /// Search properties, newest first.
    async fn search_properties(
        &self,
        query: &PropertyQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Property>>;

    /// All rooms of a property, by name.
    async fn find_rooms(&self, property_id: PropertyId) -> AppResult<Vec<Room>>;

    /// Find a room by id.
    async fn find_room(&self, id: RoomId) -> AppResult<Option<Room>>;

    /// Replace a room's pricing plan and return the updated room.
    async fn update_pricing_plan(
        &self,
        room_id: RoomId,
        plan: &PricingPlan,
    ) -> AppResult<Option<Room>>;
}
