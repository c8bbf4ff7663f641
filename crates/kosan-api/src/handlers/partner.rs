//! Partner (property owner) handlers.

use axum::Json;
use axum::extract::{Path, State};

use kosan_core::types::{BookingId, RoomId};
use kosan_entity::booking::BookingRecord;
use kosan_entity::property::Room;

use crate::dto::request::SetPriceBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// PUT /api/partner/rooms/{id}/prices/{key}
pub async fn set_room_price(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((room_id, key)): Path<(RoomId, String)>,
    ValidatedJson(body): ValidatedJson<SetPriceBody>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let room = state
        .pricing_service
        .set_price(&auth, room_id, &key, body.price, body.active)
        .await?;
    Ok(Json(ApiResponse::ok(room)))
}

/// POST /api/partner/bookings/{id}/confirm
pub async fn confirm_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<BookingId>,
) -> Result<Json<ApiResponse<BookingRecord>>, ApiError> {
    let record = state.booking_service.confirm(&auth, id).await?;
    Ok(Json(ApiResponse::ok(record)))
}
