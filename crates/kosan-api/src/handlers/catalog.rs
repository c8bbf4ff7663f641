//! Duration catalog handlers.

use axum::Json;
use axum::extract::{Path, State};

use kosan_core::types::RoomId;
use kosan_entity::duration::DurationOption;
use kosan_service::pricing::BookableDuration;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/durations
pub async fn list_durations(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<DurationOption>>> {
    Json(ApiResponse::ok(state.catalog.iter().cloned().collect()))
}

/// GET /api/rooms/{id}/durations
pub async fn room_durations(
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
) -> Result<Json<ApiResponse<Vec<BookableDuration>>>, ApiError> {
    let durations = state.pricing_service.bookable_durations(room_id).await?;
    Ok(Json(ApiResponse::ok(durations)))
}
