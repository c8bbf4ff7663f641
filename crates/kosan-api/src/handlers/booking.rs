//! Guest booking handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use kosan_core::types::{BookingId, PageResponse};
use kosan_entity::booking::BookingRecord;
use kosan_service::QuoteRequest;

use crate::dto::request::QuoteBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<QuoteBody>,
) -> Result<(StatusCode, Json<ApiResponse<BookingRecord>>), ApiError> {
    let request: QuoteRequest = body.into();
    let record = state.booking_service.submit(&auth, &request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<BookingRecord>>>, ApiError> {
    let page = state
        .booking_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<BookingId>,
) -> Result<Json<ApiResponse<BookingRecord>>, ApiError> {
    let record = state.booking_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<BookingId>,
) -> Result<Json<ApiResponse<BookingRecord>>, ApiError> {
    let record = state.booking_service.cancel(&auth, id).await?;
    Ok(Json(ApiResponse::ok(record)))
}
