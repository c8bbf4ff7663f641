//! Property listing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use kosan_core::types::{PageResponse, PropertyId};
use kosan_entity::property::{Property, PropertyWithRooms};

use crate::dto::request::PropertySearchParams;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// GET /api/properties
pub async fn search_properties(
    State(state): State<AppState>,
    Query(search): Query<PropertySearchParams>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Property>>>, ApiError> {
    let page = state
        .property_service
        .search(search.into(), params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/properties/{id}
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<PropertyId>,
) -> Result<Json<ApiResponse<PropertyWithRooms>>, ApiError> {
    let property = state.property_service.get_with_rooms(id).await?;
    Ok(Json(ApiResponse::ok(property)))
}
