//! Quote handler.

use axum::Json;
use axum::extract::State;

use kosan_service::{BookingQuote, QuoteRequest};

use crate::dto::request::QuoteBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/quotes
///
/// Answers 200 whenever the room exists; an unusable selection comes back
/// as `is_valid: false` with a message.
pub async fn create_quote(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<QuoteBody>,
) -> Result<Json<ApiResponse<BookingQuote>>, ApiError> {
    let request: QuoteRequest = body.into();
    let quote = state.booking_service.quote(&request).await?;
    Ok(Json(ApiResponse::ok(quote)))
}
