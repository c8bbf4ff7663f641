//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use kosan_core::types::RoomId;
use kosan_database::store::PropertyQuery;
use kosan_service::QuoteRequest;

/// Quote or booking request body.
///
/// Missing `start_time` or `duration_key` is not a request error; the
/// quote comes back invalid with an inline message instead.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteBody {
    /// Room to price.
    pub room_id: RoomId,
    /// RFC 3339 check-in time.
    #[validate(length(max = 64, message = "start_time is too long"))]
    pub start_time: Option<String>,
    /// Catalog key of the selected duration.
    #[validate(length(max = 64, message = "duration_key is too long"))]
    pub duration_key: Option<String>,
}

impl From<QuoteBody> for QuoteRequest {
    fn from(body: QuoteBody) -> Self {
        QuoteRequest {
            room_id: body.room_id,
            start_time: body.start_time,
            duration_key: body.duration_key,
        }
    }
}

/// Partner price update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetPriceBody {
    /// Price in whole rupiah. Zero takes the duration off sale.
    #[validate(range(min = 0, max = 1_000_000_000, message = "price out of range"))]
    pub price: i64,
    /// Whether the duration is offered.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Property search query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertySearchParams {
    /// City filter.
    pub city: Option<String>,
    /// Name fragment.
    pub q: Option<String>,
}

impl From<PropertySearchParams> for PropertyQuery {
    fn from(params: PropertySearchParams) -> Self {
        PropertyQuery {
            city: params.city,
            text: params.q,
        }
    }
}
