//! Route definitions for the Kosan HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(catalog_routes())
        .merge(property_routes())
        .merge(booking_routes())
        .merge(partner_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Liveness and readiness
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/ready", get(handlers::health::ready))
}

/// Duration catalog, globally and per room
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/durations", get(handlers::catalog::list_durations))
        .route(
            "/rooms/{id}/durations",
            get(handlers::catalog::room_durations),
        )
}

/// Property search and detail
fn property_routes() -> Router<AppState> {
    Router::new()
        .route("/properties", get(handlers::property::search_properties))
        .route("/properties/{id}", get(handlers::property::get_property))
}

/// Quotes and guest bookings
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/quotes", post(handlers::quote::create_quote))
        .route(
            "/bookings",
            get(handlers::booking::list_bookings).post(handlers::booking::create_booking),
        )
        .route("/bookings/{id}", get(handlers::booking::get_booking))
        .route(
            "/bookings/{id}/cancel",
            post(handlers::booking::cancel_booking),
        )
}

/// Partner price management and booking confirmation
fn partner_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/partner/rooms/{id}/prices/{key}",
            put(handlers::partner::set_room_price),
        )
        .route(
            "/partner/bookings/{id}/confirm",
            post(handlers::partner::confirm_booking),
        )
}
