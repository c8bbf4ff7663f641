//! Application builder: wires services into state and wraps the router in
//! the HTTP middleware stack.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use axum::http::StatusCode;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use kosan_core::config::AppConfig;
use kosan_core::error::AppError;
use kosan_core::traits::AvailabilityOracle;
use kosan_database::store::{BookingStore, PropertyStore};
use kosan_entity::duration::DurationCatalog;
use kosan_service::{
    BookingService, PricingService, PropertyService, SubmissionOrchestrator,
};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = build_cors_layer(&state.config.server);

    build_router(state)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Builds the shared state from configuration and the chosen backends.
///
/// The duration catalog comes from `booking.durations` when configured and
/// is validated here, so a bad catalog fails startup rather than a request.
pub fn build_state(
    config: AppConfig,
    properties: Arc<dyn PropertyStore>,
    bookings: Arc<dyn BookingStore>,
    oracle: Arc<dyn AvailabilityOracle>,
) -> Result<AppState, AppError> {
    let catalog = match &config.booking.durations {
        Some(entries) => DurationCatalog::from_config(entries)
            .map_err(|e| AppError::configuration(format!("Invalid duration catalog: {e}")))?,
        None => DurationCatalog::default(),
    };
    let catalog = Arc::new(catalog);

    tracing::info!(
        durations = catalog.len(),
        oracle = oracle.name(),
        "Building application state"
    );

    let orchestrator = Arc::new(SubmissionOrchestrator::new(
        oracle,
        Arc::clone(&bookings),
        &config.booking,
    ));

    let property_service = Arc::new(PropertyService::new(Arc::clone(&properties)));
    let booking_service = Arc::new(BookingService::new(
        Arc::clone(&catalog),
        Arc::clone(&properties),
        Arc::clone(&bookings),
        orchestrator,
    ));
    let pricing_service = Arc::new(PricingService::new(Arc::clone(&catalog), properties));

    Ok(AppState {
        config: Arc::new(config),
        catalog,
        started_at: Instant::now(),
        booking_store: bookings,
        property_service,
        booking_service,
        pricing_service,
    })
}
