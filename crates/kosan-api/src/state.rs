//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use kosan_core::config::AppConfig;
use kosan_database::store::BookingStore;
use kosan_entity::duration::DurationCatalog;
use kosan_service::{BookingService, PricingService, PropertyService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Duration catalog offered to guests
    pub catalog: Arc<DurationCatalog>,
    /// Process start, for uptime reporting
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Booking store, also used for readiness checks
    pub booking_store: Arc<dyn BookingStore>,

    // ── Services ─────────────────────────────────────────────
    /// Property listing service
    pub property_service: Arc<PropertyService>,
    /// Quote, submission and booking lifecycle service
    pub booking_service: Arc<BookingService>,
    /// Room pricing service
    pub pricing_service: Arc<PricingService>,
}
