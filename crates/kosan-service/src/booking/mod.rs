//! Booking submission and lifecycle.

pub mod error;
pub mod orchestrator;
pub mod service;
pub mod state;

pub use error::BookingError;
pub use orchestrator::SubmissionOrchestrator;
pub use service::{BookingService, QuoteRequest};
pub use state::SubmissionState;
