//! # kosan-service
//!
//! Business logic for Kosan. The [`quote`] module is the pure pricing and
//! duration engine; [`booking`] sequences the availability check and the
//! insert that turn an accepted quote into a pending reservation. The other
//! services cover listings and partner price management.
//!
//! Services follow constructor injection: every collaborator is provided
//! at construction time as an `Arc`.

pub mod booking;
pub mod context;
pub mod pricing;
pub mod property;
pub mod quote;

pub use booking::{
    BookingError, BookingService, QuoteRequest, SubmissionOrchestrator, SubmissionState,
};
pub use context::RequestContext;
pub use pricing::PricingService;
pub use property::PropertyService;
pub use quote::{BookingQuote, Quote, QuoteRejection, compute_quote, try_quote};
