//! Booking quote computation.

pub mod engine;

pub use engine::{BookingQuote, Quote, QuoteRejection, check_out_time, compute_quote, try_quote};
