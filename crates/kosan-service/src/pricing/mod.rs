//! Room pricing: bookable durations and partner price edits.

pub mod service;

pub use service::{BookableDuration, PricingService, bookable_durations};
