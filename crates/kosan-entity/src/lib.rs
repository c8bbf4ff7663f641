//! # kosan-entity
//!
//! Domain entity models for Kosan. Structs here are either database rows
//! (deriving `sqlx::FromRow`) or value objects used by the booking flow:
//! duration options, price tables and booking requests.

pub mod booking;
pub mod duration;
pub mod pricing;
pub mod property;

pub use booking::{BookingRecord, BookingRequest, BookingStatus};
pub use duration::{CatalogError, DurationCatalog, DurationOption, DurationType};
pub use pricing::{PriceEntry, PriceTable, PricingPlan};
pub use property::{Property, PropertyWithRooms, Room};
