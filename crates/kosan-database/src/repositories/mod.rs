//! PostgreSQL repository implementations.

pub mod booking;
pub mod property;

pub use booking::BookingRepository;
pub use property::PropertyRepository;
