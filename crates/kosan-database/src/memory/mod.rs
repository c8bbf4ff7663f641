//! In-memory store and oracle implementations.

pub mod booking;
pub mod oracle;
pub mod property;

pub use booking::MemoryBookingStore;
pub use oracle::StaticAvailabilityOracle;
pub use property::MemoryPropertyStore;
