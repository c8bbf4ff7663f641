//! # kosan-database
//!
//! PostgreSQL connection management, the store traits the service layer
//! depends on, their PostgreSQL repositories, the availability oracles,
//! and in-memory implementations for single-node development and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod oracle;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{BookingStore, PropertyQuery, PropertyStore};
